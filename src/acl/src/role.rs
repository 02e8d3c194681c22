//! Roles
//!
//! A role is an assignable identity, typically a position in a company or a
//! user group, holding any number of [`Scope`]s keyed by scope ID.

use crate::error::{AclError, Result};
use crate::scope::Scope;
use crate::types::{Permission, RoleId, ScopeId};
use std::collections::HashMap;
use tracing::trace;

/// Role owning a set of scopes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Role {
    id: RoleId,
    name: String,
    scopes: HashMap<ScopeId, Scope>,
}

impl Role {
    /// Create a role with no scopes
    pub fn new(id: impl Into<RoleId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scopes: HashMap::new(),
        }
    }

    /// Create a role for systems where every permission string is globally
    /// unique (route paths, for instance) and scopes are not needed.
    ///
    /// The role holds exactly one scope whose ID equals the role ID.
    pub fn with_unique_permissions<I, P>(
        id: impl Into<RoleId>,
        name: impl Into<String>,
        permissions: I,
    ) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        let id = id.into();
        let scope = Scope::new(id.clone(), "").with_permissions(permissions);
        Self::new(id, name).with_scope(scope)
    }

    /// Attach a scope to a role being built
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.add_scope(scope);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn scope(&self, scope_id: &str) -> Option<&Scope> {
        self.scopes.get(scope_id)
    }

    /// Mutable access for editing a scope's permissions in place
    pub fn scope_mut(&mut self, scope_id: &str) -> Option<&mut Scope> {
        self.scopes.get_mut(scope_id)
    }

    /// Scope lookup that reports a missing scope as an error
    pub fn require_scope(&self, scope_id: &str) -> Result<&Scope> {
        self.scopes
            .get(scope_id)
            .ok_or_else(|| AclError::ScopeNotFound {
                role: self.id.clone(),
                scope: scope_id.to_string(),
            })
    }

    /// All scopes, in no particular order
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.values()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Attach a scope, replacing any scope with the same ID
    pub fn add_scope(&mut self, scope: Scope) -> &mut Self {
        trace!(role = %self.id, scope = %scope.id(), "adding scope");
        self.scopes.insert(scope.id().to_string(), scope);
        self
    }

    /// Attach scopes in order; on ID collisions the last one wins
    pub fn add_scopes(&mut self, scopes: impl IntoIterator<Item = Scope>) -> &mut Self {
        for scope in scopes {
            self.add_scope(scope);
        }
        self
    }

    /// Attach a scope unless its ID is already taken
    pub fn try_add_scope(&mut self, scope: Scope) -> Result<&mut Self> {
        if self.scopes.contains_key(scope.id()) {
            return Err(AclError::DuplicateScope {
                role: self.id.clone(),
                scope: scope.id().to_string(),
            });
        }
        Ok(self.add_scope(scope))
    }

    /// Detach a scope; unknown IDs are ignored
    pub fn remove_scope_by_id(&mut self, scope_id: &str) -> &mut Self {
        if self.scopes.remove(scope_id).is_some() {
            trace!(role = %self.id, scope = %scope_id, "removed scope");
        }
        self
    }

    pub fn remove_scopes_by_id<I, S>(&mut self, scope_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for scope_id in scope_ids {
            self.remove_scope_by_id(scope_id.as_ref());
        }
        self
    }

    /// Check whether the scope `scope_id` of this role grants `permission`.
    ///
    /// Permission strings may repeat across scopes, so the scope must be
    /// named. A missing scope denies.
    pub fn is_allowed(&self, scope_id: &str, permission: &str) -> bool {
        self.scopes
            .get(scope_id)
            .is_some_and(|scope| scope.grants(permission))
    }

    /// Check whether any scope of this role grants `permission`.
    ///
    /// Meant for systems where every permission string is unique, so the
    /// caller does not need to know which scope holds it.
    pub fn is_allowed_uniquely(&self, permission: &str) -> bool {
        self.granting_scope(permission).is_some()
    }

    /// First scope found to grant `permission` (map order, unspecified)
    pub(crate) fn granting_scope(&self, permission: &str) -> Option<&Scope> {
        self.scopes.values().find(|scope| scope.grants(permission))
    }
}

/// Build a single-scope role whose permissions are globally unique.
///
/// Shorthand for [`Role::with_unique_permissions`].
pub fn new_role_with_unique_permissions<I, P>(
    role_id: impl Into<RoleId>,
    name: impl Into<String>,
    permissions: I,
) -> Role
where
    I: IntoIterator<Item = P>,
    P: Into<Permission>,
{
    Role::with_unique_permissions(role_id, name, permissions)
}
