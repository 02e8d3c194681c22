//! Access registry
//!
//! Top of the ownership tree: `AccessRegistry -> Role -> Scope -> permission`.
//! Holds roles keyed by role ID and answers whether a principal holding a set
//! of role IDs may perform a permission.
//!
//! # Concurrency
//!
//! There is no internal locking. Queries take `&self` and never mutate, so a
//! registry built at startup can be shared behind an `Arc` and queried from
//! any number of threads. Mutation needs `&mut self`; applications that edit
//! roles while serving requests wrap the registry in their own lock.

use crate::error::{AclError, Result};
use crate::role::Role;
use crate::types::{Decision, RoleId};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Registry of roles keyed by role ID
#[derive(Debug, Clone, Default)]
pub struct AccessRegistry {
    roles: HashMap<RoleId, Role>,
}

impl AccessRegistry {
    /// Create an empty registry; it denies everything
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Register a role on a registry being built
    pub fn with_role(mut self, role: Role) -> Self {
        self.add_role(role);
        self
    }

    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.get(role_id)
    }

    /// Mutable access for editing a role's scopes in place
    pub fn role_mut(&mut self, role_id: &str) -> Option<&mut Role> {
        self.roles.get_mut(role_id)
    }

    /// Role lookup that reports a missing role as an error
    pub fn require_role(&self, role_id: &str) -> Result<&Role> {
        self.roles
            .get(role_id)
            .ok_or_else(|| AclError::RoleNotFound(role_id.to_string()))
    }

    /// All roles, in no particular order
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Register a role, replacing any role with the same ID
    pub fn add_role(&mut self, role: Role) -> &mut Self {
        debug!(
            role = %role.id(),
            scopes = role.scope_count(),
            "registering role"
        );
        self.roles.insert(role.id().to_string(), role);
        self
    }

    /// Register roles in order; on ID collisions the last one wins
    pub fn add_roles(&mut self, roles: impl IntoIterator<Item = Role>) -> &mut Self {
        for role in roles {
            self.add_role(role);
        }
        self
    }

    /// Register a role unless its ID is already taken
    pub fn try_add_role(&mut self, role: Role) -> Result<&mut Self> {
        if self.roles.contains_key(role.id()) {
            return Err(AclError::DuplicateRole(role.id().to_string()));
        }
        Ok(self.add_role(role))
    }

    /// Remove a role; unknown IDs are ignored
    pub fn remove_role_by_id(&mut self, role_id: &str) -> &mut Self {
        if self.roles.remove(role_id).is_some() {
            debug!(role = %role_id, "removed role");
        }
        self
    }

    pub fn remove_roles_by_id<I, S>(&mut self, role_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for role_id in role_ids {
            self.remove_role_by_id(role_id.as_ref());
        }
        self
    }

    /// Check whether any of `role_ids` grants `permission` within `scope_id`.
    ///
    /// Roles are tried in the given order and the first grant wins. Unknown
    /// role IDs are skipped.
    pub fn is_role_allowed<S: AsRef<str>>(
        &self,
        role_ids: &[S],
        scope_id: &str,
        permission: &str,
    ) -> bool {
        let allowed = self
            .held_roles(role_ids)
            .any(|role| role.is_allowed(scope_id, permission));

        debug!(scope = %scope_id, permission = %permission, allowed, "scoped check");
        allowed
    }

    /// Check whether any of `role_ids` grants `permission` in any scope.
    pub fn is_role_allowed_uniquely<S: AsRef<str>>(&self, role_ids: &[S], permission: &str) -> bool {
        let allowed = self
            .held_roles(role_ids)
            .any(|role| role.is_allowed_uniquely(permission));

        debug!(permission = %permission, allowed, "unique check");
        allowed
    }

    /// Same as [`is_role_allowed`](Self::is_role_allowed), reporting which
    /// role granted the permission.
    pub fn check<S: AsRef<str>>(&self, role_ids: &[S], scope_id: &str, permission: &str) -> Decision {
        let decision = self
            .held_roles(role_ids)
            .find(|role| role.is_allowed(scope_id, permission))
            .map(|role| Decision::allow(role.id(), scope_id, permission))
            .unwrap_or_else(|| Decision::deny(permission));

        debug!(
            decision_id = %decision.id,
            role = ?decision.role_id,
            scope = %scope_id,
            permission = %permission,
            allowed = decision.allowed,
            "scoped decision"
        );
        decision
    }

    /// Same as [`is_role_allowed_uniquely`](Self::is_role_allowed_uniquely),
    /// reporting which role and scope granted the permission.
    pub fn check_uniquely<S: AsRef<str>>(&self, role_ids: &[S], permission: &str) -> Decision {
        let decision = self
            .held_roles(role_ids)
            .find_map(|role| {
                role.granting_scope(permission)
                    .map(|scope| Decision::allow(role.id(), scope.id(), permission))
            })
            .unwrap_or_else(|| Decision::deny(permission));

        debug!(
            decision_id = %decision.id,
            role = ?decision.role_id,
            scope = ?decision.scope_id,
            permission = %permission,
            allowed = decision.allowed,
            "unique decision"
        );
        decision
    }

    /// Registered roles among `role_ids`, in caller order
    fn held_roles<'a, S: AsRef<str>>(&'a self, role_ids: &'a [S]) -> impl Iterator<Item = &'a Role> + 'a {
        role_ids.iter().filter_map(move |role_id| {
            let role_id = role_id.as_ref();
            let role = self.roles.get(role_id);
            if role.is_none() {
                trace!(role = %role_id, "skipping unregistered role");
            }
            role
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Scope;

    fn manager() -> Role {
        Role::new("manager", "Manager")
            .with_scope(Scope::new("orders", "Orders").with_permissions(["read", "write"]))
    }

    fn clerk() -> Role {
        Role::new("clerk", "Clerk")
            .with_scope(Scope::new("orders", "Orders").with_permissions(["read"]))
            .with_scope(Scope::new("invoices", "Invoices").with_permissions(["print"]))
    }

    #[test]
    fn test_default_deny() {
        let registry = AccessRegistry::new();

        assert!(registry.is_empty());
        assert!(!registry.is_role_allowed(&["manager"], "orders", "read"));
        assert!(!registry.is_role_allowed_uniquely(&["manager"], "read"));
        assert!(!registry.is_role_allowed::<&str>(&[], "orders", "read"));
    }

    #[test]
    fn test_end_to_end_scoped() {
        let mut registry = AccessRegistry::new();
        registry.add_role(manager());

        assert!(registry.is_role_allowed(&["manager"], "orders", "write"));
        assert!(!registry.is_role_allowed(&["manager"], "orders", "delete"));
        assert!(!registry.is_role_allowed(&["nonexistent"], "orders", "write"));
    }

    #[test]
    fn test_any_held_role_grants() {
        let registry = AccessRegistry::new().with_role(manager()).with_role(clerk());

        assert!(registry.is_role_allowed(&["nonexistent", "clerk"], "invoices", "print"));
        assert!(registry.is_role_allowed(&["clerk", "manager"], "orders", "write"));
        assert!(!registry.is_role_allowed(&["clerk"], "orders", "write"));
        assert!(registry.is_role_allowed_uniquely(&["clerk"], "print"));
        assert!(!registry.is_role_allowed_uniquely(&["manager"], "print"));
    }

    #[test]
    fn test_role_ids_accept_owned_strings() {
        let registry = AccessRegistry::new().with_role(manager());
        let held = vec!["manager".to_string()];

        assert!(registry.is_role_allowed(&held, "orders", "read"));
    }

    #[test]
    fn test_add_role_overwrites() {
        let mut registry = AccessRegistry::new();
        registry.add_roles([
            manager(),
            Role::new("manager", "Manager v2")
                .with_scope(Scope::new("reports", "Reports").with_permissions(["export"])),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.role("manager").unwrap().name(), "Manager v2");
        assert!(!registry.is_role_allowed(&["manager"], "orders", "read"));
        assert!(registry.is_role_allowed(&["manager"], "reports", "export"));
    }

    #[test]
    fn test_try_add_role_rejects_duplicate() {
        let mut registry = AccessRegistry::new().with_role(manager());
        let err = registry.try_add_role(Role::new("manager", "Other")).unwrap_err();

        assert_eq!(err, AclError::DuplicateRole("manager".to_string()));
        assert_eq!(registry.role("manager").unwrap().name(), "Manager");
        assert!(registry.try_add_role(clerk()).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_role() {
        let mut registry = AccessRegistry::new().with_role(manager()).with_role(clerk());
        registry
            .remove_role_by_id("manager")
            .remove_role_by_id("manager")
            .remove_roles_by_id(["nonexistent"]);

        assert_eq!(registry.len(), 1);
        assert!(!registry.is_role_allowed(&["manager"], "orders", "write"));
        assert!(registry.is_role_allowed(&["clerk"], "orders", "read"));
    }

    #[test]
    fn test_role_mut_edits_in_place() {
        let mut registry = AccessRegistry::new().with_role(manager());
        registry
            .role_mut("manager")
            .and_then(|role| role.scope_mut("orders"))
            .unwrap()
            .remove_permission("write");

        assert!(!registry.is_role_allowed(&["manager"], "orders", "write"));
        assert!(registry.is_role_allowed(&["manager"], "orders", "read"));
    }

    #[test]
    fn test_require_role() {
        let registry = AccessRegistry::new().with_role(manager());

        assert_eq!(registry.require_role("manager").unwrap().id(), "manager");
        assert_eq!(
            registry.require_role("ghost").unwrap_err(),
            AclError::RoleNotFound("ghost".to_string())
        );
    }

    #[test]
    fn test_check_reports_first_granting_role() {
        let registry = AccessRegistry::new().with_role(manager()).with_role(clerk());

        let decision = registry.check(&["clerk", "manager"], "orders", "read");
        assert!(decision.allowed);
        assert_eq!(decision.role_id.as_deref(), Some("clerk"));
        assert_eq!(decision.scope_id.as_deref(), Some("orders"));
        assert_eq!(decision.permission, "read");

        let decision = registry.check(&["clerk", "manager"], "orders", "write");
        assert_eq!(decision.role_id.as_deref(), Some("manager"));

        let decision = registry.check(&["clerk"], "orders", "delete");
        assert!(!decision.allowed);
        assert!(decision.role_id.is_none());
        assert!(decision.scope_id.is_none());
    }

    #[test]
    fn test_check_uniquely_reports_scope() {
        let registry = AccessRegistry::new().with_role(manager()).with_role(clerk());

        let decision = registry.check_uniquely(&["manager", "clerk"], "print");
        assert!(decision.allowed);
        assert_eq!(decision.role_id.as_deref(), Some("clerk"));
        assert_eq!(decision.scope_id.as_deref(), Some("invoices"));

        let decision = registry.check_uniquely(&["manager"], "print");
        assert!(!decision.allowed);
    }
}
