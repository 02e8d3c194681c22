//! Permission scopes
//!
//! A scope is the smallest unit used to group permissions: a named bundle of
//! allowed actions such as every route under `/orders`.

use crate::types::{Permission, ScopeId};

/// Named, ordered bundle of permission strings
///
/// Permissions keep insertion order and duplicates are allowed. The ID is
/// fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scope {
    id: ScopeId,
    name: String,
    permissions: Vec<Permission>,
}

impl Scope {
    /// Create an empty scope
    pub fn new(id: impl Into<ScopeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    /// Add permissions to a scope being built
    pub fn with_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.add_permissions(permissions);
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

    /// Permissions in insertion order, duplicates included
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Append one permission
    pub fn add_permission(&mut self, permission: impl Into<Permission>) -> &mut Self {
        self.permissions.push(permission.into());
        self
    }

    /// Append permissions in order, keeping duplicates
    pub fn add_permissions<I, P>(&mut self, permissions: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Remove the first occurrence of `permission`, if any
    pub fn remove_permission(&mut self, permission: &str) -> &mut Self {
        if let Some(idx) = self.permissions.iter().position(|p| p == permission) {
            self.permissions.remove(idx);
        }
        self
    }

    /// Remove the first occurrence of each given permission
    ///
    /// Listing a permission twice removes two occurrences.
    pub fn remove_permissions<I, P>(&mut self, permissions: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        for permission in permissions {
            self.remove_permission(permission.as_ref());
        }
        self
    }

    /// Exact, case-sensitive linear scan
    pub(crate) fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}
