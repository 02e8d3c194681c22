//! Error types for the access-control model

use thiserror::Error;

/// Access-control model errors
///
/// Only the strict mutators and lookups return these. Permission checks are
/// total and resolve every unknown ID to a denial instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AclError {
    /// No role registered under this ID
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// The role holds no scope under this ID
    #[error("Scope '{scope}' not found in role '{role}'")]
    ScopeNotFound { role: String, scope: String },

    /// A role with this ID is already registered
    #[error("Duplicate role: {0}")]
    DuplicateRole(String),

    /// The role already holds a scope with this ID
    #[error("Duplicate scope '{scope}' in role '{role}'")]
    DuplicateScope { role: String, scope: String },
}

/// Result type for access-control operations
pub type Result<T> = std::result::Result<T, AclError>;
