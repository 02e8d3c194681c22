//! Core access-control types

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Unique role identifier
pub type RoleId = String;

/// Scope identifier, unique within its owning role
pub type ScopeId = String;

/// Permission string (route path, action name, ...)
pub type Permission = String;

/// Outcome of a registry check, with the role and scope that granted it
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    /// Unique decision identifier
    pub id: String,

    /// Whether the request is allowed
    pub allowed: bool,

    /// First role, in caller order, that granted the permission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,

    /// Scope of `role_id` that holds the permission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<ScopeId>,

    /// Permission that was checked
    pub permission: Permission,

    /// Reason for the decision
    pub reason: String,

    /// Decision timestamp
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    /// Allow decision granted by `role_id` through `scope_id`
    pub fn allow(
        role_id: impl Into<RoleId>,
        scope_id: impl Into<ScopeId>,
        permission: impl Into<Permission>,
    ) -> Self {
        let role_id = role_id.into();
        let scope_id = scope_id.into();
        let permission = permission.into();
        let reason = format!(
            "role '{}' grants '{}' through scope '{}'",
            role_id, permission, scope_id
        );

        Self {
            id: Uuid::new_v4().to_string(),
            allowed: true,
            role_id: Some(role_id),
            scope_id: Some(scope_id),
            permission,
            reason,
            decided_at: Utc::now(),
        }
    }

    /// Deny decision
    pub fn deny(permission: impl Into<Permission>) -> Self {
        let permission = permission.into();
        let reason = format!("no held role grants '{}'", permission);

        Self {
            id: Uuid::new_v4().to_string(),
            allowed: false,
            role_id: None,
            scope_id: None,
            permission,
            reason,
            decided_at: Utc::now(),
        }
    }
}
