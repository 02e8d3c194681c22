//! # Route ACL
//!
//! In-process role-based access control model.
//!
//! The structure is a strict ownership tree:
//!
//! ```text
//! AccessRegistry ─┬─ Role ─┬─ Scope ── [permission, ...]
//!                 │        └─ Scope ── [permission, ...]
//!                 └─ Role ─── Scope ── [permission, ...]
//! ```
//!
//! A [`Scope`] is a named group of permissions, similar to a "resource" in
//! other ACL models. A [`Role`] stands for a position or user group and holds
//! scopes. The [`AccessRegistry`] holds roles and answers whether a principal
//! holding some role IDs may perform a permission.
//!
//! Unknown role IDs, unknown scope IDs and absent permissions all deny.
//!
//! ## Features
//!
//! - **Scoped checks** when permission strings repeat across scopes
//! - **Unique checks** when every permission string is globally unique, such
//!   as route paths
//! - **Decisions with provenance** naming the granting role and scope
//! - **Last-write-wins mutators** plus strict variants that reject collisions
//!
//! ## Example
//!
//! ```rust
//! use route_acl::{AccessRegistry, Role, Scope};
//!
//! let orders = Scope::new("orders", "Orders").with_permissions(["read", "write"]);
//! let manager = Role::new("manager", "Manager").with_scope(orders);
//!
//! let mut registry = AccessRegistry::new();
//! registry.add_role(manager);
//!
//! assert!(registry.is_role_allowed(&["manager"], "orders", "write"));
//! assert!(!registry.is_role_allowed(&["manager"], "orders", "delete"));
//! assert!(!registry.is_role_allowed(&["nonexistent"], "orders", "write"));
//! ```

pub mod error;
pub mod registry;
pub mod role;
pub mod scope;
pub mod types;

// Re-export commonly used types
pub use error::{AclError, Result};
pub use registry::AccessRegistry;
pub use role::{new_role_with_unique_permissions, Role};
pub use scope::Scope;
pub use types::{Decision, Permission, RoleId, ScopeId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
