//! Route guard demo
//!
//! Shows how an embedding HTTP layer would use the model: route paths are
//! globally unique permissions, the session supplies role IDs, and every
//! request is checked before dispatch.
//!
//! Run with `RUST_LOG=route_acl=debug cargo run --example route_guard`.

use anyhow::{bail, Result};
use route_acl::{new_role_with_unique_permissions, AccessRegistry, Role, Scope};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn build_registry() -> Result<AccessRegistry> {
    let mut registry = AccessRegistry::new();

    registry
        .try_add_role(new_role_with_unique_permissions(
            "viewer",
            "Viewer",
            ["GET /articles", "GET /articles/:id"],
        ))?
        .try_add_role(new_role_with_unique_permissions(
            "editor",
            "Editor",
            ["POST /articles", "PUT /articles/:id"],
        ))?;

    // Multi-scope role for the admin console
    let admin = Role::new("admin", "Administrator")
        .with_scope(Scope::new("users", "User management").with_permissions(["list", "ban"]))
        .with_scope(Scope::new("billing", "Billing").with_permissions(["list", "refund"]));
    registry.try_add_role(admin)?;

    Ok(registry)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("route_acl v{}", route_acl::VERSION);

    let registry = build_registry()?;

    let session_roles = vec!["viewer".to_string(), "editor".to_string()];
    for route in ["GET /articles", "PUT /articles/:id", "DELETE /articles/:id"] {
        let decision = registry.check_uniquely(&session_roles, route);
        if decision.allowed {
            info!(route, role = ?decision.role_id, "dispatching request");
        } else {
            warn!(route, reason = %decision.reason, "rejecting request with 403");
        }
    }

    // Same permission string in two scopes: the scope disambiguates
    let admin_roles = ["admin"];
    if !registry.is_role_allowed(&admin_roles, "billing", "refund") {
        bail!("admin should be able to refund");
    }
    if registry.is_role_allowed(&admin_roles, "users", "refund") {
        bail!("refund must not leak into the users scope");
    }
    info!("admin console checks passed");

    Ok(())
}
