//! Facade crate for Machex features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `machex` with the `server` feature flag.
//! - Call `machex::init` to register feature slices; extend as new slices appear.

use machex_database::Database;
pub use machex_domain as domain;
use machex_domain::config::ApiConfig;
use machex_event_bus::EventBus;
pub use machex_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use machex_catalog::server::{admin_router, public_router};
        pub use machex_iam::server::iam_router;
        pub use machex_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use machex_audit as audit;
    pub use machex_catalog as catalog;
    pub use machex_iam as iam;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "catalog",
        "iam",
        "audit",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub async fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Catalog
    slices.push(features::catalog::init(&config.catalog, database.clone())?);

    // Identity & Access Management (IAM)
    slices.push(features::iam::init(&config.security, database.clone()).await?);

    // Audit trail
    slices.push(features::audit::init(database.clone(), events)?);

    Ok(slices)
}
