//! IAM feature slice.
//!
//! Opaque bearer sessions for catalog operators: tokens are generated
//! server-side, stored hashed, and resolved through a bounded in-memory cache.

mod error;
mod model;
#[cfg(feature = "server")]
pub mod server;
mod service;

pub use crate::error::{IamError, IamErrorExt};
pub use crate::model::OperatorProfile;
pub use crate::service::IamService;
use machex_database::Database;
use machex_kernel::domain::config::SecurityConfig;
use machex_kernel::domain::registry::InitializedSlice;

/// Feature inner state
#[machex_derive::machex_slice]
pub struct Iam {
    pub service: IamService,
}

/// Initialize the feature
///
/// Bootstraps a default admin account when the operator table is empty.
///
/// # Errors
/// Propagates datastore failures during bootstrap.
pub async fn init(config: &SecurityConfig, db: Database) -> Result<InitializedSlice, IamError> {
    let service = IamService::new(config, db);
    service.bootstrap().await?;

    let slice = Iam::new(IamInner { service });

    tracing::info!("IAM feature initialized");

    Ok(InitializedSlice::new(slice))
}
