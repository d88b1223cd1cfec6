//! Machinery catalog feature slice.
//!
//! Owns catalog entries, their URL-safe slugs, and the resolution of legacy
//! deep links onto the canonical catalog tree.

mod error;
pub mod model;
pub mod repository;
pub mod resolver;
#[cfg(feature = "server")]
pub mod server;

pub use crate::error::{CatalogError, CatalogErrorExt};
use crate::model::Item;
use crate::repository::CatalogRepository;
use machex_database::Database;
use machex_event_bus::EventBus;
use machex_kernel::domain::catalog::{ItemMutation, MutationKind};
use machex_kernel::domain::config::CatalogConfig;
use machex_kernel::domain::registry::InitializedSlice;

/// Feature inner state
#[machex_derive::machex_slice]
pub struct Catalog {
    pub repository: CatalogRepository,
}

/// Initialize the feature
///
/// # Errors
/// Currently infallible; kept fallible for parity with other slices.
pub fn init(config: &CatalogConfig, db: Database) -> Result<InitializedSlice, CatalogError> {
    let repository = CatalogRepository::new(db, config.slug_separator);
    let slice = Catalog::new(CatalogInner { repository });

    tracing::info!("Catalog feature initialized");

    Ok(InitializedSlice::new(slice))
}

/// Fans a successful mutation out to interested slices (audit, caches).
pub fn publish_mutation(events: &EventBus, kind: MutationKind, item: &Item, actor: &str) {
    let payload = ItemMutation {
        kind,
        item_id: item.id.clone(),
        slug: Some(item.slug.clone()),
        actor: Some(actor.to_owned()),
    };

    if let Err(err) = events.publish(payload) {
        tracing::warn!(%err, "Dropping catalog mutation event");
    }
}
