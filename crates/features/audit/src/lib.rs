//! Audit trail feature slice.
//!
//! Subscribes to catalog mutation events and persists one audit row per
//! mutation. Recording is asynchronous and best-effort: a failed write is
//! logged, never bounced back to the mutating request.

mod error;

pub use crate::error::{AuditError, AuditErrorExt};
use machex_database::Database;
use machex_event_bus::{EventBus, EventReceiverExt};
use machex_kernel::domain::catalog::ItemMutation;
use machex_kernel::domain::constants::AUDIT;
use machex_kernel::domain::registry::InitializedSlice;
use machex_kernel::safe_nanoid;
use tracing::{error, info};

/// Feature inner state
#[machex_derive::machex_slice]
pub struct Audit {}

/// Initialize the feature
///
/// Spawns the recorder task; it runs until the event bus shuts down.
///
/// # Errors
/// [`AuditError::Internal`] if the mutation channel cannot be opened.
pub fn init(db: Database, events: &EventBus) -> Result<InitializedSlice, AuditError> {
    let mut receiver = events.subscribe::<ItemMutation>().map_err(|e| AuditError::Internal {
        message: e.to_string().into(),
        context: Some("Subscribing to catalog mutations".into()),
    })?;

    tokio::spawn(async move {
        while let Some(mutation) = receiver.recv_event().await {
            if let Err(err) = record(&db, &mutation).await {
                error!(%err, item = %mutation.item_id, "Failed to record audit entry");
            }
        }
        info!("Audit recorder stopped");
    });

    let slice = Audit::new(AuditInner {});

    tracing::info!("Audit feature initialized");

    Ok(InitializedSlice::new(slice))
}

/// Writes a single audit row for a catalog mutation.
///
/// # Errors
/// Propagates datastore failures to the recorder loop.
pub async fn record(db: &Database, mutation: &ItemMutation) -> Result<(), AuditError> {
    db.query(
        "CREATE type::thing($table, $key) SET
            action = $action,
            item = $item,
            slug = $slug,
            actor = $actor",
    )
    .bind(("table", AUDIT))
    .bind(("key", safe_nanoid!()))
    .bind(("action", mutation.kind.as_str()))
    .bind(("item", mutation.item_id.clone()))
    .bind(("slug", mutation.slug.clone()))
    .bind(("actor", mutation.actor.clone()))
    .await
    .context("Creating audit entry")?
    .check()
    .map_err(surrealdb::Error::from)
    .context("Creating audit entry")?;

    Ok(())
}
