//! Shared application state for the HTTP surface.
//!
//! [`ApiState`] bundles the loaded configuration, the database handle, the
//! event bus, and every initialized feature slice (catalog, iam, audit)
//! behind one cheaply-cloneable handle that axum threads through handlers.
//! Slices are stored type-erased and recovered by their concrete type, so
//! the kernel never names the feature crates.

use axum::extract::FromRef;
use fxhash::FxHashMap;
use machex_database::Database;
use machex_domain::config::ApiConfig;
use machex_domain::registry::{FeatureSlice, InitializedSlice};
use machex_event_bus::EventBus;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[machex_derive::machex_error]
pub enum ApiStateError {
    /// A required component was never handed to the builder.
    #[error("Incomplete state{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A handler asked for a feature slice that was not registered at boot.
    #[error("Feature slice not registered{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
    pub events: EventBus,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Handle over the immutable per-process state. Clones share one allocation.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    /// Looks up the slice registered under `T`, if any.
    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner
            .slices
            .get(&TypeId::of::<T>())
            .and_then(|initialized| initialized.state.as_any().downcast_ref::<T>())
    }

    /// Like [`get_slice`](Self::get_slice), but a missing slice is an error.
    /// Handlers use this so a misconfigured boot surfaces as a 500 instead
    /// of a silent no-op.
    ///
    /// # Errors
    /// Returns [`ApiStateError::MissingSlice`] when `T` was never registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

// FromRef impls let extractors take the narrow component they need
// instead of the whole state.

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Database {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.database.clone()
    }
}

impl FromRef<ApiState> for EventBus {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.events.clone()
    }
}

/// Collects the boot-time components; [`build`](Self::build) checks nothing
/// required is missing. Config and database are mandatory, the event bus
/// defaults to a fresh one and slices are optional.
#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
    events: Option<EventBus>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn db(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Registers one initialized slice. A second slice of the same concrete
    /// type replaces the first.
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// # Errors
    /// Returns [`ApiStateError::Validation`] when config or database was
    /// never supplied.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "configuration missing".into(),
            context: None,
        })?;
        let database = self.database.ok_or_else(|| ApiStateError::Validation {
            message: "database handle missing".into(),
            context: None,
        })?;
        let events = self.events.unwrap_or_default();

        Ok(ApiState {
            inner: Arc::new(ApiStateInner { config, database, events, slices: self.slices }),
        })
    }
}
