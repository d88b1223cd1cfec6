//! Type-erased registry primitives for feature slices.
//!
//! Each feature crate (catalog, iam, audit) boots into one slice value;
//! the server stores them keyed by concrete type so handlers can recover
//! their own slice without the kernel depending on feature crates.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Contract for a bootable feature's shared state.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Escape hatch for downcasting out of the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// One booted feature, tagged with the [`TypeId`] it is recovered by.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }
}
