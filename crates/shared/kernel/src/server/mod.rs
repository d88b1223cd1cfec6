//! Axum-facing building blocks shared by every HTTP slice.

mod health;
pub mod reply;
pub mod router;
pub mod state;

pub use state::{ApiState, ApiStateBuilder, ApiStateError};
