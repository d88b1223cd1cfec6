//! Convenience re-exports for feature slices.

#[cfg(not(target_arch = "wasm32"))]
pub use crate::config::{ConfigError, load_config};
pub use crate::security::resource::ResourceGuard;
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateBuilder};
pub use crate::slug::{DEFAULT_SEPARATOR, slugify, slugify_with};
pub use crate::{SAFE_ALPHABET, SAFE_KEY_LEN, safe_nanoid};
pub use machex_domain::config::ApiConfig;
pub use machex_domain::registry::{FeatureSlice, InitializedSlice};
