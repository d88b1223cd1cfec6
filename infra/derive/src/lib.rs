#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the Machex infrastructure: error enums with context
//! support, feature-slice handles, API DTO boilerplate, and the specialized
//! async runtime entry point.
//!
//! Examples in the docstrings are `ignore`d to avoid compiling against the
//! consuming crates from inside this proc-macro crate; copy them into the
//! consumer's tests as needed.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to bootstrap the specialized Tokio runtime.
///
/// Transforms an `async fn main` into a standard `fn main` that builds a
/// pre-configured Tokio runtime for the requested profile.
///
/// # Arguments
///
/// * `high_performance` - Optimized for high-throughput server environments.
/// * `memory_efficient` - Optimized for low-footprint environments.
/// * `default` - Worker threads auto-detected from available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[machex_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
/// # Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro to define a standard API data model.
///
/// Ensures consistency across the platform's DTOs by injecting common derives
/// and serde policy.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize`, and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the `server` feature is enabled.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields`
///   by default; both can be overridden through the macro arguments.
///
/// # Example
///
/// ```rust,ignore
/// use machex_derive::api_model;
///
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct ItemSummary {
///     pub id: String,
///     pub display_name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments (`get`, `post`, `path = "..."`,
/// `responses(...)`, `tag = "..."`) and applies them behind the consuming
/// crate's `server` feature, so handlers document themselves without a hard
/// utoipa dependency in other configurations.
///
/// # Example
///
/// ```rust,ignore
/// use machex_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/health",
///     responses((status = OK, body = HealthResponse)),
///     tag = "System"
/// )]
/// pub async fn health_handler() -> Result<(), ()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// A high-level attribute macro for defining domain-specific error enums.
///
/// Transforms a plain enum into a fully-featured error type integrated with
/// the Machex infrastructure.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait adding
///   `.context()` to any `Result` convertible into this error type.
/// * **Standard Conversions**: `From<T>` for variants with a `source` field,
///   enabling `?` on upstream errors.
/// * **Internal Fallback**: `From<&str>`/`From<String>` when an `Internal`
///   variant is present.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. Variants that support context carry `context: Option<Cow<'static, str>>`.
/// 3. Variants wrapping external errors carry a `source` field (or a field
///    marked `#[source]`/`#[from]`) plus a context field.
///
/// # Example
///
/// ```rust,ignore
/// use machex_derive::machex_error;
/// use std::borrow::Cow;
///
/// #[machex_error]
/// pub enum CatalogError {
///     #[error("SurrealDB error{}: {source}", format_context(.context))]
///     Surreal {
///         #[source]
///         source: surrealdb::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn machex_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a Vertical Slice handle.
///
/// Transforms a struct into the full slice pattern:
/// 1. Generates a thread-safe `Arc` wrapper around a `...Inner` state struct.
/// 2. Implements `Deref` for transparent access to the inner state.
/// 3. Implements `FeatureSlice` for registration in the kernel state.
///
/// # Example
/// ```rust,ignore
/// #[machex_derive::machex_slice]
/// pub struct Catalog {
///     pub repository: CatalogRepository,
/// }
///
/// fn init(repository: CatalogRepository) -> Catalog {
///     Catalog::new(CatalogInner { repository })
/// }
/// ```
#[proc_macro_attribute]
pub fn machex_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
