use crate::Catalog;
use crate::resolver::resolve_canonical_path;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use machex_derive::api_handler;
use machex_kernel::domain::constants::CATALOG_TAG;
use machex_kernel::domain::locale::Locale;
use machex_kernel::server::ApiState;
use machex_kernel::server::reply::internal_error;
use tracing::debug;

#[api_handler(
    get,
    path = "/{lang}/item/{identifier}",
    params(
        ("lang" = String, Path, description = "Two-letter language code"),
        ("identifier" = String, Path, description = "Legacy item identifier"),
    ),
    responses((status = 307, description = "Redirect to the canonical catalog path")),
    tag = CATALOG_TAG,
)]
pub(super) async fn legacy_item_redirect(
    State(state): State<ApiState>,
    Path((lang, identifier)): Path<(String, String)>,
) -> Response {
    // A junk language code still deserves a working redirect.
    let lang = lang.parse::<Locale>().unwrap_or_else(|err| {
        debug!(%err, "Falling back to the default language");
        Locale::EN
    });

    let catalog = match state.try_get_slice::<Catalog>() {
        Ok(catalog) => catalog,
        Err(err) => return internal_error(err),
    };

    match resolve_canonical_path(&catalog.repository, lang, &identifier).await {
        Ok(path) => Redirect::temporary(&path).into_response(),
        Err(err) => internal_error(err),
    }
}
