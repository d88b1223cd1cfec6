//! HTTP surface of the catalog slice.

mod admin;
mod public;

use machex_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Public routes: legacy deep-link redirection.
pub fn public_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(public::legacy_item_redirect))
}

/// Operator-facing CRUD routes.
pub fn admin_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(admin::list_items, admin::create_item))
        .routes(routes!(admin::get_item, admin::update_item, admin::delete_item))
}
