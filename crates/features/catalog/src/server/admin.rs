use crate::error::CatalogError;
use crate::model::{Item, NewItem, UpdateItem};
use crate::{Catalog, publish_mutation};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use machex_derive::{api_handler, api_model};
use machex_iam::server::CurrentOperator;
use machex_kernel::domain::catalog::MutationKind;
use machex_kernel::domain::constants::CATALOG_TAG;
use machex_kernel::server::ApiState;
use machex_kernel::server::reply::{error_response, internal_error};

#[api_model]
/// Catalog entry as returned by the admin API
pub(super) struct ItemResponse {
    /// Record key
    id: String,
    /// Human-readable name
    display_name: String,
    /// URL-safe slug, unique across the catalog
    slug: String,
    /// Category slug, empty for uncategorized entries
    category_slug: Option<String>,
    /// Optional description
    description: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            display_name: item.display_name,
            slug: item.slug,
            category_slug: item.category_slug,
            description: item.description,
        }
    }
}

#[api_model]
/// Payload for creating a catalog entry
pub(super) struct CreateItemRequest {
    /// Human-readable name (required, non-empty)
    display_name: String,
    /// Free-form category name, normalized into a slug
    category: Option<String>,
    /// Optional description
    description: Option<String>,
    /// Explicit slug source; still normalized before storage
    slug_override: Option<String>,
}

#[api_model]
/// Payload for partially updating a catalog entry
pub(super) struct UpdateItemRequest {
    /// New display name
    display_name: Option<String>,
    /// New category, normalized into a slug
    category: Option<String>,
    /// New description
    description: Option<String>,
    /// Explicit slug source; still normalized before storage
    slug_override: Option<String>,
}

#[api_handler(
    get,
    path = "/items",
    responses((status = OK, description = "All catalog entries", body = [ItemResponse])),
    tag = CATALOG_TAG,
)]
pub(super) async fn list_items(
    State(state): State<ApiState>,
    _operator: CurrentOperator,
) -> Response {
    let catalog = match state.try_get_slice::<Catalog>() {
        Ok(catalog) => catalog,
        Err(err) => return internal_error(err),
    };

    match catalog.repository.list().await {
        Ok(items) => {
            Json(items.into_iter().map(ItemResponse::from).collect::<Vec<_>>()).into_response()
        },
        Err(err) => catalog_error_response(err),
    }
}

#[api_handler(
    post,
    path = "/items",
    request_body = CreateItemRequest,
    responses(
        (status = CREATED, description = "Entry created", body = ItemResponse),
        (status = CONFLICT, description = "Slug already taken"),
    ),
    tag = CATALOG_TAG,
)]
pub(super) async fn create_item(
    State(state): State<ApiState>,
    operator: CurrentOperator,
    Json(payload): Json<CreateItemRequest>,
) -> Response {
    if !operator.0.roles.can_edit() {
        return error_response(StatusCode::FORBIDDEN, "Editor role required");
    }
    let catalog = match state.try_get_slice::<Catalog>() {
        Ok(catalog) => catalog,
        Err(err) => return internal_error(err),
    };

    let new = NewItem {
        display_name: payload.display_name,
        category: payload.category,
        description: payload.description,
        slug_override: payload.slug_override,
    };

    match catalog.repository.create(new).await {
        Ok(item) => {
            publish_mutation(&state.events, MutationKind::Created, &item, &operator.0.login);
            (StatusCode::CREATED, Json(ItemResponse::from(item))).into_response()
        },
        Err(err) => catalog_error_response(err),
    }
}

#[api_handler(
    get,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Record key")),
    responses(
        (status = OK, description = "Catalog entry", body = ItemResponse),
        (status = NOT_FOUND, description = "Unknown entry"),
    ),
    tag = CATALOG_TAG,
)]
pub(super) async fn get_item(
    State(state): State<ApiState>,
    _operator: CurrentOperator,
    Path(id): Path<String>,
) -> Response {
    let catalog = match state.try_get_slice::<Catalog>() {
        Ok(catalog) => catalog,
        Err(err) => return internal_error(err),
    };

    match catalog.repository.get(&id).await {
        Ok(item) => Json(ItemResponse::from(item)).into_response(),
        Err(err) => catalog_error_response(err),
    }
}

#[api_handler(
    put,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Record key")),
    request_body = UpdateItemRequest,
    responses(
        (status = OK, description = "Entry updated", body = ItemResponse),
        (status = NOT_FOUND, description = "Unknown entry"),
        (status = CONFLICT, description = "Slug already taken"),
    ),
    tag = CATALOG_TAG,
)]
pub(super) async fn update_item(
    State(state): State<ApiState>,
    operator: CurrentOperator,
    Path(id): Path<String>,
    Json(payload): Json<UpdateItemRequest>,
) -> Response {
    if !operator.0.roles.can_edit() {
        return error_response(StatusCode::FORBIDDEN, "Editor role required");
    }
    let catalog = match state.try_get_slice::<Catalog>() {
        Ok(catalog) => catalog,
        Err(err) => return internal_error(err),
    };

    let update = UpdateItem {
        display_name: payload.display_name,
        category: payload.category,
        description: payload.description,
        slug_override: payload.slug_override,
    };

    match catalog.repository.update(&id, update).await {
        Ok(item) => {
            publish_mutation(&state.events, MutationKind::Updated, &item, &operator.0.login);
            Json(ItemResponse::from(item)).into_response()
        },
        Err(err) => catalog_error_response(err),
    }
}

#[api_handler(
    delete,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Record key")),
    responses(
        (status = NO_CONTENT, description = "Entry deleted"),
        (status = NOT_FOUND, description = "Unknown entry"),
    ),
    tag = CATALOG_TAG,
)]
pub(super) async fn delete_item(
    State(state): State<ApiState>,
    operator: CurrentOperator,
    Path(id): Path<String>,
) -> Response {
    if !operator.0.roles.can_edit() {
        return error_response(StatusCode::FORBIDDEN, "Editor role required");
    }
    let catalog = match state.try_get_slice::<Catalog>() {
        Ok(catalog) => catalog,
        Err(err) => return internal_error(err),
    };

    match catalog.repository.delete(&id).await {
        Ok(item) => {
            publish_mutation(&state.events, MutationKind::Deleted, &item, &operator.0.login);
            StatusCode::NO_CONTENT.into_response()
        },
        Err(err) => catalog_error_response(err),
    }
}

fn catalog_error_response(err: CatalogError) -> Response {
    match &err {
        CatalogError::Validation { message, .. } => {
            error_response(StatusCode::BAD_REQUEST, message.clone())
        },
        CatalogError::Conflict { message, .. } => {
            error_response(StatusCode::CONFLICT, message.clone())
        },
        CatalogError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, "Entry not found"),
        CatalogError::Surreal { .. } | CatalogError::Internal { .. } => internal_error(err),
    }
}
