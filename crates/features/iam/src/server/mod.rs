//! HTTP surface of the IAM slice: login, logout, and the request extractor.

use crate::error::IamError;
use crate::model::OperatorProfile;
use crate::Iam;
use axum::Json;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use machex_derive::{api_handler, api_model};
use machex_kernel::domain::constants::IAM_TAG;
use machex_kernel::server::ApiState;
use machex_kernel::server::reply::{error_response, internal_error};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn iam_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(login_handler)).routes(routes!(logout_handler))
}

/// Authenticated operator attached to a request via `Authorization: Bearer`.
#[derive(Debug, Clone)]
pub struct CurrentOperator(pub OperatorProfile);

impl FromRequestParts<ApiState> for CurrentOperator {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| error_response(StatusCode::UNAUTHORIZED, "Missing bearer token"))?;

        let iam = state.try_get_slice::<Iam>().map_err(internal_error)?;

        match iam.service.authenticate(&token).await {
            Ok(profile) => Ok(Self(profile)),
            Err(IamError::Unauthorized { .. }) => {
                Err(error_response(StatusCode::UNAUTHORIZED, "Invalid or expired session"))
            },
            Err(err) => Err(internal_error(err)),
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

#[api_model]
/// Login payload
struct LoginRequest {
    /// Operator login
    login: String,
    /// Operator password
    password: String,
}

#[api_model]
/// Successful login response
struct LoginResponse {
    /// Opaque bearer token for subsequent requests
    token: String,
    /// Operator login
    login: String,
    /// Role set bits
    roles: u32,
}

#[api_handler(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = OK, description = "Session issued", body = LoginResponse),
        (status = UNAUTHORIZED, description = "Invalid credentials"),
    ),
    tag = IAM_TAG,
)]
async fn login_handler(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let iam = match state.try_get_slice::<Iam>() {
        Ok(iam) => iam,
        Err(err) => return internal_error(err),
    };

    match iam.service.login(&payload.login, &payload.password).await {
        Ok((token, profile)) => Json(LoginResponse {
            token,
            login: profile.login,
            roles: profile.roles.bits(),
        })
        .into_response(),
        Err(IamError::Unauthorized { .. }) => {
            error_response(StatusCode::UNAUTHORIZED, "Invalid credentials")
        },
        Err(err) => internal_error(err),
    }
}

#[api_handler(
    post,
    path = "/logout",
    responses(
        (status = NO_CONTENT, description = "Session revoked"),
        (status = UNAUTHORIZED, description = "Missing bearer token"),
    ),
    tag = IAM_TAG,
)]
async fn logout_handler(State(state): State<ApiState>, headers: axum::http::HeaderMap) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let Some(token) = token else {
        return error_response(StatusCode::UNAUTHORIZED, "Missing bearer token");
    };

    let iam = match state.try_get_slice::<Iam>() {
        Ok(iam) => iam,
        Err(err) => return internal_error(err),
    };

    match iam.service.logout(token).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => internal_error(err),
    }
}
