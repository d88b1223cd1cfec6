use super::health;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Kernel-owned routes every deployment carries (currently only `/health`);
/// feature routers are merged on top by the server.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
