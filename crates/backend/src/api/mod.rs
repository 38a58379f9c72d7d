mod health_routes;
mod picture_routes;

use axum::{Router, middleware};
use tower_http::limit::RequestBodyLimitLayer;

use crate::common::{AppState, metrics};

pub use health_routes::health_routes;
pub use picture_routes::picture_routes;

pub const MAX_BODY_BYTES: usize = 1024 * 1024; /* 1MiB */

/// Every API route with request metrics and the body size cap applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(picture_routes())
        .with_state(state)
        .route_layer(middleware::from_fn(metrics::track_http))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}
