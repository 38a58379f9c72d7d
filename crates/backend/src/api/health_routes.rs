use axum::{Json, Router, extract::State, routing};
use serde::Serialize;

use crate::common::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Serialize)]
struct Count {
    length: usize,
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", routing::get(health))
        .route("/count", routing::get(count))
}

async fn health() -> Json<Health> {
    Json(Health { status: "OK" })
}

async fn count(State(state): State<AppState>) -> Json<Count> {
    Json(Count {
        length: state.repo.count_pictures().await,
    })
}
