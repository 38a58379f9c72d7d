use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing,
};

use crate::{
    common::{ApiError, AppState, PictureBody, PictureId},
    db::{InsertOutcome, Picture},
};

pub fn picture_routes() -> Router<AppState> {
    Router::new()
        .route("/picture", routing::get(list_pictures))
        .route(
            "/picture/{id}",
            routing::get(get_picture)
                .post(create_picture)
                .put(update_picture)
                .delete(delete_picture),
        )
}

async fn list_pictures(State(state): State<AppState>) -> Json<Vec<Picture>> {
    Json(state.repo.list_pictures().await)
}

async fn get_picture(
    PictureId(id): PictureId,
    State(state): State<AppState>,
) -> Result<Json<Picture>, ApiError> {
    state
        .repo
        .get_picture(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_picture(
    PictureId(id): PictureId,
    State(state): State<AppState>,
    PictureBody(fields): PictureBody,
) -> Result<impl IntoResponse, ApiError> {
    if fields.is_empty() {
        return Err(ApiError::BadRequest("request body is empty".to_owned()));
    }

    match state.repo.add_picture(id, fields).await? {
        InsertOutcome::Created(picture) => Ok((StatusCode::CREATED, Json(picture))),
        InsertOutcome::AlreadyPresent => {
            tracing::warn!(id, "picture already present");
            Err(ApiError::AlreadyPresent(id))
        }
    }
}

async fn update_picture(
    PictureId(id): PictureId,
    State(state): State<AppState>,
    body: Result<PictureBody, ApiError>,
) -> Result<Json<Picture>, ApiError> {
    // an unknown id wins over a bad body
    if state.repo.get_picture(id).await.is_none() {
        return Err(ApiError::NotFound);
    }
    let PictureBody(fields) = body?;

    state
        .repo
        .update_picture(id, fields)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_picture(
    PictureId(id): PictureId,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if state.repo.delete_picture(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
