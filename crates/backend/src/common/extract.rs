use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
};
use serde_json::{Map, Value};

use super::error::ApiError;

/// Non-negative integer id taken from the path.
///
/// Only plain decimal digits are accepted. Anything else cannot name a
/// picture, so it is a 404 rather than axum's default 400.
#[derive(Debug, Clone, Copy)]
pub struct PictureId(pub i64);

impl<S> FromRequestParts<S> for PictureId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("unroutable picture id: {rejection}");
                ApiError::NotFound
            })?;

        parse_id(&raw).map(PictureId).ok_or_else(|| {
            tracing::debug!("unroutable picture id: {raw:?}");
            ApiError::NotFound
        })
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// JSON object request body. Missing, malformed, or non-object bodies are a 400;
/// bodies over the size limit keep their 413.
#[derive(Debug, Clone)]
pub struct PictureBody(pub Map<String, Value>);

impl<S> FromRequest<S> for PictureBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ApiError::PayloadTooLarge
                } else {
                    ApiError::BadRequest(rejection.body_text())
                }
            })?;

        match value {
            Value::Object(fields) => Ok(PictureBody(fields)),
            _ => Err(ApiError::BadRequest(
                "request body must be a JSON object".to_owned(),
            )),
        }
    }
}
