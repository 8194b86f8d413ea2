use axum::{http::StatusCode, response::IntoResponse};

/// Empty 204 response for writes that return nothing
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> axum::response::Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
