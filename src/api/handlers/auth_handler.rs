//! Login handler.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::LoginForm;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Log in with username and password.
///
/// Accepts a JSON or urlencoded body. Field names `Username`/`Password`
/// are accepted as aliases.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body(
        content = crate::domain::Credentials,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Unreadable body"),
        (status = 401, description = "Authentication failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    LoginForm(credentials): LoginForm,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.login(credentials).await?;
    Ok(Json(token))
}
