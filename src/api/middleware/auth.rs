//! Bearer authentication guard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::domain::Identity;
use crate::errors::AppError;
use crate::services::BearerToken;

/// Identity resolved by the guard, available to protected handlers.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Identity);

/// Bearer authentication middleware.
///
/// Runs the bearer strategy and injects `CurrentUser` into the request
/// extensions. Any failure short-circuits with 401 before the handler.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = BearerToken::from_headers(request.headers()).map_err(|e| {
        tracing::debug!(reason = %e, path = %request.uri().path(), "Bearer token rejected");
        AppError::from(e)
    })?;

    let identity = state.auth_service.authenticate_bearer(token).await?;

    request.extensions_mut().insert(CurrentUser(identity));

    Ok(next.run(request).await)
}
