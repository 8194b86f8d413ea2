//! Login body extractor accepting JSON or urlencoded forms.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};

use crate::domain::Credentials;
use crate::errors::AppError;

/// Credentials read from either an `application/json` or an
/// `application/x-www-form-urlencoded` body.
pub struct LoginForm(pub Credentials);

fn is_urlencoded(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let credentials = if is_urlencoded(&req) {
            let Form(credentials) = Form::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            credentials
        } else {
            let Json(credentials) = Json::<Credentials>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            credentials
        };

        Ok(LoginForm(credentials))
    }
}
