//! Authentication service - login and bearer resolution.
//!
//! `Authenticator` is the explicit authentication context: it owns both
//! strategies and the token service, and handlers reach it through
//! `AppState` rather than any global registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::{Credentials, Identity};
use crate::errors::{AppResult, AuthError};

use super::credentials::CredentialVerifier;
use super::strategy::{AuthStrategy, BearerToken, BearerTokenStrategy, LocalCredentialStrategy};
use super::tokens::TokenService;

/// Token response returned after a successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 604800)]
    pub expires_in: i64,
    /// Absolute expiry time
    pub expires_at: DateTime<Utc>,
    /// The authenticated user
    pub user: Identity,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and issue a token
    async fn login(&self, credentials: Credentials) -> AppResult<TokenResponse>;

    /// Resolve a bearer token to the identity of its subject
    async fn authenticate_bearer(&self, token: BearerToken) -> Result<Identity, AuthError>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    local: LocalCredentialStrategy,
    bearer: BearerTokenStrategy,
    tokens: Arc<TokenService>,
}

impl Authenticator {
    pub fn new(verifier: Arc<CredentialVerifier>, tokens: Arc<TokenService>) -> Self {
        Self {
            local: LocalCredentialStrategy::new(verifier),
            bearer: BearerTokenStrategy::new(tokens.clone()),
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, credentials: Credentials) -> AppResult<TokenResponse> {
        let username = credentials.username.clone();

        let identity = match self.local.authenticate(credentials).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(
                    strategy = self.local.name(),
                    username = %username,
                    reason = %e,
                    "Login rejected"
                );
                return Err(e.into());
            }
        };

        let issued = self.tokens.issue(&identity)?;
        tracing::info!(user_id = %identity.id, "Login succeeded");

        Ok(TokenResponse {
            access_token: issued.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.tokens.ttl().num_seconds(),
            expires_at: issued.expires_at,
            user: identity,
        })
    }

    async fn authenticate_bearer(&self, token: BearerToken) -> Result<Identity, AuthError> {
        self.bearer.authenticate(token).await.map_err(|e| {
            tracing::debug!(strategy = self.bearer.name(), reason = %e, "Bearer token rejected");
            e
        })
    }
}
