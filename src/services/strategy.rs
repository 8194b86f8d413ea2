//! Authentication strategies.
//!
//! Each strategy turns one kind of request material into an [`Identity`]
//! or a uniform [`AuthError`]. Routes pick a strategy; the guard runs it.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::config::TOKEN_TYPE_BEARER;
use crate::domain::{Credentials, Identity};
use crate::errors::{AuthError, TokenError};

use super::credentials::CredentialVerifier;
use super::tokens::TokenService;

#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Material this strategy reads from the request.
    type Request: Send + 'static;

    /// Strategy name, used in logs.
    fn name(&self) -> &'static str;

    async fn authenticate(&self, request: Self::Request) -> Result<Identity, AuthError>;
}

/// Username/password strategy used by the login endpoint.
pub struct LocalCredentialStrategy {
    verifier: Arc<CredentialVerifier>,
}

impl LocalCredentialStrategy {
    pub fn new(verifier: Arc<CredentialVerifier>) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl AuthStrategy for LocalCredentialStrategy {
    type Request = Credentials;

    fn name(&self) -> &'static str {
        "local"
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<Identity, AuthError> {
        self.verifier.verify(&credentials).await
    }
}

/// Raw token taken from an `Authorization: Bearer <token>` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Extract the token from request headers.
    ///
    /// The scheme is matched case-insensitively.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, TokenError> {
        let value = headers.get(AUTHORIZATION).ok_or(TokenError::Missing)?;
        let value = value.to_str().map_err(|_| TokenError::Malformed)?;

        let (scheme, token) = value.trim().split_once(' ').ok_or(TokenError::Malformed)?;
        if !scheme.eq_ignore_ascii_case(TOKEN_TYPE_BEARER) {
            return Err(TokenError::Malformed);
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Malformed);
        }

        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// Bearer token strategy used by protected routes.
pub struct BearerTokenStrategy {
    tokens: Arc<TokenService>,
}

impl BearerTokenStrategy {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthStrategy for BearerTokenStrategy {
    type Request = BearerToken;

    fn name(&self) -> &'static str {
        "bearer"
    }

    async fn authenticate(&self, token: BearerToken) -> Result<Identity, AuthError> {
        self.tokens.validate(token.as_str()).await
    }
}
