//! Signed bearer token issue and validation (HS256).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::Identity;
use crate::errors::{AppError, AppResult, AuthError, TokenError};
use crate::infra::UserRepository;

/// Token claims. `sub` is the user id, times are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates bearer tokens with a single process-wide secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    users: Arc<dyn UserRepository>,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration, users: Arc<dyn UserRepository>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `decode_at` against the caller's clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            users,
        }
    }

    pub fn from_config(config: &Config, users: Arc<dyn UserRepository>) -> Self {
        Self::new(config.jwt_secret_bytes(), config.token_ttl(), users)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `identity`, valid for the configured TTL from now.
    pub fn issue(&self, identity: &Identity) -> AppResult<IssuedToken> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("Token expiry out of range"))?;
        let claims = Claims {
            sub: identity.id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Token signing failed: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature, structure and expiry. No store access.
    ///
    /// A token is still valid at exactly `exp`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if now.timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Resolve a token to the identity of its subject.
    pub async fn validate(&self, token: &str) -> Result<Identity, AuthError> {
        self.validate_at(token, Utc::now()).await
    }

    /// # Errors
    /// `Malformed`, `BadSignature` or `Expired` from decoding,
    /// `UnknownSubject` when the user no longer exists, `Store` on lookup failure.
    pub async fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, AuthError> {
        let claims = self.decode_at(token, now)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(TokenError::UnknownSubject)?;

        Ok(Identity::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infra::MockUserRepository;
    use mockall::predicate::eq;

    const SECRET: &[u8] = b"test-secret-key-that-is-at-least-32-chars";

    fn alice() -> User {
        User::new(
            Uuid::new_v4(),
            "alice".to_string(),
            "a@x.com".to_string(),
            "$argon2id$stub".to_string(),
        )
    }

    fn service(repo: MockUserRepository) -> TokenService {
        TokenService::new(SECRET, Duration::hours(168), Arc::new(repo))
    }

    fn tamper_signature(token: &str) -> String {
        let (head, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        format!("{}.{}{}", head, replacement, &signature[1..])
    }

    #[tokio::test]
    async fn test_issue_then_validate_round_trip() {
        let user = alice();
        let identity = user.identity();
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let tokens = service(repo);
        let now = Utc::now();
        let issued = tokens.issue_at(&identity, now).unwrap();

        assert_eq!(issued.expires_at, now + Duration::hours(168));
        let resolved = tokens.validate_at(&issued.token, now).await.unwrap();
        assert_eq!(resolved, identity);
    }

    #[test]
    fn test_expiry_boundary() {
        let tokens = service(MockUserRepository::new());
        let identity = alice().identity();
        let now = Utc::now();
        let issued = tokens.issue_at(&identity, now).unwrap();

        let ttl = Duration::hours(168);
        assert!(tokens.decode_at(&issued.token, now + ttl).is_ok());
        assert_eq!(
            tokens
                .decode_at(&issued.token, now + ttl + Duration::seconds(1))
                .unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let tokens = TokenService::new(
            SECRET,
            Duration::days(100_000_000),
            Arc::new(MockUserRepository::new()),
        );

        let result = tokens.issue_at(&alice().identity(), Utc::now());
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let tokens = service(MockUserRepository::new());
        let issued = tokens.issue(&alice().identity()).unwrap();

        let result = tokens.decode_at(&tamper_signature(&issued.token), Utc::now());
        assert_eq!(result.unwrap_err(), TokenError::BadSignature);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = TokenService::new(
            b"another-secret-key-that-is-32-chars-long",
            Duration::hours(1),
            Arc::new(MockUserRepository::new()),
        );
        let issued = other.issue(&alice().identity()).unwrap();

        let tokens = service(MockUserRepository::new());
        assert_eq!(
            tokens.decode_at(&issued.token, Utc::now()).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = service(MockUserRepository::new());
        for garbage in ["", "not-a-token", "a.b", "a.b.c"] {
            assert_eq!(
                tokens.decode_at(garbage, Utc::now()).unwrap_err(),
                TokenError::Malformed,
                "input: {:?}",
                garbage
            );
        }
    }

    #[tokio::test]
    async fn test_deleted_subject_is_unknown() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let tokens = service(repo);
        let issued = tokens.issue(&alice().identity()).unwrap();

        let result = tokens.validate(&issued.token).await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::Token(TokenError::UnknownSubject)
        );
    }

    #[tokio::test]
    async fn test_expired_token_skips_store_lookup() {
        // No expectations: any store call would panic.
        let tokens = service(MockUserRepository::new());
        let now = Utc::now();
        let issued = tokens.issue_at(&alice().identity(), now).unwrap();

        let later = now + Duration::hours(169);
        let result = tokens.validate_at(&issued.token, later).await;
        assert_eq!(result.unwrap_err(), AuthError::Token(TokenError::Expired));
    }
}
