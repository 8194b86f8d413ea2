//! Credential verification against stored user records.

use std::sync::Arc;

use crate::domain::{Credentials, Identity, Password};
use crate::errors::{AuthError, AuthenticationError};
use crate::infra::UserRepository;

use super::hashing::HashingPool;

/// Checks a username/password pair. Read-only: one lookup, no writes.
pub struct CredentialVerifier {
    users: Arc<dyn UserRepository>,
    hasher: HashingPool,
}

impl CredentialVerifier {
    pub fn new(users: Arc<dyn UserRepository>, hasher: HashingPool) -> Self {
        Self { users, hasher }
    }

    /// Resolve the credentials to an identity.
    ///
    /// # Errors
    /// `UnknownUser` when no record has that username, `InvalidCredentials`
    /// when the password does not match, `Store` when the lookup fails.
    pub async fn verify(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        let user = self.users.find_by_username(&credentials.username).await?;

        // Unknown users still pay for one hash verification.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => Password::dummy(),
        };
        let matches = self
            .hasher
            .verify(stored, credentials.password.clone())
            .await;

        match user {
            Some(user) if matches => {
                tracing::debug!(user_id = %user.id, "Credentials verified");
                Ok(Identity::from(user))
            }
            Some(user) => {
                tracing::debug!(user_id = %user.id, "Password mismatch");
                Err(AuthenticationError::InvalidCredentials.into())
            }
            None => {
                tracing::debug!(username = %credentials.username, "Unknown username");
                Err(AuthenticationError::UnknownUser.into())
            }
        }
    }
}
