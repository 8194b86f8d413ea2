//! Service container - wires repositories, the hashing pool and services.
//!
//! SOLID (DIP): Handlers see service traits, never concrete types.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::credentials::CredentialVerifier;
use super::hashing::HashingPool;
use super::tokens::TokenService;
use super::{AuthService, Authenticator, UserManager, UserService};
use crate::config::Config;
use crate::infra::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a container from already built services
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Build every service on top of one user repository.
    ///
    /// Login verification and account writes share a single hashing pool.
    pub fn from_repository(repo: Arc<dyn UserRepository>, config: &Config) -> Self {
        let hasher = HashingPool::new(config.hash_workers);

        let verifier = Arc::new(CredentialVerifier::new(repo.clone(), hasher.clone()));
        let tokens = Arc::new(TokenService::from_config(config, repo.clone()));

        Self {
            auth_service: Arc::new(Authenticator::new(verifier, tokens)),
            user_service: Arc::new(UserManager::new(repo, hasher)),
        }
    }

    /// Build services backed by the SeaORM user store
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        Self::from_repository(Arc::new(UserStore::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
