//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserRepository};
use crate::services::{AuthService, ServiceContainer, Services, UserService};

/// Application state shared by every handler and the auth guard.
#[derive(Clone)]
pub struct AppState {
    /// Authentication context (strategies and token service)
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Create application state with manually injected services.
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Take services from any container.
    pub fn from_container(container: &dyn ServiceContainer) -> Self {
        Self::new(container.auth(), container.users())
    }

    /// Build state on top of an arbitrary user repository.
    pub fn from_repository(repo: Arc<dyn UserRepository>, config: &Config) -> Self {
        Self::from_container(&Services::from_repository(repo, config))
    }

    /// Build state backed by the database user store.
    pub fn from_config(database: &Database, config: &Config) -> Self {
        Self::from_container(&Services::from_connection(
            database.get_connection(),
            config,
        ))
    }
}
