//! Application services layer - Use cases and business logic.
//!
//! The authentication core lives here: credential verification, token
//! issue/validation and the two strategies that sit on top of them.
//! Everything depends on the `UserRepository` trait, not on SeaORM.

mod auth_service;
pub mod container;
mod credentials;
mod hashing;
mod strategy;
mod tokens;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Authentication core
pub use credentials::CredentialVerifier;
pub use hashing::HashingPool;
pub use strategy::{AuthStrategy, BearerToken, BearerTokenStrategy, LocalCredentialStrategy};
pub use tokens::{Claims, IssuedToken, TokenService};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, TokenResponse};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
