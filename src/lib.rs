//! Movie API - movie catalog behind username/password and bearer token auth
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, identities, passwords and the movie catalog
//! - **services**: Credential verification, tokens, strategies, user lifecycle
//! - **infra**: Database, migrations and the user record store
//! - **api**: HTTP handlers, the auth guard, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Credentials, Identity, Password, User};
pub use errors::{AppError, AppResult, AuthError};
