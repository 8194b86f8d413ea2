//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default token validity window in hours (7 days)
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 168;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Token type and Authorization scheme
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Default number of concurrent password hashing jobs
pub const DEFAULT_HASH_WORKERS: usize = 4;

/// Message returned for every authentication or token failure
pub const AUTH_FAILURE_MESSAGE: &str = "Authentication failed";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;
