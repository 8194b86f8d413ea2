//! HTTP request handlers.

pub mod auth_handler;
pub mod movie_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use movie_handler::movie_routes;
pub use user_handler::{registration_routes, user_routes};
