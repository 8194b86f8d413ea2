//! OpenAPI documentation configuration.
//!
//! Served through Swagger UI at `/documentation`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, movie_handler, user_handler};
use crate::domain::{Credentials, Identity, Movie};
use crate::services::TokenResponse;

/// OpenAPI documentation for the movie API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie API",
        version = "0.1.0",
        description = "Movie catalog with username/password login and bearer token access"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // User endpoints
        user_handler::create_user,
        user_handler::get_current_user,
        user_handler::update_current_user,
        user_handler::change_password,
        user_handler::delete_current_user,
        user_handler::get_user_by_username,
        // Movie endpoints
        movie_handler::list_movies,
        movie_handler::get_movie,
    ),
    components(
        schemas(
            Identity,
            Credentials,
            Movie,
            TokenResponse,
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::ChangePasswordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Users", description = "Account management"),
        (name = "Movies", description = "Movie catalog")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token obtained from /login"))
                        .build(),
                ),
            );
        }
    }
}
