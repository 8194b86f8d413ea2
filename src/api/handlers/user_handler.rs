//! User handlers.
//!
//! Protected routes act on the caller's own record (`/users/me`), so no
//! per-record authorization is needed beyond authentication.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateUser, Identity, UpdateUser};
use crate::errors::AppResult;
use crate::types::NoContent;

/// Account creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(alias = "Username")]
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[serde(alias = "Password")]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "Secret123", min_length = 8)]
    pub password: String,
    #[serde(alias = "Email")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "a@x.com")]
    pub email: String,
    #[serde(alias = "Birthday")]
    #[schema(example = "1990-01-31")]
    pub birthday: Option<NaiveDate>,
}

/// Profile update request; absent fields are left untouched.
///
/// Unknown fields (including `password`) are rejected; passwords change
/// through `PUT /users/me/password`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(alias = "Username")]
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: Option<String>,
    #[serde(alias = "Email")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(alias = "Birthday")]
    pub birthday: Option<NaiveDate>,
}

/// Password change request
#[derive(Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

// Never print passwords
impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest([REDACTED])")
    }
}

/// Public account creation route
pub fn registration_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user))
}

/// Routes that require a bearer token
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(get_current_user)
                .patch(update_current_user)
                .delete(delete_current_user),
        )
        .route("/me/password", put(change_password))
        .route("/:username", get(get_user_by_username))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = Identity),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<Identity>)> {
    let user = state
        .user_service
        .create_user(CreateUser {
            username: payload.username,
            password: payload.password,
            email: payload.email,
            birthday: payload.birthday,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Identity::from(user))))
}

/// Get current authenticated user
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = Identity),
        (status = 401, description = "Authentication failed")
    )
)]
pub async fn get_current_user(
    Extension(CurrentUser(identity)): Extension<CurrentUser>,
) -> Json<Identity> {
    Json(identity)
}

/// Update the current user's profile
#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = Identity),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication failed"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn update_current_user(
    Extension(CurrentUser(identity)): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<Identity>> {
    let user = state
        .user_service
        .update_user(
            identity.id,
            UpdateUser {
                username: payload.username,
                email: payload.email,
                birthday: payload.birthday,
            },
        )
        .await?;

    Ok(Json(Identity::from(user)))
}

/// Change the current user's password
#[utoipa::path(
    put,
    path = "/users/me/password",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication failed"),
        (status = 409, description = "Password was modified concurrently")
    )
)]
pub async fn change_password(
    Extension(CurrentUser(identity)): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<NoContent> {
    state
        .user_service
        .change_password(identity.id, payload.current_password, payload.new_password)
        .await?;

    Ok(NoContent)
}

/// Delete the current user's account
///
/// Tokens already issued for the account stop validating.
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Authentication failed")
    )
)]
pub async fn delete_current_user(
    Extension(CurrentUser(identity)): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(identity.id).await?;
    Ok(NoContent)
}

/// Look up a user's public profile
#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User profile", body = Identity),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Identity>> {
    let user = state.user_service.get_user_by_username(&username).await?;
    Ok(Json(Identity::from(user)))
}
