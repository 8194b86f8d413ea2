//! Movie catalog handlers.

use axum::{extract::Path, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::{Catalog, Movie};
use crate::errors::{AppResult, OptionExt};

/// Catalog routes (mounted behind the auth guard)
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies))
        .route("/:title", get(get_movie))
}

/// List the movie catalog
#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All movies", body = Vec<Movie>),
        (status = 401, description = "Authentication failed")
    )
)]
pub async fn list_movies() -> Json<Vec<Movie>> {
    Json(Catalog::all().to_vec())
}

/// Get one movie by title (case-insensitive)
#[utoipa::path(
    get,
    path = "/movies/{title}",
    tag = "Movies",
    security(("bearer_auth" = [])),
    params(
        ("title" = String, Path, description = "Movie title")
    ),
    responses(
        (status = 200, description = "Movie", body = Movie),
        (status = 401, description = "Authentication failed"),
        (status = 404, description = "Movie not found")
    )
)]
pub async fn get_movie(Path(title): Path<String>) -> AppResult<Json<Movie>> {
    let movie = Catalog::find_by_title(&title).cloned().ok_or_not_found()?;
    Ok(Json(movie))
}
