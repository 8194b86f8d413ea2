//! Movie catalog entries.

use once_cell::sync::Lazy;
use serde::Serialize;
use utoipa::ToSchema;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Movie {
    #[schema(example = "Get Out")]
    pub title: String,
    #[schema(example = "2017")]
    pub released: String,
}

impl Movie {
    fn new(title: &str, released: &str) -> Self {
        Self {
            title: title.to_string(),
            released: released.to_string(),
        }
    }
}

static CATALOG: Lazy<Vec<Movie>> = Lazy::new(|| {
    vec![
        Movie::new("Mad Max: Fury Road", "2015"),
        Movie::new("Spider-Man: Into the Spider-Verse", "2018"),
        Movie::new("Get Out", "2017"),
        Movie::new("Black Panther", "2018"),
        Movie::new("Guardian of the Galaxy Vol. 2", "2017"),
        Movie::new("Thor: Ragnarok", "2017"),
        Movie::new("Avengers: Infinity War", "2018"),
        Movie::new("Avengers: End Game", "2019"),
    ]
});

/// Read-only movie catalog.
pub struct Catalog;

impl Catalog {
    /// All movies in listing order.
    pub fn all() -> &'static [Movie] {
        &CATALOG
    }

    /// Look a movie up by title, ignoring case.
    pub fn find_by_title(title: &str) -> Option<&'static Movie> {
        CATALOG
            .iter()
            .find(|movie| movie.title.eq_ignore_ascii_case(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_listing() {
        assert_eq!(Catalog::all().len(), 8);
        assert_eq!(Catalog::all()[0].title, "Mad Max: Fury Road");
    }

    #[test]
    fn test_find_by_title_ignores_case() {
        let movie = Catalog::find_by_title("get out").unwrap();
        assert_eq!(movie.released, "2017");
        assert!(Catalog::find_by_title("Unknown Movie").is_none());
    }
}
