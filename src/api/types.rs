use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// One catalog record. Optional fields are absent on older backend
/// versions, and `in_watchlist` is only populated for authenticated
/// sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_year: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub in_watchlist: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// `{"user": ...}` envelope returned by login and register.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub user: User,
}

/// `/auth/me/` answers with `{"user": null}` for anonymous sessions.
#[derive(Clone, Debug, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub user: Option<User>,
}

/// `/movies/` answers with a bare array or, when pagination is enabled
/// server-side, a `{results: [...]}` envelope; accept both.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum MovieList {
    Plain(Vec<Movie>),
    Paginated { results: Vec<Movie> },
}

impl MovieList {
    #[must_use]
    pub fn into_movies(self) -> Vec<Movie> {
        match self {
            MovieList::Plain(movies) => movies,
            MovieList::Paginated { results } => results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn movie_tolerates_missing_optional_fields() -> Result<()> {
        let movie: Movie = serde_json::from_value(json!({
            "id": 7,
            "title": "Stalker"
        }))?;

        assert_eq!(movie.id, 7);
        assert_eq!(movie.title, "Stalker");
        assert_eq!(movie.release_year, None);
        assert_eq!(movie.rating, None);
        assert!(movie.genres.is_empty());
        assert_eq!(movie.in_watchlist, None);
        Ok(())
    }

    #[test]
    fn movie_parses_full_record() -> Result<()> {
        let movie: Movie = serde_json::from_value(json!({
            "id": 1,
            "title": "Alien",
            "release_year": 1979,
            "rating": 8.5,
            "description": "In space no one can hear you scream.",
            "poster_url": "https://posters.example/alien.jpg",
            "genres": [{"id": 2, "name": "Horror"}],
            "in_watchlist": true
        }))?;

        assert_eq!(movie.release_year, Some(1979));
        assert_eq!(movie.genres[0].name, "Horror");
        assert_eq!(movie.in_watchlist, Some(true));
        Ok(())
    }

    #[test]
    fn movie_list_accepts_bare_array() -> Result<()> {
        let list: MovieList = serde_json::from_value(json!([
            {"id": 1, "title": "Alien"}
        ]))?;

        assert_eq!(list.into_movies().len(), 1);
        Ok(())
    }

    #[test]
    fn movie_list_accepts_paginated_envelope() -> Result<()> {
        let list: MovieList = serde_json::from_value(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"id": 1, "title": "Alien"}]
        }))?;

        assert_eq!(list.into_movies().len(), 1);
        Ok(())
    }

    #[test]
    fn me_response_with_null_user() -> Result<()> {
        let me: MeResponse = serde_json::from_value(json!({"user": null}))?;
        assert!(me.user.is_none());
        Ok(())
    }
}
