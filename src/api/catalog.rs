//! Catalog reads: genres, the filterable movie grid, and single-movie
//! detail. All read-only, no token involved.

use crate::api::types::{Genre, Movie, MovieList};
use crate::client::{error::ApiError, ApiClient};

/// Filter, search, and ordering parameters for `/movies/`. Rendered in
/// fixed `genre, q, sort, page` order; empty or absent values are left out
/// of the query string entirely.
#[derive(Clone, Debug, Default)]
pub struct MovieQuery {
    pub genre: String,
    pub q: String,
    pub sort: String,
    pub page: Option<u32>,
}

impl MovieQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.genre.is_empty() {
            pairs.push(("genre", self.genre.clone()));
        }
        if !self.q.is_empty() {
            pairs.push(("q", self.q.clone()));
        }
        if !self.sort.is_empty() {
            pairs.push(("sort", self.sort.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }

        pairs
    }
}

/// List all genres.
///
/// # Errors
/// Returns an error if the request fails or the backend answers with a
/// non-success status.
pub async fn genres(client: &ApiClient) -> Result<Vec<Genre>, ApiError> {
    client.get_json("/genres/", &[]).await
}

/// List movies matching `query`.
///
/// # Errors
/// Returns an error if the request fails or the backend answers with a
/// non-success status.
pub async fn movies(client: &ApiClient, query: &MovieQuery) -> Result<Vec<Movie>, ApiError> {
    let pairs = query.query_pairs();
    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(name, value)| (*name, value.as_str()))
        .collect();

    let list: MovieList = client.get_json("/movies/", &borrowed).await?;

    Ok(list.into_movies())
}

/// Fetch one movie by id.
///
/// # Errors
/// Returns an error if the request fails or the backend answers with a
/// non-success status.
pub async fn movie(client: &ApiClient, id: u64) -> Result<Movie, ApiError> {
    client.get_json(&format!("/movies/{id}/"), &[]).await
}
