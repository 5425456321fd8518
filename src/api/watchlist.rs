//! Per-user watchlist: membership writes and the saved-movies read. The
//! backend treats membership as set operations, so a retried write cannot
//! double-apply.

use crate::api::types::Movie;
use crate::client::{error::ApiError, ApiClient};
use serde_json::json;

/// List the current user's watchlisted movies.
///
/// # Errors
/// Returns an error if the request fails or the backend answers with a
/// non-success status.
pub async fn watchlist(client: &ApiClient) -> Result<Vec<Movie>, ApiError> {
    client.get_json("/watchlist/", &[]).await
}

/// Add a movie to the watchlist.
///
/// # Errors
/// Returns an error if the request fails or the backend answers with a
/// non-success status after the single token-refresh retry.
pub async fn add_to_watchlist(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    let _: serde_json::Value = client
        .post_json(&format!("/movies/{id}/add_to_watchlist/"), &json!({}))
        .await?;

    Ok(())
}

/// Remove a movie from the watchlist.
///
/// # Errors
/// Returns an error if the request fails or the backend answers with a
/// non-success status after the single token-refresh retry.
pub async fn remove_from_watchlist(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    let _: serde_json::Value = client
        .post_json(&format!("/movies/{id}/remove_from_watchlist/"), &json!({}))
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::credentials::MemoryCredentialStore;
    use anyhow::Result;
    use serde_json::json;
    use std::net::TcpListener;
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &MockServer) -> Result<ApiClient> {
        Ok(ApiClient::new(
            &server.uri(),
            Arc::new(MemoryCredentialStore::new()),
        )?)
    }

    async fn mount_csrf(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/auth/csrf/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"csrfToken": "tok-1"})),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn add_then_list_includes_movie() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_csrf(&server).await;

        Mock::given(method("POST"))
            .and(path("/movies/5/add_to_watchlist/"))
            .and(header("X-CSRFToken", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"in_watchlist": true})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/watchlist/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 5, "title": "Solaris", "in_watchlist": true}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server)?;
        add_to_watchlist(&client, 5).await?;
        let movies = watchlist(&client).await?;

        assert!(movies.iter().any(|m| m.id == 5));
        Ok(())
    }

    #[tokio::test]
    async fn remove_then_list_excludes_movie() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        mount_csrf(&server).await;

        Mock::given(method("POST"))
            .and(path("/movies/5/remove_from_watchlist/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"in_watchlist": false})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/watchlist/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server)?;
        remove_from_watchlist(&client, 5).await?;
        let movies = watchlist(&client).await?;

        assert!(movies.iter().all(|m| m.id != 5));
        Ok(())
    }
}
