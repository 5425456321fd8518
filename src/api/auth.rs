//! Session and account endpoints. Writes go through the client's
//! token-guarded POST path; `fetch_me` is a plain credentialed read.

use crate::api::types::{AuthResponse, MeResponse, User};
use crate::client::{error::ApiError, ApiClient};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

/// Fetch the current session identity; `None` when anonymous.
///
/// # Errors
/// Returns an error if the request fails or the backend answers with a
/// non-success status.
pub async fn fetch_me(client: &ApiClient) -> Result<Option<User>, ApiError> {
    let response: MeResponse = client.get_json("/auth/me/", &[]).await?;

    Ok(response.user)
}

/// Prime the CSRF cookie, then fetch the session identity. Run this once
/// at startup so the first write already has a cookie to echo.
///
/// # Errors
/// Returns an error if either request fails.
pub async fn init_auth(client: &ApiClient) -> Result<Option<User>, ApiError> {
    client.acquire_token().await?;

    fetch_me(client).await
}

/// Create an account; the backend starts a session on success.
///
/// # Errors
/// Returns an error if the request fails or the credentials are rejected.
pub async fn register(
    client: &ApiClient,
    username: &str,
    email: Option<&str>,
    password: &SecretString,
) -> Result<User, ApiError> {
    let payload = json!({
        "username": username,
        "email": email.unwrap_or_default(),
        "password": password.expose_secret(),
    });

    let response: AuthResponse = client.post_json("/auth/register/", &payload).await?;

    Ok(response.user)
}

/// Start a session.
///
/// # Errors
/// Returns an error if the request fails or the credentials are rejected.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: &SecretString,
) -> Result<User, ApiError> {
    let payload = json!({
        "username": username,
        "password": password.expose_secret(),
    });

    let response: AuthResponse = client.post_json("/auth/login/", &payload).await?;

    Ok(response.user)
}

/// End the current session.
///
/// # Errors
/// Returns an error if the request fails.
pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    let _: serde_json::Value = client.post_json("/auth/logout/", &json!({})).await?;

    Ok(())
}
