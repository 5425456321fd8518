pub mod auth;
pub mod catalog;
pub mod watchlist;

use crate::api::catalog::MovieQuery;
use crate::cli::globals::GlobalArgs;
use crate::client::{
    credentials::{CredentialStore, MemoryCredentialStore},
    ApiClient,
};
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;

#[derive(Debug)]
pub enum Action {
    Register {
        username: String,
        email: Option<String>,
        password: SecretString,
    },
    Login {
        username: String,
        password: SecretString,
    },
    Logout,
    Me,
    Genres,
    Movies {
        query: MovieQuery,
    },
    Movie {
        id: u64,
    },
    WatchlistList,
    WatchlistAdd {
        id: u64,
    },
    WatchlistRemove {
        id: u64,
    },
}

/// Load the persisted session and build a client over it. The store handle
/// is returned alongside so handlers can persist it again after the call.
pub(crate) fn session_client(
    globals: &GlobalArgs,
) -> Result<(ApiClient, Arc<MemoryCredentialStore>)> {
    let store = Arc::new(MemoryCredentialStore::load(&globals.session_file)?);
    let store_handle: Arc<dyn CredentialStore> = store.clone();
    let client = ApiClient::new(&globals.api_url, store_handle)?;

    Ok((client, store))
}
