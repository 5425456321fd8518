use crate::api::auth;
use crate::cli::{actions::session_client, actions::Action, globals::GlobalArgs};
use crate::client::error::ApiError;
use anyhow::{anyhow, Result};
use tracing::debug;

/// Handle session and account actions.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let (client, store) = session_client(globals)?;

    match action {
        Action::Register {
            username,
            email,
            password,
        } => {
            let user = auth::register(&client, &username, email.as_deref(), &password)
                .await
                .map_err(map_auth_error)?;

            println!("registered and signed in as {}", user.username);
        }

        Action::Login { username, password } => {
            let user = auth::login(&client, &username, &password)
                .await
                .map_err(map_auth_error)?;

            println!("signed in as {}", user.username);
        }

        Action::Logout => {
            auth::logout(&client).await?;

            println!("signed out");
        }

        Action::Me => match auth::init_auth(&client).await? {
            Some(user) => println!("signed in as {}", user.username),
            None => println!("not signed in"),
        },

        _ => return Err(anyhow!("unsupported action")),
    }

    debug!("persisting session to {}", globals.session_file.display());

    store.save(&globals.session_file)?;

    Ok(())
}

/// Rejected credentials come back as plain request errors; give them a
/// user-facing message instead of a raw status line.
fn map_auth_error(err: ApiError) -> anyhow::Error {
    match err.status() {
        Some(400 | 401 | 403) => anyhow!("authentication failed: {err}"),
        _ => err.into(),
    }
}
