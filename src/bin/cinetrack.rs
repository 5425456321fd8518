use anyhow::Result;
use cinetrack::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    match action {
        Action::Register { .. } | Action::Login { .. } | Action::Logout | Action::Me => {
            actions::auth::handle(action, &globals).await?;
        }
        Action::Genres | Action::Movies { .. } | Action::Movie { .. } => {
            actions::catalog::handle(action, &globals).await?;
        }
        Action::WatchlistList | Action::WatchlistAdd { .. } | Action::WatchlistRemove { .. } => {
            actions::watchlist::handle(action, &globals).await?;
        }
    }

    Ok(())
}
