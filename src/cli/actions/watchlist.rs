use crate::api::watchlist;
use crate::cli::actions::catalog::format_movie_line;
use crate::cli::{actions::session_client, actions::Action, globals::GlobalArgs};
use crate::client::error::ApiError;
use anyhow::{anyhow, Result};
use tracing::warn;

/// Handle watchlist actions. A failed list fetch degrades to an empty
/// result instead of aborting; writes always surface their error.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let (client, store) = session_client(globals)?;

    match action {
        Action::WatchlistList => {
            let movies = match watchlist::watchlist(&client).await {
                Ok(movies) => movies,
                Err(err @ ApiError::Request { .. }) => {
                    warn!("watchlist fetch failed, treating as empty: {err}");
                    Vec::new()
                }
                Err(err) => return Err(err.into()),
            };

            if movies.is_empty() {
                println!("watchlist is empty");
            }
            for movie in movies {
                println!("{}", format_movie_line(&movie));
            }
        }

        Action::WatchlistAdd { id } => {
            watchlist::add_to_watchlist(&client, id).await?;

            println!("added movie {id} to watchlist");
        }

        Action::WatchlistRemove { id } => {
            watchlist::remove_from_watchlist(&client, id).await?;

            println!("removed movie {id} from watchlist");
        }

        _ => return Err(anyhow!("unsupported action")),
    }

    store.save(&globals.session_file)?;

    Ok(())
}
