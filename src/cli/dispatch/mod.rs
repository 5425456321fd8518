use crate::api::catalog::MovieQuery;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let globals = GlobalArgs::new(
        matches
            .get_one::<String>("api-url")
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --api-url"))?,
        matches
            .get_one::<String>("session-file")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --session-file"))?,
    );

    // Closure to return subcommand matches
    let required = |sub_matches: &clap::ArgMatches, name: &str| -> Result<String> {
        sub_matches
            .get_one::<String>(name)
            .map(|s| s.to_string())
            .with_context(|| format!("missing required argument: --{name}"))
    };

    let action = match matches.subcommand() {
        Some(("register", sub)) => Action::Register {
            username: required(sub, "username")?,
            email: sub.get_one::<String>("email").map(|s| s.to_string()),
            password: SecretString::from(required(sub, "password")?),
        },

        Some(("login", sub)) => Action::Login {
            username: required(sub, "username")?,
            password: SecretString::from(required(sub, "password")?),
        },

        Some(("logout", _)) => Action::Logout,

        Some(("me", _)) => Action::Me,

        Some(("genres", _)) => Action::Genres,

        Some(("movies", sub)) => Action::Movies {
            query: MovieQuery {
                genre: sub
                    .get_one::<String>("genre")
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                q: sub
                    .get_one::<String>("query")
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                sort: sub
                    .get_one::<String>("sort")
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                page: sub.get_one::<u32>("page").copied(),
            },
        },

        Some(("movie", sub)) => Action::Movie {
            id: sub
                .get_one::<u64>("id")
                .copied()
                .context("missing required argument: id")?,
        },

        Some(("watchlist", sub)) => match sub.subcommand() {
            Some(("add", sub)) => Action::WatchlistAdd {
                id: sub
                    .get_one::<u64>("id")
                    .copied()
                    .context("missing required argument: id")?,
            },
            Some(("remove", sub)) => Action::WatchlistRemove {
                id: sub
                    .get_one::<u64>("id")
                    .copied()
                    .context("missing required argument: id")?,
            },
            _ => Action::WatchlistList,
        },

        _ => return Err(anyhow::anyhow!("unknown command")),
    };

    Ok((action, globals))
}
