use crate::api::catalog;
use crate::api::types::Movie;
use crate::cli::{actions::session_client, actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};

/// Handle read-only catalog actions.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let (client, store) = session_client(globals)?;

    match action {
        Action::Genres => {
            for genre in catalog::genres(&client).await? {
                println!("{}\t{}", genre.id, genre.name);
            }
        }

        Action::Movies { query } => {
            for movie in catalog::movies(&client, &query).await? {
                println!("{}", format_movie_line(&movie));
            }
        }

        Action::Movie { id } => {
            let movie = catalog::movie(&client, id).await?;

            println!("{}", format_movie_line(&movie));
            if let Some(description) = &movie.description {
                println!("{description}");
            }
            if let Some(poster_url) = &movie.poster_url {
                println!("poster: {poster_url}");
            }
        }

        _ => return Err(anyhow!("unsupported action")),
    }

    store.save(&globals.session_file)?;

    Ok(())
}

pub(crate) fn format_movie_line(movie: &Movie) -> String {
    let mut line = format!("{}\t{}", movie.id, movie.title);

    if let Some(year) = movie.release_year {
        line.push_str(&format!(" ({year})"));
    }
    if let Some(rating) = movie.rating {
        line.push_str(&format!(" [{rating:.1}]"));
    }
    if !movie.genres.is_empty() {
        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        line.push_str(&format!(" {{{}}}", names.join(", ")));
    }
    if movie.in_watchlist == Some(true) {
        line.push_str(" *");
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Genre;

    #[test]
    fn format_movie_line_full() {
        let movie = Movie {
            id: 5,
            title: "Solaris".to_string(),
            release_year: Some(1972),
            rating: Some(8.0),
            description: None,
            poster_url: None,
            genres: vec![Genre {
                id: 1,
                name: "Sci-Fi".to_string(),
            }],
            in_watchlist: Some(true),
        };

        assert_eq!(format_movie_line(&movie), "5\tSolaris (1972) [8.0] {Sci-Fi} *");
    }

    #[test]
    fn format_movie_line_sparse() {
        let movie = Movie {
            id: 7,
            title: "Stalker".to_string(),
            release_year: None,
            rating: None,
            description: None,
            poster_url: None,
            genres: vec![],
            in_watchlist: None,
        };

        assert_eq!(format_movie_line(&movie), "7\tStalker");
    }
}
