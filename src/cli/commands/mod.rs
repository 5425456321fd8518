use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn validator_sort() -> ValueParser {
    ValueParser::from(
        move |sort: &str| -> std::result::Result<String, String> {
            match sort.to_lowercase().as_str() {
                "title" | "year" | "rating" => Ok(sort.to_lowercase()),
                _ => Err("invalid sort, expected one of: title, year, rating".to_string()),
            }
        },
    )
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("cinetrack")
        .about("Movie catalog client with per-user watchlists")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the catalog API")
                .default_value("http://127.0.0.1:8000/api")
                .env("CINETRACK_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("session-file")
                .long("session-file")
                .help("Path where session cookies are persisted between runs")
                .default_value(".cinetrack-session.json")
                .env("CINETRACK_SESSION_FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("CINETRACK_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and start a session")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Account name")
                        .required(true),
                )
                .arg(
                    Arg::new("email")
                        .short('e')
                        .long("email")
                        .help("Contact email (optional)"),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("CINETRACK_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Start a session")
                .arg(
                    Arg::new("username")
                        .short('u')
                        .long("username")
                        .help("Account name")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .short('p')
                        .long("password")
                        .help("Account password")
                        .env("CINETRACK_PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("End the current session"))
        .subcommand(Command::new("me").about("Show the current session identity"))
        .subcommand(Command::new("genres").about("List genres"))
        .subcommand(
            Command::new("movies")
                .about("List movies, optionally filtered, searched, and sorted")
                .arg(
                    Arg::new("genre")
                        .short('g')
                        .long("genre")
                        .help("Filter by genre name"),
                )
                .arg(
                    Arg::new("query")
                        .short('q')
                        .long("query")
                        .help("Search in titles"),
                )
                .arg(
                    Arg::new("sort")
                        .short('s')
                        .long("sort")
                        .help("Sort order: title, year, rating")
                        .value_parser(validator_sort()),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Result page")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("movie").about("Show one movie").arg(
                Arg::new("id")
                    .help("Movie id")
                    .required(true)
                    .value_parser(clap::value_parser!(u64)),
            ),
        )
        .subcommand(
            Command::new("watchlist")
                .about("Manage the personal watchlist")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List watchlisted movies"))
                .subcommand(
                    Command::new("add").about("Add a movie to the watchlist").arg(
                        Arg::new("id")
                            .help("Movie id")
                            .required(true)
                            .value_parser(clap::value_parser!(u64)),
                    ),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a movie from the watchlist")
                        .arg(
                            Arg::new("id")
                                .help("Movie id")
                                .required(true)
                                .value_parser(clap::value_parser!(u64)),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "cinetrack");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Movie catalog client with per-user watchlists"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_defaults_and_globals() {
        let command = new();
        let matches = command.get_matches_from(vec!["cinetrack", "genres"]);

        assert_eq!(
            matches.get_one::<String>("api-url").map(|s| s.to_string()),
            Some("http://127.0.0.1:8000/api".to_string())
        );
        assert_eq!(
            matches
                .get_one::<String>("session-file")
                .map(|s| s.to_string()),
            Some(".cinetrack-session.json".to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("CINETRACK_API_URL", Some("https://catalog.tld/api")),
                ("CINETRACK_SESSION_FILE", Some("/tmp/session.json")),
                ("CINETRACK_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["cinetrack", "genres"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").map(|s| s.to_string()),
                    Some("https://catalog.tld/api".to_string())
                );
                assert_eq!(
                    matches
                        .get_one::<String>("session-file")
                        .map(|s| s.to_string()),
                    Some("/tmp/session.json".to_string())
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("CINETRACK_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["cinetrack", "genres"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_movies_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "cinetrack", "movies", "--genre", "Drama", "--query", "alien", "--sort", "rating",
            "--page", "2",
        ]);

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "movies");
        assert_eq!(
            sub.get_one::<String>("genre").map(|s| s.to_string()),
            Some("Drama".to_string())
        );
        assert_eq!(
            sub.get_one::<String>("sort").map(|s| s.to_string()),
            Some("rating".to_string())
        );
        assert_eq!(sub.get_one::<u32>("page").copied(), Some(2));
    }

    #[test]
    fn test_invalid_sort_rejected() {
        let command = new();
        let result =
            command.try_get_matches_from(vec!["cinetrack", "movies", "--sort", "director"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_watchlist_subcommands() {
        let command = new();
        let matches = command.get_matches_from(vec!["cinetrack", "watchlist", "add", "5"]);

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "watchlist");
        let (name, sub) = sub.subcommand().unwrap();
        assert_eq!(name, "add");
        assert_eq!(sub.get_one::<u64>("id").copied(), Some(5));
    }
}
