//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use moviecat_lib::model::TimeWindow;

/// Trending movies and favorites from TMDB.
#[derive(Debug, Parser)]
#[command(name = "moviecat", version)]
pub struct Cli {
    /// TMDB v3 API key.
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Language tag for trending lists.
    #[arg(long, default_value = "en-US", global = true)]
    pub language: String,

    /// Skip the pause before network requests.
    #[arg(long, global = true)]
    pub no_delay: bool,

    /// Database file. Defaults to the platform data directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List trending movies.
    Trending {
        /// `day` or `week`.
        #[arg(default_value = "day")]
        window: TimeWindow,

        /// Fetch a new list even if the cached one is still fresh.
        #[arg(long)]
        refresh: bool,
    },

    /// Show one movie's details.
    Details {
        /// TMDB movie ID.
        id: i64,
    },

    /// Manage favorite movies.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Print favorite movie IDs.
    List,
    /// Mark a movie as favorite.
    Add { id: i64 },
    /// Unmark a favorite movie.
    Remove { id: i64 },
    /// Flip a movie's favorite state.
    Toggle { id: i64 },
    /// Fetch and print details of every favorite.
    Show,
}

impl Command {
    /// Returns `true` if the command talks to TMDB.
    pub fn needs_network(&self) -> bool {
        match self {
            Self::Trending { .. } | Self::Details { .. } => true,
            Self::Favorites(FavoritesCommand::Show) => true,
            Self::Favorites(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_trending_window_is_validated() {
        let cli = Cli::try_parse_from(["moviecat", "trending", "week"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Trending {
                window: TimeWindow::Week,
                refresh: false
            }
        ));

        assert!(Cli::try_parse_from(["moviecat", "trending", "month"]).is_err());
    }

    #[test]
    fn test_favorites_need_no_network() {
        let cli = Cli::try_parse_from(["moviecat", "favorites", "add", "42"]).unwrap();
        assert!(!cli.command.needs_network());

        let cli = Cli::try_parse_from(["moviecat", "--no-delay", "favorites", "show"]).unwrap();
        assert!(cli.command.needs_network());
        assert!(cli.no_delay);
    }
}
