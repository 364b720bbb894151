use crate::application::formatter::{Formatter, OutputMode};
use crate::application::services::{DEFAULT_SEARCH_LIMIT, JokeApi};
use crate::domain::errors::ChuckError;
use crate::infrastructure::config::Config;
use crate::infrastructure::favorites::FavoritesStore;
use crate::presentation::dispatcher::Dispatcher;
use anyhow::Result;
use clap::{Parser, Subcommand};

/// CLI configuration for chuck
#[derive(Parser, Debug)]
#[command(name = "chuck", version)]
#[command(about = "Chuck Norris jokes, straight to your terminal", long_about = None)]
pub struct Cli {
    /// Print machine-readable JSON (takes precedence over --verbose)
    #[arg(long, global = true)]
    pub json: bool,

    /// Show id, URL and categories along with each joke
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log diagnostics to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get a single random joke
    Random {
        /// Category to fetch a random joke from
        #[arg(short, long)]
        category: Option<String>,

        /// Also store the joke in your favorites
        #[arg(long)]
        save: bool,
    },

    /// List available joke categories
    Categories,

    /// Search jokes by keyword
    Search {
        /// Search query string
        query: String,

        /// Maximum number of jokes to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// List jokes saved with `random --save`
    Favorites,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.json, self.verbose)
    }

    pub async fn run(&self, api: &dyn JokeApi, config: &Config) -> Result<()> {
        let favorites = config.favorites_path.as_deref().map(FavoritesStore::new);
        let dispatcher = Dispatcher::new(api, Formatter::new(self.output_mode()), favorites);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        dispatcher.dispatch(&self.command, &mut out).await
    }
}

/// Maps any failure to the one line shown on stderr.
pub fn user_facing_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ChuckError>() {
        Some(chuck_error) => chuck_error.user_message(),
        None => "something unexpected went wrong, rerun with --debug for details".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parses_random_with_category() {
        let cli = Cli::try_parse_from(["chuck", "random", "--category", "dev"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Random {
                category: Some("dev".to_string()),
                save: false
            }
        );
        assert_eq!(cli.output_mode(), OutputMode::Plain);
    }

    #[test]
    fn global_flags_work_on_either_side() {
        let before = Cli::try_parse_from(["chuck", "--json", "categories"]).unwrap();
        let after = Cli::try_parse_from(["chuck", "categories", "--json"]).unwrap();
        assert_eq!(before.output_mode(), OutputMode::Json);
        assert_eq!(after.output_mode(), OutputMode::Json);
    }

    #[test]
    fn json_and_verbose_resolve_to_json() {
        let cli = Cli::try_parse_from(["chuck", "random", "--json", "--verbose"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn search_limit_defaults_to_ten() {
        let cli = Cli::try_parse_from(["chuck", "search", "python"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Search {
                query: "python".to_string(),
                limit: 10
            }
        );
    }

    #[test]
    fn search_requires_query() {
        assert!(Cli::try_parse_from(["chuck", "search"]).is_err());
    }

    #[test]
    fn negative_limit_is_rejected() {
        assert!(Cli::try_parse_from(["chuck", "search", "x", "--limit", "-1"]).is_err());
    }

    #[test]
    fn known_errors_get_friendly_messages() {
        let err = anyhow::Error::new(ChuckError::Timeout(Duration::from_secs(1)));
        assert!(user_facing_message(&err).contains("timed out"));

        let other = anyhow::anyhow!("broken pipe (os error 32)");
        assert!(!user_facing_message(&other).contains("os error"));
    }
}
