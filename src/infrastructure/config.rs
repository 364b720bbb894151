use crate::domain::errors::{ChuckError, Result};
use crate::domain::value_objects::BaseUrl;
use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL_VAR: &str = "CHUCK_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "CHUCK_CLI_TIMEOUT";
pub const FAVORITES_PATH_VAR: &str = "CHUCK_FAVORITES_PATH";

pub const DEFAULT_BASE_URL: &str = "https://api.chucknorris.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const FAVORITES_FILE: &str = "favorites.json";

/// Process-wide settings, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: BaseUrl,
    pub timeout: Duration,
    /// `None` when no override is set and the platform has no data directory.
    pub favorites_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = BaseUrl::new(get(BASE_URL_VAR).as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let favorites_path = get(FAVORITES_PATH_VAR)
            .map(PathBuf::from)
            .or_else(default_favorites_path);

        Ok(Self {
            base_url,
            timeout,
            favorites_path,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ChuckError::Validation(format!(
            "{TIMEOUT_VAR} must be a positive number of seconds, got '{raw}'"
        ))),
    }
}

/// `favorites.json` in the platform data directory:
/// - Linux: `~/.local/share/chuck/favorites.json`
/// - macOS: `~/Library/Application Support/io.chucknorris.chuck/favorites.json`
/// - Windows: `%APPDATA%\chucknorris\chuck\data\favorites.json`
fn default_favorites_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "chucknorris", "chuck")
        .map(|dirs| dirs.data_dir().join(FAVORITES_FILE))
}
