//! Tracing setup. Diagnostics always go to stderr so stdout stays clean
//! for jokes and JSON.

use anyhow::Result;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub const LOG_LEVEL_VAR: &str = "CHUCK_LOG";

/// Installs the global subscriber.
///
/// `--debug` forces DEBUG; otherwise `CHUCK_LOG` picks the level, falling back
/// to WARN when unset or unrecognised.
pub fn init_logging(debug: bool, requested: Option<&str>) -> Result<()> {
    let level = resolve_level(debug, requested);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn resolve_level(debug: bool, requested: Option<&str>) -> Level {
    if debug {
        return Level::DEBUG;
    }
    requested
        .and_then(|raw| Level::from_str(raw.trim()).ok())
        .unwrap_or(Level::WARN)
}
