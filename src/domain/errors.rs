use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Which step of a favorites operation went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceFailure {
    /// No override was given and the platform has no data directory.
    NoDataDir,
    Read,
    /// The file exists but is not a JSON list of jokes.
    Corrupt,
    Write,
}

/// Every way a joke lookup or a favorites update can fail.
///
/// `Display` carries the technical detail and is meant for logs;
/// [`ChuckError::user_message`] is what ends up on the terminal.
#[derive(Debug, Error)]
pub enum ChuckError {
    /// Bad user input, rejected before any request is sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Connection-level failure (DNS, refused connection, TLS).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The API reports that the requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API answered with a status other than success or 404.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// The body could not be decoded into the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Reading, parsing or rewriting the favorites file failed.
    /// `detail` holds the io or serde error and only shows up in logs.
    #[error("favorites store failure ({failure:?}): {detail}")]
    Persistence {
        failure: PersistenceFailure,
        path: Option<PathBuf>,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, ChuckError>;

impl ChuckError {
    pub fn persistence(
        failure: PersistenceFailure,
        path: Option<&Path>,
        detail: impl Into<String>,
    ) -> Self {
        ChuckError::Persistence {
            failure,
            path: path.map(Path::to_path_buf),
            detail: detail.into(),
        }
    }

    /// Single-line message suitable for stderr, free of transport jargon.
    pub fn user_message(&self) -> String {
        match self {
            ChuckError::Validation(reason) => reason.clone(),
            ChuckError::Timeout(limit) => format!(
                "the joke service did not answer in time (timed out after {}s)",
                limit.as_secs()
            ),
            ChuckError::Transport(_) => {
                "could not reach the joke service, check your network connection".to_string()
            }
            ChuckError::NotFound(subject) => format!("{subject} was not found"),
            ChuckError::UnexpectedStatus(code) => {
                format!("the joke service returned an error (HTTP {code})")
            }
            ChuckError::InvalidResponse(_) => {
                "the joke service sent a response that could not be understood".to_string()
            }
            ChuckError::Persistence { failure, path, .. } => {
                let file = match path {
                    Some(path) => format!("favorites file {}", path.display()),
                    None => "favorites file".to_string(),
                };
                match failure {
                    PersistenceFailure::NoDataDir => {
                        "no per-user data directory is available for favorites".to_string()
                    }
                    PersistenceFailure::Read => format!("could not read {file}"),
                    PersistenceFailure::Corrupt => format!("{file} is corrupted"),
                    PersistenceFailure::Write => format!("could not write {file}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_mentions_timing_out() {
        let err = ChuckError::Timeout(Duration::from_secs(10));
        assert!(err.user_message().contains("timed out after 10s"));
    }

    #[test]
    fn transport_message_hides_details() {
        let err =
            ChuckError::Transport("tcp connect error: Connection refused (os error 111)".into());
        let message = err.user_message();
        assert!(!message.contains("os error"));
        assert!(err.to_string().contains("os error 111"));
    }

    #[test]
    fn not_found_names_the_subject() {
        let err = ChuckError::NotFound("category \"nope\"".into());
        assert_eq!(err.user_message(), "category \"nope\" was not found");
    }

    #[test]
    fn persistence_message_hides_details() {
        let path = Path::new("/home/chuck/favorites.json");
        let read = ChuckError::persistence(
            PersistenceFailure::Read,
            Some(path),
            "Is a directory (os error 21)",
        );
        let corrupt = ChuckError::persistence(
            PersistenceFailure::Corrupt,
            Some(path),
            "expected ident at line 1 column 2",
        );

        assert_eq!(
            read.user_message(),
            "could not read favorites file /home/chuck/favorites.json"
        );
        assert_eq!(
            corrupt.user_message(),
            "favorites file /home/chuck/favorites.json is corrupted"
        );
        assert!(read.to_string().contains("os error 21"));
        assert!(corrupt.to_string().contains("line 1 column 2"));
    }

    #[test]
    fn missing_data_dir_has_fixed_message() {
        let err = ChuckError::persistence(PersistenceFailure::NoDataDir, None, "");
        assert_eq!(
            err.user_message(),
            "no per-user data directory is available for favorites"
        );
    }
}
