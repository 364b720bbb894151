//! Local favorites list.
//!
//! The file holds a JSON array of jokes. Each save reads the whole list,
//! appends the joke unless its id is already present, and replaces the file
//! through a temp file in the same directory so a crash never leaves a
//! truncated list behind.

use crate::domain::entities::Joke;
use crate::domain::errors::{ChuckError, PersistenceFailure, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// What a save did to the stored list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    AlreadyPresent,
}

impl SaveOutcome {
    pub fn describe(self) -> &'static str {
        match self {
            SaveOutcome::Added => "Saved to favorites.",
            SaveOutcome::AlreadyPresent => "Already in favorites.",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored jokes in insertion order. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Joke>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.failure(PersistenceFailure::Read, "read", &e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            ChuckError::persistence(
                PersistenceFailure::Corrupt,
                Some(&self.path),
                format!("not a valid favorites list: {e}"),
            )
        })
    }

    /// Appends `joke` unless a joke with the same id is already stored.
    pub fn save(&self, joke: &Joke) -> Result<SaveOutcome> {
        let mut jokes = self.load()?;

        if jokes.iter().any(|stored| stored.id == joke.id) {
            debug!(id = %joke.id, "joke already in favorites");
            return Ok(SaveOutcome::AlreadyPresent);
        }

        jokes.push(joke.clone());
        self.write_all(&jokes)?;
        debug!(id = %joke.id, count = jokes.len(), path = %self.path.display(), "saved favorite");
        Ok(SaveOutcome::Added)
    }

    fn write_all(&self, jokes: &[Joke]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| {
            self.failure(PersistenceFailure::Write, "create the directory for", &e)
        })?;

        let json = serde_json::to_string_pretty(jokes).map_err(|e| {
            ChuckError::persistence(
                PersistenceFailure::Write,
                Some(&self.path),
                format!("failed to serialize favorites: {e}"),
            )
        })?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .map_err(|e| self.failure(PersistenceFailure::Write, "write", &e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| self.failure(PersistenceFailure::Write, "write", &e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.failure(PersistenceFailure::Write, "replace", &e.error))?;
        Ok(())
    }

    fn failure(
        &self,
        failure: PersistenceFailure,
        action: &str,
        error: &std::io::Error,
    ) -> ChuckError {
        ChuckError::persistence(
            failure,
            Some(&self.path),
            format!("failed to {action} {}: {error}", self.path.display()),
        )
    }
}
