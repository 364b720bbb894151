//! Rendering of jokes, categories and search results.
//!
//! Every function here is pure: it builds the complete text to print and
//! leaves writing it to the caller. JSON output is compact and always ends
//! with a newline.

use crate::domain::entities::{Joke, SearchResult};
use serde::Serialize;

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain,
    Verbose,
    Json,
}

impl OutputMode {
    /// JSON wins over verbose when both flags are given.
    pub fn from_flags(json: bool, verbose: bool) -> Self {
        match (json, verbose) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Verbose,
            (false, false) => OutputMode::Plain,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    mode: OutputMode,
}

impl Formatter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn joke(&self, joke: &Joke) -> serde_json::Result<String> {
        match self.mode {
            OutputMode::Json => json_line(joke),
            OutputMode::Plain => Ok(format!("{}\n", joke.value)),
            OutputMode::Verbose => Ok(format!(
                "{}\nID: {}\nURL: {}\nCategories: {}\n",
                joke.value,
                joke.id,
                joke.url,
                category_list(&joke.categories)
            )),
        }
    }

    pub fn categories(&self, categories: &[String]) -> serde_json::Result<String> {
        if self.mode == OutputMode::Json {
            return json_line(categories);
        }
        if categories.is_empty() {
            return Ok("No categories available.\n".to_string());
        }
        Ok(categories.iter().map(|c| format!("{c}\n")).collect())
    }

    pub fn search(&self, result: &SearchResult) -> serde_json::Result<String> {
        if self.mode == OutputMode::Json {
            return json_line(result);
        }
        if result.result.is_empty() {
            if result.total == 0 {
                return Ok("No jokes found.\n".to_string());
            }
            return Ok(format!("0 of {} matches shown.\n", result.total));
        }
        Ok(self.numbered(&result.result))
    }

    pub fn favorites(&self, jokes: &[Joke]) -> serde_json::Result<String> {
        if self.mode == OutputMode::Json {
            return json_line(jokes);
        }
        if jokes.is_empty() {
            return Ok("No favorites saved.\n".to_string());
        }
        Ok(self.numbered(jokes))
    }

    fn numbered(&self, jokes: &[Joke]) -> String {
        let mut out = String::new();
        for (ordinal, joke) in jokes.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", ordinal + 1, joke.value));
            if self.mode == OutputMode::Verbose {
                out.push_str(&format!("   ID: {}\n", joke.id));
                out.push_str(&format!("   URL: {}\n", joke.url));
                out.push_str(&format!(
                    "   Categories: {}\n",
                    category_list(&joke.categories)
                ));
            }
        }
        out
    }
}

fn category_list(categories: &[String]) -> String {
    if categories.is_empty() {
        "none".to_string()
    } else {
        categories.join(", ")
    }
}

fn json_line<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(value)?;
    line.push('\n');
    Ok(line)
}
