use crate::domain::errors::{ChuckError, Result};
use hyper::http::Uri;
use std::fmt;

/// Root of the joke API, validated to be an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(url::Url);

impl BaseUrl {
    /// Creates a new BaseUrl with validation
    ///
    /// # Arguments
    /// * `raw` - The URL string to parse; a trailing `/` is ignored
    ///
    /// # Returns
    /// * `Ok(BaseUrl)` - Validated base URL
    /// * `Err(ChuckError::Validation)` - If the URL is malformed or not http(s)
    pub fn new(raw: &str) -> Result<Self> {
        let parsed = url::Url::parse(raw.trim())
            .map_err(|e| ChuckError::Validation(format!("invalid API base URL '{raw}': {e}")))?;

        match parsed.scheme() {
            "http" | "https" => Ok(BaseUrl(parsed)),
            other => Err(ChuckError::Validation(format!(
                "API base URL must use http or https, not '{other}'"
            ))),
        }
    }

    /// Resolves `path` under this base and appends percent-encoded query pairs.
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Endpoint> {
        let mut url = self.0.clone();
        let joined = format!(
            "{}/{}",
            self.0.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Endpoint::new(url.as_str())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request target
#[derive(Debug, Clone)]
pub struct Endpoint(pub Uri);

impl Endpoint {
    pub fn new(url: &str) -> Result<Self> {
        let uri = url
            .parse::<Uri>()
            .map_err(|e| ChuckError::Validation(format!("invalid request URL '{url}': {e}")))?;
        Ok(Endpoint(uri))
    }

    /// Returns the URL as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A search keyword, never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChuckError::Validation(
                "search query cannot be empty".to_string(),
            ));
        }
        Ok(SearchQuery(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A category name. Membership is left for the API to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChuckError::Validation("category cannot be empty".to_string()));
        }
        Ok(Category(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
