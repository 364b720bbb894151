use crate::domain::value_objects::Endpoint;
use hyper::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

/// One joke as served by the joke API.
///
/// `id` and `value` are required; every other field defaults to empty when
/// the API omits it or sends `null`. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: String,
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
}

/// Matches from a keyword search.
///
/// `total` is the count reported by the API and is left alone when
/// `result` is truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub total: u64,
    pub result: Vec<Joke>,
}

impl SearchResult {
    /// Keeps at most `limit` jokes, in the order the API returned them.
    pub fn truncated(mut self, limit: usize) -> Self {
        self.result.truncate(limit);
        self
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Represents an outgoing GET request
#[derive(Debug, Clone)]
pub struct Request {
    pub endpoint: Endpoint,
    pub headers: Vec<(String, String)>, // Key-value pairs for headers
}

/// Represents an HTTP response
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: String,
}
