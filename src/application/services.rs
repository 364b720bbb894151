use crate::application::builders::request_builder::RequestBuilder;
use crate::domain::entities::{Joke, Request, Response, SearchResult};
use crate::domain::errors::{ChuckError, Result};
use crate::domain::value_objects::{BaseUrl, Category, SearchQuery};
use async_trait::async_trait;
use hyper::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const RANDOM_PATH: &str = "/jokes/random";
const CATEGORIES_PATH: &str = "/jokes/categories";
const SEARCH_PATH: &str = "/jokes/search";

/// Default number of search matches kept when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Trait for HTTP clients to enable mocking and dependency inversion
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

/// The joke operations the command dispatcher depends on.
///
/// Every call issues at most one request and never retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JokeApi: Send + Sync {
    /// A random joke, optionally restricted to `category`.
    async fn fetch_random(&self, category: Option<String>) -> Result<Joke>;

    /// Category names, in the order the API lists them.
    async fn fetch_categories(&self) -> Result<Vec<String>>;

    /// Jokes matching `query`, truncated to the first `limit` matches.
    /// A blank query fails with [`ChuckError::Validation`] without any request.
    async fn search(&self, query: String, limit: usize) -> Result<SearchResult>;
}

/// [`JokeApi`] backed by the public joke API over an [`HttpClient`].
pub struct JokeService {
    http_client: Box<dyn HttpClient>,
    base_url: BaseUrl,
}

impl JokeService {
    pub fn new(http_client: Box<dyn HttpClient>, base_url: BaseUrl) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    async fn get(&self, request: Request) -> Result<Response> {
        debug!(endpoint = %request.endpoint, "sending request");
        let response = self.http_client.send(request).await?;
        debug!(status = %response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

#[async_trait]
impl JokeApi for JokeService {
    async fn fetch_random(&self, category: Option<String>) -> Result<Joke> {
        let category = category.as_deref().map(Category::new).transpose()?;
        let subject = match &category {
            Some(category) => format!("category \"{category}\""),
            None => "random joke".to_string(),
        };

        let request = RequestBuilder::new(&self.base_url)
            .path(RANDOM_PATH)
            .optional_query("category", category.as_ref().map(Category::as_str))
            .build()?;
        let response = self.get(request).await?;
        let body = ResponseValidator::successful_body(&response, &subject)?;

        if body.trim().is_empty() {
            return Err(ChuckError::NotFound(subject));
        }

        let joke: Joke = ResponseValidator::decode(body, "joke")?;
        ResponseValidator::validate_joke(&joke)?;
        Ok(joke)
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        let request = RequestBuilder::new(&self.base_url)
            .path(CATEGORIES_PATH)
            .build()?;
        let response = self.get(request).await?;
        let body = ResponseValidator::successful_body(&response, "category list")?;
        ResponseValidator::decode(body, "category list")
    }

    async fn search(&self, query: String, limit: usize) -> Result<SearchResult> {
        let query = SearchQuery::new(&query)?;

        let request = RequestBuilder::new(&self.base_url)
            .path(SEARCH_PATH)
            .query("query", query.as_str())
            .build()?;
        let response = self.get(request).await?;
        let body = ResponseValidator::successful_body(&response, "search")?;
        let payload: SearchPayload = ResponseValidator::decode(body, "search result")?;

        let result = payload.into_result();
        debug!(
            total = result.total,
            received = result.result.len(),
            limit,
            "truncating search results"
        );
        Ok(result.truncated(limit))
    }
}

/// Wire shape of the search endpoint; `total` is sometimes left out.
#[derive(Debug, Deserialize)]
struct SearchPayload {
    total: Option<u64>,
    result: Vec<Joke>,
}

impl SearchPayload {
    fn into_result(self) -> SearchResult {
        let total = self.total.unwrap_or(self.result.len() as u64);
        SearchResult {
            total,
            result: self.result,
        }
    }
}

/// Status and body checks shared by every endpoint
struct ResponseValidator;

impl ResponseValidator {
    fn successful_body<'r>(response: &'r Response, subject: &str) -> Result<&'r str> {
        let status = response.status;
        if status.is_success() {
            return Ok(&response.body);
        }

        debug!(%status, subject, "request rejected by the joke API");
        if status == StatusCode::NOT_FOUND {
            Err(ChuckError::NotFound(subject.to_string()))
        } else {
            Err(ChuckError::UnexpectedStatus(status.as_u16()))
        }
    }

    fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
        serde_json::from_str(body)
            .map_err(|e| ChuckError::InvalidResponse(format!("malformed {what}: {e}")))
    }

    fn validate_joke(joke: &Joke) -> Result<()> {
        if joke.id.is_empty() || joke.value.is_empty() {
            return Err(ChuckError::InvalidResponse(
                "joke is missing its id or text".to_string(),
            ));
        }
        Ok(())
    }
}
