use crate::application::services::{HttpClient, JokeService};
use crate::domain::entities::{Request, Response};
use crate::domain::errors::{ChuckError, Result};
use crate::domain::value_objects::{BaseUrl, Endpoint};

use async_trait::async_trait;
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Method, Request as HyperRequest};
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use std::error::Error as StdError;
use std::time::Duration;
use tokio_native_tls::native_tls;
use tracing::debug;

type HttpsClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// Infrastructure implementation of HttpClient using Hyper
/// This is a low-level HTTP transport that the joke service uses.
/// The whole exchange, connect through body, is bounded by `timeout`.
pub struct HyperHttpClient {
    client: HttpsClient,
    timeout: Duration,
}

impl HyperHttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let tls = native_tls::TlsConnector::new()
            .map_err(|e| ChuckError::Transport(format!("TLS setup failed: {e}")))?;

        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(timeout));

        let connector = HttpsConnector::from((http, tokio_native_tls::TlsConnector::from(tls)));
        let client = Client::builder(TokioExecutor::new()).build::<_, Empty<Bytes>>(connector);
        Ok(Self { client, timeout })
    }

    /// Creates a joke service that talks to `base_url` through this client
    pub fn create_joke_service(self, base_url: BaseUrl) -> JokeService {
        JokeService::new(Box::new(self), base_url)
    }

    async fn execute_http_request(
        &self,
        request: HyperRequest<Empty<Bytes>>,
    ) -> Result<hyper::Response<hyper::body::Incoming>> {
        self.client
            .request(request)
            .await
            .map_err(|e| ErrorAdapter::from_client_error(&e, self.timeout))
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn send(&self, request: Request) -> Result<Response> {
        let hyper_request = RequestAdapter::to_hyper_request(request)?;
        let exchange = async {
            let hyper_response = self.execute_http_request(hyper_request).await?;
            ResponseAdapter::to_domain_response(hyper_response).await
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => {
                debug!(timeout_secs = self.timeout.as_secs(), "request deadline elapsed");
                Err(ChuckError::Timeout(self.timeout))
            }
        }
    }
}

/// Adapter for converting domain requests to Hyper requests
struct RequestAdapter;

impl RequestAdapter {
    fn to_hyper_request(domain_request: Request) -> Result<HyperRequest<Empty<Bytes>>> {
        let mut builder = HyperRequest::builder()
            .method(Method::GET)
            .uri(UriAdapter::to_hyper_uri(&domain_request.endpoint));

        builder = HeaderAdapter::add_headers(builder, &domain_request.headers)?;

        builder
            .body(Empty::new())
            .map_err(|e| ChuckError::Transport(format!("Failed to build HTTP request: {e}")))
    }
}

/// Adapter for converting domain responses from Hyper responses
struct ResponseAdapter;

impl ResponseAdapter {
    async fn to_domain_response(
        hyper_response: hyper::Response<hyper::body::Incoming>,
    ) -> Result<Response> {
        let status = hyper_response.status();
        let body = Self::extract_response_body(hyper_response).await?;

        Ok(Response { status, body })
    }

    async fn extract_response_body(
        response: hyper::Response<hyper::body::Incoming>,
    ) -> Result<String> {
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ChuckError::Transport(format!("Failed to read response body: {e}")))?
            .to_bytes();

        String::from_utf8(body_bytes.to_vec()).map_err(|e| {
            ChuckError::InvalidResponse(format!("Response body contains invalid UTF-8: {e}"))
        })
    }
}

/// Adapter for converting domain endpoints to Hyper URIs
struct UriAdapter;

impl UriAdapter {
    fn to_hyper_uri(endpoint: &Endpoint) -> hyper::Uri {
        endpoint.0.clone()
    }
}

/// Adapter for handling HTTP headers
struct HeaderAdapter;

impl HeaderAdapter {
    fn add_headers(
        mut builder: http::request::Builder,
        headers: &[(String, String)],
    ) -> Result<http::request::Builder> {
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ChuckError::Transport(format!("Invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ChuckError::Transport(format!("Invalid header value: {e}")))?;
            builder = builder.header(name, value);
        }
        Ok(builder)
    }
}

/// Adapter for classifying client failures into domain errors
struct ErrorAdapter;

impl ErrorAdapter {
    fn from_client_error(
        error: &hyper_util::client::legacy::Error,
        timeout: Duration,
    ) -> ChuckError {
        if Self::timed_out(error) {
            return ChuckError::Timeout(timeout);
        }

        let mut detail = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        ChuckError::Transport(detail)
    }

    fn timed_out(error: &(dyn StdError + 'static)) -> bool {
        let mut current: Option<&(dyn StdError + 'static)> = Some(error);
        while let Some(cause) = current {
            if let Some(io) = cause.downcast_ref::<std::io::Error>() {
                if io.kind() == std::io::ErrorKind::TimedOut {
                    return true;
                }
            }
            current = cause.source();
        }
        false
    }
}
