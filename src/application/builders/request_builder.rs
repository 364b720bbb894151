use crate::domain::entities::Request;
use crate::domain::errors::Result;
use crate::domain::value_objects::BaseUrl;

const USER_AGENT: &str = concat!("chuck/", env!("CARGO_PKG_VERSION"));

/// Assembles a GET request against the joke API.
pub struct RequestBuilder<'a> {
    base_url: &'a BaseUrl,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(base_url: &'a BaseUrl) -> Self {
        Self {
            base_url,
            path: String::from("/"),
            query: Vec::new(),
            headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
            ],
        }
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the pair only when a value is present.
    pub fn optional_query(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn build(self) -> Result<Request> {
        let endpoint = self.base_url.endpoint(&self.path, &self.query)?;
        Ok(Request {
            endpoint,
            headers: self.headers,
        })
    }
}
