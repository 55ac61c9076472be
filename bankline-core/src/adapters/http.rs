//! Banking API HTTP client
//!
//! Thin wrapper over `reqwest` that knows the base URL, attaches the stored
//! bearer token to every request, and normalizes failures into
//! [`Error::Api`] (server answered) or [`Error::Transport`] (it did not).

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::ports::{KeyValueStorage, TOKEN_KEY};

/// HTTP client for the banking REST API
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from loaded configuration
    pub fn new(config: &Config, storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        Self::new_with_base_url(&config.api_base_url, config.timeout_secs, storage)
    }

    /// Create a client against an explicit base URL
    pub fn new_with_base_url(
        base_url: &str,
        timeout_secs: u64,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }
        url::Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", trimmed, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            timeout_secs,
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::GET, path)?)
    }

    pub fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let builder = self.request(Method::GET, path)?;
        let builder = if query.is_empty() {
            builder
        } else {
            builder.query(query)
        };
        self.send(builder)
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path)?.json(body))
    }

    /// POST without a request body
    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::POST, path)?)
    }

    pub fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path)?.json(body))
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(self.request(Method::DELETE, path)?)
    }

    /// Upload a single file as a multipart form field
    pub fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file: &Path,
    ) -> Result<T> {
        let part = multipart::Part::file(file)?;
        let form = multipart::Form::new().part(field.to_string(), part);
        self.send(self.request(Method::POST, path)?.multipart(form))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");

        if let Some(token) = self.storage.get(TOKEN_KEY)? {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        Ok(builder)
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().map_err(|e| self.map_request_error(e))?;
        let status = response.status();
        let body = response.text().map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "api error response");
            return Err(Error::api(status.as_u16(), &body));
        }

        // 204 and empty 200s still have to produce a typed envelope
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(|e| {
            Error::Other(format!("Unexpected response from server: {}", e))
        })
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport(format!(
                "Connection timed out after {} seconds",
                self.timeout_secs
            ))
        } else if error.is_connect() {
            Error::transport(format!("Unable to connect to {}", self.base_url))
        } else {
            Error::transport(format!("Request failed: {}", error))
        }
    }
}
