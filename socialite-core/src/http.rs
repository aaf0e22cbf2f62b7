use serde::de::DeserializeOwned;

use crate::config::HttpConfig;
use crate::AuthError;

/// A thin wrapper around [`reqwest::Client`] shared by all providers.
///
/// Parameters are sent as a query string for `GET` and as a form body for
/// `POST`. The response status is not inspected: the providers report
/// failures inside HTTP 200 bodies, so every body is handed to the caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl Default for HttpClient {
    /// A client with the default [`HttpConfig`] (5 second timeout).
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
            .unwrap_or_else(|_| Self::new(reqwest::Client::new()))
    }
}

impl HttpClient {
    /// Wrap an existing `reqwest` client.
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Build a client from [`HttpConfig`].
    pub fn from_config(config: &HttpConfig) -> Result<Self, AuthError> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let inner = builder
            .build()
            .map_err(|e| AuthError::InvalidArgument(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { inner })
    }

    /// Send a `GET` request and return the raw response body.
    pub async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<String, AuthError> {
        tracing::debug!(method = "GET", url, "sending request");
        let response = self.inner.get(url).query(params).send().await?;
        Self::read_body(response).await
    }

    /// Send a form-encoded `POST` request and return the raw response body.
    pub async fn post(&self, url: &str, params: &[(&str, &str)]) -> Result<String, AuthError> {
        tracing::debug!(method = "POST", url, "sending request");
        let response = self.inner.post(url).form(params).send().await?;
        Self::read_body(response).await
    }

    /// Send a `GET` request and decode the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AuthError> {
        let body = self.get(url, params).await?;
        decode_json(&body)
    }

    /// Send a form-encoded `POST` request and decode the JSON response body.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AuthError> {
        let body = self.post(url, params).await?;
        decode_json(&body)
    }

    async fn read_body(response: reqwest::Response) -> Result<String, AuthError> {
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");
        Ok(response.text().await?)
    }
}

/// Decode a JSON body, reporting failures as [`AuthError::Decode`].
pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, AuthError> {
    serde_json::from_str(body).map_err(|e| AuthError::decode("Failed to parse response", e))
}
