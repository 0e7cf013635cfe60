use crate::config::Config;
use crate::error::{GeoError, Result};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

/// HTTP client bound to one backend base URL.
///
/// Every call uses the configured timeout. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode its JSON body.
    ///
    /// Non-2xx answers become `GeoError::Status`; an empty body decodes
    /// to `Value::Null`.
    pub(crate) async fn send(&self, path: &str, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "request failed");
            GeoError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), %body, "server rejected request");
            return Err(GeoError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        tracing::debug!(path, status = status.as_u16(), body = %text, "response");
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
