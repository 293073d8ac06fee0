//! HTTP Client Adapter
//!
//! `ResourceApi` over reqwest. Attaches the bearer token and turns every
//! failure into an `AdminError`. Built explicitly from a `ClientConfig` and
//! handed to the views; there is no process-wide client.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::api::ResourceApi;
use crate::error::AdminError;
use crate::record::{EntityId, FieldMap};

pub const DEFAULT_NOTICE_MS: u32 = 3000;

// ========================
// Configuration
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Empty (same origin), root-relative (`/backend`) or absolute http(s)
    pub api_base: String,
    pub auth_token: Option<String>,
    /// How long save/delete notices stay visible
    pub notice_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            auth_token: None,
            notice_ms: DEFAULT_NOTICE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid admin config: {0}")]
    Parse(String),
    #[error("api_base must be empty, root-relative or an absolute http(s) URL, got `{0}`")]
    InvalidBase(String),
}

impl ClientConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validated()
    }

    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        self.auth_token = self.auth_token.filter(|t| !t.trim().is_empty());

        if self.api_base.is_empty() || self.is_root_relative() {
            return Ok(self);
        }
        match Url::parse(&self.api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(self),
            _ => Err(ConfigError::InvalidBase(self.api_base)),
        }
    }

    fn is_root_relative(&self) -> bool {
        self.api_base.starts_with('/') && !self.api_base.starts_with("//")
    }

    /// Make a same-origin or root-relative base absolute (reqwest needs
    /// absolute URLs, also in the browser)
    pub fn resolve_against(mut self, origin: &str) -> Self {
        if self.api_base.is_empty() || self.is_root_relative() {
            self.api_base = format!("{}{}", origin.trim_end_matches('/'), self.api_base);
        }
        self
    }

    /// Join the base with a resource path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

// ========================
// Client
// ========================

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url_for(path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.config.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, AdminError> {
        let response = builder.send().await.map_err(|e| {
            warn!("request failed before a response: {}", e);
            AdminError::network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = AdminError::from_response(status.as_u16(), &body);
        warn!("server error {}: {:?}", status, err.server_message());
        Err(err)
    }

    async fn json(&self, builder: RequestBuilder) -> Result<Value, AdminError> {
        let response = self.send(builder).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| AdminError::decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl ResourceApi for HttpClient {
    async fn list(&self, path: &str) -> Result<Vec<Value>, AdminError> {
        match self.json(self.request(Method::GET, path)).await? {
            Value::Array(rows) => Ok(rows),
            other => Err(AdminError::decode(format!(
                "expected an array from {}, got {}",
                path,
                crate::record::json_type_name(&other)
            ))),
        }
    }

    async fn create(&self, path: &str, fields: &FieldMap) -> Result<Value, AdminError> {
        self.json(self.request(Method::POST, path).json(fields)).await
    }

    async fn update(&self, path: &str, id: EntityId, fields: &FieldMap) -> Result<Value, AdminError> {
        let item = format!("{}/{}", path.trim_end_matches('/'), id);
        self.json(self.request(Method::PUT, &item).json(fields)).await
    }

    async fn delete(&self, path: &str, id: EntityId) -> Result<(), AdminError> {
        let item = format!("{}/{}", path.trim_end_matches('/'), id);
        self.send(self.request(Method::DELETE, &item)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::from_json("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.notice_ms, DEFAULT_NOTICE_MS);
    }

    #[test]
    fn test_config_normalizes() {
        let config =
            ClientConfig::from_json(r#"{"api_base": "https://cms.example.com/", "auth_token": " "}"#).unwrap();
        assert_eq!(config.api_base, "https://cms.example.com");
        assert_eq!(config.auth_token, None);
        assert_eq!(config.url_for("/api/quotes"), "https://cms.example.com/api/quotes");
    }

    #[test]
    fn test_config_rejects_bad_base() {
        let err = ClientConfig::from_json(r#"{"api_base": "ftp://x"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBase(_)));

        let err = ClientConfig::from_json(r#"{"api_base": "cms.example.com"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBase(_)));

        let err = ClientConfig::from_json(r#"{"notice_ms": "soon"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_resolve_against_origin() {
        let same_origin = ClientConfig::default().resolve_against("http://localhost:8080/");
        assert_eq!(same_origin.url_for("api/books"), "http://localhost:8080/api/books");

        let prefixed = ClientConfig::from_json(r#"{"api_base": "/backend"}"#)
            .unwrap()
            .resolve_against("http://localhost:8080");
        assert_eq!(prefixed.api_base, "http://localhost:8080/backend");

        let absolute = ClientConfig::from_json(r#"{"api_base": "https://cms.example.com"}"#)
            .unwrap()
            .resolve_against("http://localhost:8080");
        assert_eq!(absolute.api_base, "https://cms.example.com");
    }
}
