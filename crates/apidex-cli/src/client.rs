//! HTTP client for an apidex gateway.
//!
//! This module fetches the catalog document and invokes endpoints on behalf
//! of the explorer.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use apidex_core::CatalogDocument;

/// Path of the settings document on the gateway.
pub const SETTINGS_PATH: &str = "/src/settings.json";

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// A successful endpoint response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON body.
    Json(serde_json::Value),
    /// An `image/*` body.
    Image {
        /// Declared content type.
        content_type: String,
        /// Raw bytes.
        bytes: Vec<u8>,
    },
}

/// Client for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a new gateway client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the gateway (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a gateway path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Fetch and parse the catalog document.
    pub async fn fetch_catalog(&self) -> Result<CatalogDocument, ClientError> {
        let response = self.client.get(self.url_for(SETTINGS_PATH)).send().await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        CatalogDocument::from_json(&text).map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// `GET` an absolute URL and classify the body.
    ///
    /// A non-success status is an error; its body is never read.
    pub async fn fetch(&self, url: &str) -> Result<Payload, ClientError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "Endpoint returned an error status");
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        match content_type {
            Some(content_type) if content_type.starts_with("image/") => {
                let bytes = response.bytes().await?.to_vec();
                Ok(Payload::Image {
                    content_type,
                    bytes,
                })
            }
            _ => {
                let text = response.text().await?;
                let value =
                    serde_json::from_str(&text).map_err(|e| ClientError::Parse(e.to_string()))?;
                Ok(Payload::Json(value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn url_for_joins_paths() {
        let client = GatewayClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url_for("/a?b=1"), "http://localhost:8080/a?b=1");
        assert_eq!(client.url_for("a"), "http://localhost:8080/a");
    }

    #[tokio::test]
    async fn fetches_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SETTINGS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Mocked",
                "categories": [{ "name": "Tools", "items": [] }]
            })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let doc = client.fetch_catalog().await.unwrap();
        assert_eq!(doc.name.as_deref(), Some("Mocked"));
        assert_eq!(doc.categories.len(), 1);
    }

    #[tokio::test]
    async fn malformed_catalog_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SETTINGS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "x" })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let err = client.fetch_catalog().await.unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[tokio::test]
    async fn json_payloads_are_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tools/echo"))
            .and(query_param("text", "hi"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"status": true, "result": "hi"})),
            )
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let payload = client
            .fetch(&client.url_for("/tools/echo?text=hi"))
            .await
            .unwrap();
        assert_eq!(payload, Payload::Json(json!({"status": true, "result": "hi"})));
    }

    #[tokio::test]
    async fn image_payloads_keep_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/pixel"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1_u8, 2, 3], "image/png"))
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let payload = client.fetch(&client.url_for("/media/pixel")).await.unwrap();
        assert_eq!(
            payload,
            Payload::Image {
                content_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }
        );
    }

    #[tokio::test]
    async fn error_status_is_reported_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let err = client.fetch(&client.url_for("/missing")).await.unwrap_err();
        assert!(matches!(err, ClientError::Status(404)));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }
}
