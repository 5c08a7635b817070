//! Cherry Spec Generator Client
//!
//! A small, type-safe HTTP client for the remote service that turns a
//! natural-language description into a structured build specification.
//!
//! Every call is a single attempt: there is no retry or backoff. A flaky
//! service surfaces as an error and the caller re-initiates.
//!
//! # Example
//!
//! ```no_run
//! use cherry_client::{SpecGenerator, SpecGeneratorClient};
//! use cherry_core::domain::spec::FeatureFlags;
//! use cherry_core::dto::spec::GenerateSpecRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SpecGeneratorClient::new("http://localhost:3000");
//!
//!     let spec = client
//!         .generate(GenerateSpecRequest::new(
//!             "A simple calculator with basic math operations",
//!             "productivity",
//!             "go-gin",
//!             FeatureFlags::default(),
//!         ))
//!         .await?;
//!
//!     println!("Generated spec: {}", spec.name);
//!     Ok(())
//! }
//! ```

pub mod error;
mod generate;
pub mod prompt;

pub use error::{ClientError, Result};

use async_trait::async_trait;
use cherry_core::domain::spec::BuildSpecification;
use cherry_core::dto::spec::GenerateSpecRequest;
use reqwest::Client;
use std::time::Duration;

/// Path of the generation endpoint, relative to the base URL
pub const GENERATE_PATH: &str = "/api/generate-cherry";

/// Anything that can produce a build specification from a request
///
/// The orchestrator depends on this trait rather than on the HTTP client so
/// tests can substitute a fake.
#[async_trait]
pub trait SpecGenerator: Send + Sync {
    /// Generates a specification using the request exactly as given
    async fn generate(&self, req: GenerateSpecRequest) -> Result<BuildSpecification>;

    /// Generates a specification with the richer enhanced-mode prompt
    async fn generate_enhanced(&self, req: GenerateSpecRequest) -> Result<BuildSpecification> {
        self.generate(prompt::enhance(req)).await
    }
}

/// HTTP client for the Spec Generator service
#[derive(Debug, Clone)]
pub struct SpecGeneratorClient {
    /// Base URL of the service (e.g., "http://localhost:3000")
    base_url: String,
    /// Optional bearer credential forwarded to the service
    api_key: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl SpecGeneratorClient {
    /// Create a new client with default HTTP settings
    ///
    /// # Example
    /// ```
    /// use cherry_client::SpecGeneratorClient;
    ///
    /// let client = SpecGeneratorClient::new("http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            client,
        }
    }

    /// Create a new client whose requests time out after `timeout`
    ///
    /// A timed-out request is reported as [`ClientError::Network`].
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Attach the AI credential; blank keys are ignored
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = (!api_key.trim().is_empty()).then_some(api_key);
        self
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the generation endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Checks the status code and decodes a build specification
    ///
    /// Any status other than 200 becomes [`ClientError::Protocol`]; a body that
    /// is not a specification with a non-empty name becomes [`ClientError::Decode`].
    async fn handle_response(&self, response: reqwest::Response) -> Result<BuildSpecification> {
        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::protocol(status.as_u16(), error_text));
        }

        let body = response.bytes().await?;
        decode_specification(&body)
    }
}

/// Parses a response body into a specification
pub(crate) fn decode_specification(body: &[u8]) -> Result<BuildSpecification> {
    let spec: BuildSpecification = serde_json::from_slice(body)
        .map_err(|e| ClientError::Decode(format!("Failed to parse JSON response: {}", e)))?;

    if spec.name.trim().is_empty() {
        return Err(ClientError::Decode(
            "specification has an empty name".to_string(),
        ));
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SpecGeneratorClient::new("http://localhost:3000");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.endpoint(), "http://localhost:3000/api/generate-cherry");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = SpecGeneratorClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let client = SpecGeneratorClient::new("http://localhost:3000").with_api_key("  ");
        assert!(client.api_key.is_none());

        let client = client.with_api_key("sk-1");
        assert_eq!(client.api_key.as_deref(), Some("sk-1"));
    }

    #[test]
    fn test_decode_rejects_empty_name() {
        let err = decode_specification(br#"{"name":"","description":"d","stack":"static"}"#)
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let err = decode_specification(br#"{"name":"x"}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_decode_valid_body() {
        let spec = decode_specification(
            br#"{"name":"Notes","description":"d","features":["a"],"stack":"static"}"#,
        )
        .unwrap();
        assert_eq!(spec.name, "Notes");
        assert_eq!(spec.features, vec!["a"]);
    }
}
