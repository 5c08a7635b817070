//! Spec generation endpoint

use async_trait::async_trait;
use cherry_core::domain::spec::BuildSpecification;
use cherry_core::dto::spec::GenerateSpecRequest;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::{SpecGenerator, SpecGeneratorClient};

impl SpecGeneratorClient {
    /// POST a generation request and decode the returned specification
    ///
    /// # Errors
    /// - [`ClientError::Network`](crate::ClientError::Network) when the call cannot be completed
    /// - [`ClientError::Protocol`](crate::ClientError::Protocol) on a non-success status
    /// - [`ClientError::Decode`](crate::ClientError::Decode) when the body is not a specification
    pub async fn generate_spec(&self, req: &GenerateSpecRequest) -> Result<BuildSpecification> {
        let url = self.endpoint();
        info!(
            "Requesting build specification from {} (stack={}, enhanced={})",
            url,
            req.stack,
            req.is_enhanced()
        );

        let mut request = self.client.post(&url).json(req);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.inspect_err(|e| {
            warn!("Spec generator unreachable at {}: {}", url, e);
        })?;

        let spec = self.handle_response(response).await?;
        debug!(
            "Received specification '{}' with {} feature(s)",
            spec.name,
            spec.features.len()
        );

        Ok(spec)
    }
}

#[async_trait]
impl SpecGenerator for SpecGeneratorClient {
    async fn generate(&self, req: GenerateSpecRequest) -> Result<BuildSpecification> {
        self.generate_spec(&req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use cherry_core::domain::spec::FeatureFlags;
    use std::sync::{Arc, Mutex};

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request() -> GenerateSpecRequest {
        GenerateSpecRequest::new(
            "track daily habits",
            "productivity",
            "go-gin",
            FeatureFlags::pipeline_defaults(),
        )
    }

    #[tokio::test]
    async fn test_generate_success() {
        let seen: Arc<Mutex<Vec<GenerateSpecRequest>>> = Arc::default();
        let captured = seen.clone();
        let router = Router::new().route(
            "/api/generate-cherry",
            post(move |Json(req): Json<GenerateSpecRequest>| {
                let captured = captured.clone();
                async move {
                    captured.lock().unwrap().push(req.clone());
                    Json(serde_json::json!({
                        "name": "Habit Tracker",
                        "description": req.description,
                        "features": ["Fireproof Database", "Cloud Sync"],
                        "stack": req.stack,
                        "icon": "x"
                    }))
                }
            }),
        );
        let base = spawn_server(router).await;

        let client = SpecGeneratorClient::new(base);
        let spec = client.generate(request()).await.unwrap();

        assert_eq!(spec.name, "Habit Tracker");
        assert_eq!(spec.stack, "go-gin");
        assert_eq!(spec.features.len(), 2);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].include_database);
        assert!(seen[0].include_sync);
        assert!(!seen[0].include_auth);
        assert_eq!(seen[0].enhanced_mode, None);
    }

    #[tokio::test]
    async fn test_generate_server_error_is_protocol_error() {
        let router = Router::new().route(
            "/api/generate-cherry",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate cherry") }),
        );
        let base = spawn_server(router).await;

        let err = SpecGeneratorClient::new(base)
            .generate(request())
            .await
            .unwrap_err();

        assert!(err.is_protocol());
        match err {
            crate::ClientError::Protocol { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to generate cherry");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_non_ok_success_status_is_protocol_error() {
        let router = Router::new().route(
            "/api/generate-cherry",
            post(|| async {
                (
                    StatusCode::CREATED,
                    Json(serde_json::json!({
                        "name": "Habit Tracker",
                        "description": "track daily habits",
                        "features": [],
                        "stack": "go-gin",
                        "icon": "x"
                    })),
                )
            }),
        );
        let base = spawn_server(router).await;

        let err = SpecGeneratorClient::new(base)
            .generate(request())
            .await
            .unwrap_err();

        match err {
            crate::ClientError::Protocol { status, .. } => assert_eq!(status, 201),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_garbage_body_is_decode_error() {
        let router = Router::new().route(
            "/api/generate-cherry",
            post(|| async { "definitely not json" }),
        );
        let base = spawn_server(router).await;

        let err = SpecGeneratorClient::new(base)
            .generate(request())
            .await
            .unwrap_err();

        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_generate_connection_refused_is_network_error() {
        // Grab a free port, then close it so nothing is listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = SpecGeneratorClient::new(format!("http://{}", addr))
            .generate(request())
            .await
            .unwrap_err();

        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_enhanced_request_sets_mode_flags() {
        let seen: Arc<Mutex<Option<GenerateSpecRequest>>> = Arc::default();
        let captured = seen.clone();
        let router = Router::new().route(
            "/api/generate-cherry",
            post(move |Json(req): Json<GenerateSpecRequest>| {
                let captured = captured.clone();
                async move {
                    *captured.lock().unwrap() = Some(req);
                    Json(serde_json::json!({
                        "name": "Habit Tracker",
                        "description": "d",
                        "stack": "go-gin"
                    }))
                }
            }),
        );
        let base = spawn_server(router).await;

        SpecGeneratorClient::new(base)
            .generate_enhanced(request())
            .await
            .unwrap();

        let req = seen.lock().unwrap().clone().unwrap();
        assert_eq!(req.enhanced_mode, Some(true));
        assert_eq!(req.bug_free_mode, Some(true));
        assert!(req.description.contains("track daily habits"));
        assert!(req.description.len() > "track daily habits".len());
    }
}
