//! HTTP gateway implementation — multipart uploads via reqwest.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::KioskConfig;
use crate::error::GatewayError;
use crate::session::{CAPTURE_FILENAME, CapturedImage, GeneratedImage};

use super::GenerationGateway;

/// Fallback diagnostic when the backend reports failure without a message.
const DEFAULT_FAILURE_MESSAGE: &str = "Image generation failed";

/// Content type of the uploaded capture.
const CAPTURE_MIME: &str = "image/jpeg";

/// Decoded body of both generation endpoints.
///
/// The backend always returns 2xx with `success: false` for
/// application-level failures, so `image_url` and `filename` may be
/// absent on that path.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// reqwest-backed gateway against a fixed base origin.
///
/// Generation calls and the health probe use separate clients so the
/// probe can fail fast while generation waits out the backend's
/// pipeline.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
    health_client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &KioskConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let health_client = reqwest::Client::builder()
            .timeout(config.health_timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            client,
            health_client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Upload the captured photo to a generation endpoint and decode the
    /// response, normalizing every failure path into a [`GatewayError`].
    async fn generate(
        &self,
        path: &str,
        image: &CapturedImage,
    ) -> Result<GeneratedImage, GatewayError> {
        let part = Part::bytes(image.as_bytes().to_vec())
            .file_name(CAPTURE_FILENAME)
            .mime_str(CAPTURE_MIME)
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(self.endpoint(path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        if !body.success {
            return Err(GatewayError::Application {
                message: body
                    .message
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            });
        }

        Ok(GeneratedImage {
            url: body.image_url,
            filename: body.filename,
        })
    }
}

#[async_trait]
impl GenerationGateway for HttpGateway {
    async fn generate_profile(
        &self,
        image: &CapturedImage,
    ) -> Result<GeneratedImage, GatewayError> {
        tracing::info!(bytes = image.len(), "Requesting profile generation");
        let artifact = self.generate("/api/generate/profile", image).await?;
        tracing::info!(url = %artifact.url, "Profile generation complete");
        Ok(artifact)
    }

    async fn generate_talent(
        &self,
        image: &CapturedImage,
    ) -> Result<GeneratedImage, GatewayError> {
        tracing::info!(bytes = image.len(), "Requesting talent generation");
        let artifact = self.generate("/api/generate/talent", image).await?;
        tracing::info!(url = %artifact.url, "Talent generation complete");
        Ok(artifact)
    }

    async fn check_health(&self) -> bool {
        match self
            .health_client
            .get(self.endpoint("/health"))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::warn!("Backend health probe failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn unreachable_gateway() -> HttpGateway {
        // Port 1 is never bound in the test environment; connections are
        // refused immediately.
        let config = KioskConfig {
            backend_url: "http://127.0.0.1:1".into(),
            request_timeout: Duration::from_secs(2),
            health_timeout: Duration::from_secs(2),
        };
        HttpGateway::new(&config).unwrap()
    }

    fn jpeg() -> CapturedImage {
        CapturedImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]).unwrap()
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let config = KioskConfig {
            backend_url: "http://localhost:8000".into(),
            ..KioskConfig::default()
        };
        let gw = HttpGateway::new(&config).unwrap();
        assert_eq!(
            gw.endpoint("/api/generate/profile"),
            "http://localhost:8000/api/generate/profile"
        );
        assert_eq!(gw.endpoint("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let config = KioskConfig {
            backend_url: "http://localhost:8000/".into(),
            ..KioskConfig::default()
        };
        let gw = HttpGateway::new(&config).unwrap();
        assert_eq!(gw.endpoint("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn response_decodes_success_body() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"success": true, "image_url": "http://b/img.png", "filename": "img.png"}"#,
        )
        .unwrap();
        assert!(body.success);
        assert_eq!(body.image_url, "http://b/img.png");
        assert_eq!(body.filename, "img.png");
        assert!(body.message.is_none());
    }

    #[test]
    fn response_decodes_failure_body_without_artifact_fields() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"success": false, "message": "face not detected"}"#).unwrap();
        assert!(!body.success);
        assert_eq!(body.message.as_deref(), Some("face not detected"));
        assert!(body.image_url.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_normalized_with_hint() {
        let gw = unreachable_gateway();
        let err = gw.generate_profile(&jpeg()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
        assert!(err.user_message().contains("backend server is running"));
    }

    #[tokio::test]
    async fn health_check_swallows_transport_errors() {
        let gw = unreachable_gateway();
        assert!(!gw.check_health().await);
    }
}
