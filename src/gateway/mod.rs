//! Backend gateway — translates wizard actions into HTTP calls against
//! the image-generation backend and normalizes the results.

mod http;

pub use http::{GenerateResponse, HttpGateway};

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::session::{CapturedImage, GeneratedImage};

/// Boundary to the image-generation backend.
///
/// The two generation calls are structurally identical: upload the
/// captured photo, await a single generated artifact. Every failure mode
/// (transport, HTTP status, application-level) comes back as a
/// [`GatewayError`], never a panic. `check_health` is the one operation
/// that swallows rather than surfaces an error.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generate the visitor's profile image from the captured photo.
    async fn generate_profile(
        &self,
        image: &CapturedImage,
    ) -> Result<GeneratedImage, GatewayError>;

    /// Generate the visitor's talent-show image from the captured photo.
    async fn generate_talent(
        &self,
        image: &CapturedImage,
    ) -> Result<GeneratedImage, GatewayError>;

    /// Probe the backend. Transport errors are logged and reported as
    /// `false`.
    async fn check_health(&self) -> bool;
}
