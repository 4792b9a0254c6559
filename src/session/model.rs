//! Session record — in-memory wizard progress for one visit.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;

use super::screen::{PendingJob, Screen};

/// Upload filename the backend expects for the captured photo.
pub const CAPTURE_FILENAME: &str = "captured_image.jpg";

/// The two consent items the visitor must grant before capture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentForm {
    /// Collection and use of personal data.
    pub personal_data: bool,
    /// Use of the visitor's likeness in generated images.
    pub likeness_rights: bool,
}

impl ConsentForm {
    /// The agree action is enabled only when both items are granted.
    pub fn all_granted(&self) -> bool {
        self.personal_data && self.likeness_rights
    }
}

/// A still photo confirmed by the visitor, held as encoded JPEG bytes.
///
/// The camera collaborator delivers either raw bytes or a
/// `data:image/jpeg;base64,...` URL; the kiosk core treats the content
/// as opaque.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    bytes: Vec<u8>,
}

impl CapturedImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SessionError> {
        if bytes.is_empty() {
            return Err(SessionError::InvalidImage("empty image payload".into()));
        }
        Ok(Self { bytes })
    }

    /// Decode a base64 data URL as produced by the webcam collaborator.
    /// A bare base64 string (no `data:...,` prefix) is accepted too.
    pub fn from_data_url(data_url: &str) -> Result<Self, SessionError> {
        let encoded = match data_url.split_once(',') {
            Some((_, rest)) => rest,
            None => data_url,
        };
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| SessionError::InvalidImage(format!("invalid base64 payload: {e}")))?;
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for CapturedImage {
    // Keep raw image bytes out of logs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Reference to a backend-hosted generated artifact.
///
/// The QR-rendering collaborator consumes `url` read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    pub filename: String,
}

/// In-memory record of wizard progress for one visit.
///
/// Only the wizard controller mutates it, always on one logical thread.
/// The optional fields populate monotonically as the visitor advances:
/// a profile image is never stored before a capture, and a talent image
/// never before a profile image. Never persisted; reset discards it.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub screen: Screen,
    pub consent: ConsentForm,
    pub captured_image: Option<CapturedImage>,
    pub profile_image: Option<GeneratedImage>,
    pub talent_image: Option<GeneratedImage>,
    /// The generation call in flight while on [`Screen::Pending`].
    pub pending: Option<PendingJob>,
    /// Diagnostic from the most recent failed generation call.
    pub last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            screen: Screen::Consent,
            consent: ConsentForm::default(),
            captured_image: None,
            profile_image: None,
            talent_image: None,
            pending: None,
            last_error: None,
        }
    }

    /// Discard all progress and start a fresh visit on the consent screen.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
