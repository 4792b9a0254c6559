//! Error types for Photo Kiosk.

use crate::session::Screen;

/// Wizard event errors — the caller fired an event the current screen
/// does not accept, or a precondition is unmet.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Event '{event}' is not valid on screen {screen}")]
    InvalidEvent { event: &'static str, screen: Screen },

    #[error("Both consent items must be granted before proceeding")]
    ConsentRequired,

    #[error("No captured photo available")]
    MissingCapture,

    #[error("Invalid captured image: {0}")]
    InvalidImage(String),
}

/// Backend gateway errors.
///
/// The taxonomy distinguishes where a generation call went wrong; the
/// controller never matches on variants and surfaces only
/// [`GatewayError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Could not reach the generation backend: {0}")]
    Transport(String),

    #[error("Generation backend returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("{message}")]
    Application { message: String },

    #[error("Could not decode backend response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// The diagnostic shown to the visitor, with a hint covering the most
    /// common kiosk failure: nobody started the backend.
    pub fn user_message(&self) -> String {
        format!("{self}. Check whether the backend server is running.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_appends_backend_hint() {
        let err = GatewayError::Transport("connection refused".into());
        let msg = err.user_message();
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("backend server is running"));
    }

    #[test]
    fn application_error_carries_backend_message() {
        let err = GatewayError::Application {
            message: "face not detected".into(),
        };
        assert_eq!(err.to_string(), "face not detected");
        assert!(err.user_message().contains("face not detected"));
    }

    #[test]
    fn http_status_error_names_the_status() {
        let err = GatewayError::HttpStatus { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
