//! Configuration types.

use std::time::Duration;

/// Kiosk configuration.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    /// Base origin of the image-generation backend.
    pub backend_url: String,
    /// Timeout for the two generation calls. Generous, since the backend
    /// runs a full generation pipeline per upload.
    pub request_timeout: Duration,
    /// Timeout for the health probe.
    pub health_timeout: Duration,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(120),
            health_timeout: Duration::from_secs(5),
        }
    }
}

impl KioskConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// Recognized: `KIOSK_BACKEND_URL`, `KIOSK_REQUEST_TIMEOUT_SECS`,
    /// `KIOSK_HEALTH_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("KIOSK_BACKEND_URL") {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.backend_url = url.to_string();
            }
        }

        if let Ok(secs) = std::env::var("KIOSK_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = secs
                .parse()
                .map(Duration::from_secs)
                .unwrap_or(config.request_timeout);
        }

        if let Ok(secs) = std::env::var("KIOSK_HEALTH_TIMEOUT_SECS") {
            config.health_timeout = secs
                .parse()
                .map(Duration::from_secs)
                .unwrap_or(config.health_timeout);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = KioskConfig::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert!(config.request_timeout > config.health_timeout);
    }
}
