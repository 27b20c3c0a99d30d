//! Error types surfaced by the fetch and geolocation paths.

use reqwest::StatusCode;
use thiserror::Error;

/// The one message shown in place of the content region when a load fails.
pub const FETCH_FAILURE_MESSAGE: &str =
    "Unable to fetch weather data. Please check your API key and try again.";

/// Any failure while retrieving weather or suggestion data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("WeatherAPI {endpoint} request failed with status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("Failed to parse WeatherAPI {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// User-facing text. Every variant maps to the same message; the cause
    /// only goes to the logs.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILURE_MESSAGE
    }
}

/// Why a location lookup produced no coordinates.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    Denied,

    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Location request timed out")]
    Timeout,

    #[error("Location lookup failed: {0}")]
    Lookup(String),
}

impl GeolocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unsupported => "Geolocation is not supported on this device",
            Self::Denied | Self::Timeout | Self::Lookup(_) => "Unable to get your location",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_share_one_user_message() {
        let status = FetchError::Status {
            endpoint: "current",
            status: StatusCode::UNAUTHORIZED,
        };
        let decode = FetchError::Decode {
            endpoint: "forecast",
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };

        assert_eq!(status.user_message(), FETCH_FAILURE_MESSAGE);
        assert_eq!(decode.user_message(), FETCH_FAILURE_MESSAGE);
        assert!(status.to_string().contains("401"));
        assert!(decode.to_string().contains("forecast"));
    }

    #[test]
    fn geolocation_messages() {
        assert!(GeolocationError::Unsupported.user_message().contains("not supported"));
        assert_eq!(GeolocationError::Denied.user_message(), "Unable to get your location");
        assert_eq!(GeolocationError::Timeout.user_message(), "Unable to get your location");
    }
}
