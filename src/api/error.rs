//! Error types for backend requests.
//!
//! Transport and decode failures are kept apart here but are collapsed into a
//! single log line by the dashboard controller.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a readable response body
    #[error("{0}")]
    Transport(String),

    /// The body was not valid JSON or did not match the expected shape
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_is_passed_through() {
        let err = ApiError::Transport("network down".to_string());
        assert_eq!(err.to_string(), "network down");
    }

    #[test]
    fn test_decode_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.to_string().contains("expected value"));
    }
}
