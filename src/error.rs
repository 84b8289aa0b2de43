//! Error types for the dropboxlib library.

use thiserror::Error;

use crate::api::ErrorCode;

/// Main error type for dropboxlib operations.
#[derive(Error, Debug)]
pub enum DropboxError {
    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The service rejected the request with a non-success status.
    #[error("API error {status} ({code:?}): {message}")]
    ApiError {
        code: ErrorCode,
        status: u16,
        message: String,
    },

    /// Request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Operation requires an access token but none is installed.
    #[error("Not authenticated: call authenticate() or set_access_token() first")]
    Unauthenticated,

    /// The session already holds an access token.
    #[error("Session already authenticated")]
    AlreadyAuthenticated,

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// OAuth signing failed.
    #[error("Signing error: {0}")]
    SigningError(String),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl DropboxError {
    /// The result-taxonomy code for this error.
    ///
    /// `ApiError` carries the code the service answered with; local
    /// precondition failures map onto the same taxonomy so callers can
    /// branch uniformly.
    pub fn code(&self) -> ErrorCode {
        match self {
            DropboxError::ApiError { code, .. } => *code,
            DropboxError::Unauthenticated => ErrorCode::AuthError,
            _ => ErrorCode::Unknown,
        }
    }
}

/// Result type alias for dropboxlib operations.
pub type Result<T> = std::result::Result<T, DropboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_code() {
        let err = DropboxError::ApiError {
            code: ErrorCode::NotFound,
            status: 404,
            message: "File not found".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_unauthenticated_maps_to_auth_error() {
        assert_eq!(DropboxError::Unauthenticated.code(), ErrorCode::AuthError);
    }

    #[test]
    fn test_other_errors_map_to_unknown() {
        assert_eq!(DropboxError::Timeout.code(), ErrorCode::Unknown);
        assert_eq!(
            DropboxError::Custom("x".to_string()).code(),
            ErrorCode::Unknown
        );
    }
}
