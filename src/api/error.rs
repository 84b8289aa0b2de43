//! Result codes derived from Dropbox API v1 HTTP statuses.

/// Result code for every remote operation.
///
/// `Success` and `PartialContent` are the two success variants; everything
/// else is a failure. `PartialContent` is returned when a byte-range fetch
/// succeeds and callers must branch on it, it is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Operation completed (HTTP 200)
    Success,
    /// Byte-range fetch completed (HTTP 206)
    PartialContent,
    /// Malformed request parameters (HTTP 400/406)
    BadInput,
    /// Bad or expired OAuth credentials (HTTP 401)
    AuthError,
    /// Naming collision, e.g. folder already exists or destination occupied (HTTP 403)
    Conflict,
    /// Target path does not exist (HTTP 404)
    NotFound,
    /// Wrong HTTP method for the endpoint (HTTP 405)
    MethodNotAllowed,
    /// Requested byte range lies outside the file (HTTP 416)
    RangeNotSatisfiable,
    /// Rate limited or service unavailable (HTTP 429/503)
    RateLimited,
    /// Account storage quota exceeded (HTTP 507)
    QuotaExceeded,
    /// Other server-side failure (HTTP 5xx)
    ServerError,
    /// Anything else
    Unknown,
}

impl ErrorCode {
    /// Map an HTTP status to a result code.
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => ErrorCode::Success,
            206 => ErrorCode::PartialContent,
            400 | 406 => ErrorCode::BadInput,
            401 => ErrorCode::AuthError,
            403 => ErrorCode::Conflict,
            404 => ErrorCode::NotFound,
            405 => ErrorCode::MethodNotAllowed,
            416 => ErrorCode::RangeNotSatisfiable,
            429 | 503 => ErrorCode::RateLimited,
            507 => ErrorCode::QuotaExceeded,
            500..=599 => ErrorCode::ServerError,
            _ => ErrorCode::Unknown,
        }
    }

    /// Whether this code represents a successful operation.
    pub fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success | ErrorCode::PartialContent)
    }

    /// Get human-readable description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::PartialContent => "Partial content",
            ErrorCode::BadInput => "Bad input parameter",
            ErrorCode::AuthError => "Bad or expired credentials",
            ErrorCode::Conflict => "Naming conflict",
            ErrorCode::NotFound => "Not found",
            ErrorCode::MethodNotAllowed => "Method not allowed",
            ErrorCode::RangeNotSatisfiable => "Requested range not satisfiable",
            ErrorCode::RateLimited => "Rate limited",
            ErrorCode::QuotaExceeded => "Over storage quota",
            ErrorCode::ServerError => "Server error",
            ErrorCode::Unknown => "Unknown error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::from_status(200), ErrorCode::Success);
        assert_eq!(ErrorCode::from_status(206), ErrorCode::PartialContent);
        assert_eq!(ErrorCode::from_status(400), ErrorCode::BadInput);
        assert_eq!(ErrorCode::from_status(406), ErrorCode::BadInput);
        assert_eq!(ErrorCode::from_status(401), ErrorCode::AuthError);
        assert_eq!(ErrorCode::from_status(403), ErrorCode::Conflict);
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(405), ErrorCode::MethodNotAllowed);
        assert_eq!(ErrorCode::from_status(416), ErrorCode::RangeNotSatisfiable);
        assert_eq!(ErrorCode::from_status(429), ErrorCode::RateLimited);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::RateLimited);
        assert_eq!(ErrorCode::from_status(507), ErrorCode::QuotaExceeded);
        assert_eq!(ErrorCode::from_status(500), ErrorCode::ServerError);
        assert_eq!(ErrorCode::from_status(502), ErrorCode::ServerError);
        assert_eq!(ErrorCode::from_status(302), ErrorCode::Unknown);
    }

    #[test]
    fn test_success_variants() {
        assert!(ErrorCode::Success.is_success());
        assert!(ErrorCode::PartialContent.is_success());
        assert!(!ErrorCode::NotFound.is_success());
        assert!(!ErrorCode::Conflict.is_success());
        assert!(!ErrorCode::AuthError.is_success());
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ErrorCode::Success.description(), "Success");
        assert_eq!(ErrorCode::PartialContent.description(), "Partial content");
        assert_eq!(ErrorCode::NotFound.description(), "Not found");
        assert_eq!(
            ErrorCode::AuthError.description(),
            "Bad or expired credentials"
        );
        assert_eq!(ErrorCode::Conflict.description(), "Naming conflict");
        assert_eq!(ErrorCode::QuotaExceeded.description(), "Over storage quota");
    }
}
