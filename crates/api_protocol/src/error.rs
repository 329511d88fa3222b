//! Error envelope returned by the HTTP API.

use serde::{Deserialize, Serialize};

/// Machine-readable error codes.
pub mod error_codes {
    /// The request body, query or path is malformed or fails validation.
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    /// Missing or invalid credentials.
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    /// The requested resource does not exist.
    pub const NOT_FOUND: &str = "NOT_FOUND";
    /// The request conflicts with stored state.
    pub const CONFLICT: &str = "CONFLICT";
    /// Unexpected server-side failure.
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// One of [`error_codes`].
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

impl ErrorBody {
    /// Creates a new error body.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let body = ErrorBody::new(error_codes::NOT_FOUND, "Book not found");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Book not found");
    }
}
