//! Errors returned by the tracker API client.

use thiserror::Error;

/// Broad category of an API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Request never completed (connection refused, timeout, ...)
    Network,
    /// Server answered with a non-2xx status
    Http,
    /// Body did not match the expected schema
    Decode,
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network => write!(f, "network error"),
            Self::Http => write!(f, "HTTP error"),
            Self::Decode => write!(f, "decode error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Network(_) => ApiErrorKind::Network,
            Self::Http { .. } => ApiErrorKind::Http,
            Self::Decode(_) => ApiErrorKind::Decode,
        }
    }

    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Status class of a non-2xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatusClass {
    NotFound,
    Conflict,
    ClientError,
    ServerError,
}

/// Classify a non-2xx HTTP status code.
pub fn classify_http_status(status: u16) -> HttpStatusClass {
    match status {
        404 => HttpStatusClass::NotFound,
        409 => HttpStatusClass::Conflict,
        400..=499 => HttpStatusClass::ClientError,
        _ => HttpStatusClass::ServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ApiError::Network("refused".into()).kind(), ApiErrorKind::Network);
        let err = ApiError::Http {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.kind(), ApiErrorKind::Http);
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Server returned 500: boom");
    }

    #[test]
    fn test_classify_http_status() {
        assert_eq!(classify_http_status(404), HttpStatusClass::NotFound);
        assert_eq!(classify_http_status(409), HttpStatusClass::Conflict);
        assert_eq!(classify_http_status(422), HttpStatusClass::ClientError);
        assert_eq!(classify_http_status(503), HttpStatusClass::ServerError);
    }
}
