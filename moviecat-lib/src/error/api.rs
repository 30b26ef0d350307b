//! API error types

/// Errors that can occur while talking to the remote catalogue.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body did not match the expected shape.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error, including the failing field path.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

// Request URLs carry the API key as a query parameter, so it must never reach
// an error message.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the API key.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}
