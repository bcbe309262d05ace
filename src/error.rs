//! Unified client error types.

use thiserror::Error;

/// Top-level client error.
#[derive(Error, Debug)]
pub enum SmjError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SmjError {
    /// Whether this error came from the transport layer (connection, status, body).
    ///
    /// These are shown to the user as a generic message only.
    pub fn is_network(&self) -> bool {
        matches!(self, SmjError::Http(_) | SmjError::Serde(_))
    }
}

/// Client-side rejection of login input. Never reaches the network.
///
/// The `Display` text is the user-facing message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Mobile number is required")]
    MissingMobile,

    #[error("Mobile number must be exactly 10 digits")]
    InvalidMobileFormat,

    #[error("Password is required")]
    MissingPassword,
}

/// HTTP-layer errors (transport, status, or body decoding).
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,
}

/// A well-formed response in which the service rejected the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Login rejected: {}", .message.as_deref().unwrap_or("no message"))]
    LoginRejected { message: Option<String> },

    #[error("Price list rejected: {}", .message.as_deref().unwrap_or("no message"))]
    PriceRejected { message: Option<String> },
}

impl ApplicationError {
    /// The message supplied by the service, if any (empty strings count as absent).
    pub fn message(&self) -> Option<&str> {
        let message = match self {
            Self::LoginRejected { message } | Self::PriceRejected { message } => message,
        };
        message.as_deref().filter(|m| !m.is_empty())
    }
}
