//! Error types for tablepad.
//!
//! `ApiError` covers everything that can go wrong talking to the restaurant
//! API; `OrderError` covers local rejections in the order workflow. Both are
//! rendered to the user as toasts, so their `Display` text is user-facing.

use thiserror::Error;

/// Failure of a remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server could not be reached at all
    #[error("Cannot reach server at {0}")]
    Connect(String),

    /// The request did not finish within the configured timeout
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// The server answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The response body was not what we expected
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The configured base URL cannot be used
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure
    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Classify a `reqwest::Error` for the given URL.
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(url.to_string())
        } else if err.is_connect() {
            Self::Connect(url.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(url.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Build a status error, preferring the server's own message when the
    /// body carries one (`{"error": "..."}` or `{"message": "..."}`).
    pub fn from_status(status: u16, body: &str) -> Self {
        let server_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            })
            .filter(|s| !s.trim().is_empty());

        let message = server_message.unwrap_or_else(|| match status {
            400 => "Request rejected by server".to_string(),
            401 => "Not signed in or session expired".to_string(),
            403 => "Not allowed".to_string(),
            404 => "Not found".to_string(),
            s if s >= 500 => "Server error".to_string(),
            _ => "Unexpected response from server".to_string(),
        });

        Self::Status { status, message }
    }

    /// Whether the server rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Local rejection in the order workflow. No request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("No product selected")]
    NoProductSelected,

    #[error("Invalid amount '{0}': enter a whole number greater than zero")]
    InvalidAmount(String),

    #[error("Remove all items before closing the order")]
    OrderNotEmpty,

    #[error("Wait for pending items before closing the order")]
    AddInFlight,

    #[error("Add at least one item before finishing")]
    NoItems,

    #[error("Wait for pending items before finishing the order")]
    RequestsInFlight,
}

/// Local rejection of the sign-in form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Enter your email and password")]
    MissingCredentials,

    #[error("Already signing in")]
    Busy,
}
