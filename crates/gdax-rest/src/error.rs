//! Error types for REST API operations

use reqwest::StatusCode;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Network or connection failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Credentials could not be used to sign the request
    #[error("invalid credential: {0}")]
    InvalidCredential(#[from] gdax_auth::AuthError),

    /// A body did not match the expected JSON shape, on either the success
    /// or the error path
    #[error("decode error: {0}")]
    Decode(String),

    /// A positional array entry failed arity or type expectations
    #[error("malformed {kind} entry at index {index}: {reason}")]
    MalformedEntry {
        /// Which sequence the entry came from ("bid", "ask", "candle")
        kind: &'static str,
        /// Zero-based index of the offending entry
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Error reported by the server in the `{"message": ...}` envelope
    ///
    /// The expected failure path: safe for callers to branch on. Displays as
    /// the server's message text, nothing more.
    #[error("{message}")]
    Api {
        /// HTTP status the server answered with
        status: StatusCode,
        /// The `message` field of the error body
        message: String,
    },
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
