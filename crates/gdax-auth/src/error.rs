//! Error types for authentication operations

/// Errors that can occur while signing a request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The signing secret is not valid base64
    #[error("invalid signing secret: {0}")]
    InvalidSecret(#[from] base64::DecodeError),

    /// Environment variable not set
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("GDAX_API_KEY".to_string());
        assert!(err.to_string().contains("GDAX_API_KEY"));
    }
}
