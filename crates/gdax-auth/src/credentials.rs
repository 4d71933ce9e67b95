//! API credentials and request signing
//!
//! Implements the HMAC-SHA256 scheme behind the `CB-ACCESS-SIGN` header.
//!
//! # Security
//!
//! The signing secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// API credentials for a GDAX client
///
/// All three parts may be empty. An all-empty credential set never produces
/// auth headers and is how a public, unauthenticated client is built; each
/// part switches its own `CB-ACCESS-*` header independently.
///
/// Immutable after construction.
pub struct Credentials {
    /// API key (public identifier)
    key: String,
    /// API passphrase
    passphrase: String,
    /// Base64-encoded signing secret (zeroized on drop)
    secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key, passphrase, and base64 secret
    ///
    /// The secret is not validated here; a malformed secret surfaces as
    /// [`AuthError::InvalidSecret`] on the first [`sign`](Self::sign) call.
    pub fn new(
        key: impl Into<String>,
        passphrase: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            passphrase: passphrase.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Empty credentials for public, unauthenticated access
    pub fn public() -> Self {
        Self::new("", "", "")
    }

    /// Create credentials from environment variables
    ///
    /// Reads `GDAX_API_KEY`, `GDAX_API_PASSPHRASE`, and `GDAX_API_SECRET`.
    pub fn from_env() -> AuthResult<Self> {
        let key = std::env::var("GDAX_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("GDAX_API_KEY".to_string()))?;
        let passphrase = std::env::var("GDAX_API_PASSPHRASE")
            .map_err(|_| AuthError::EnvVarNotSet("GDAX_API_PASSPHRASE".to_string()))?;
        let secret = std::env::var("GDAX_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("GDAX_API_SECRET".to_string()))?;

        Ok(Self::new(key, passphrase, secret))
    }

    /// Get the API key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the API passphrase
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// Check whether these credentials can produce a signature
    pub fn can_sign(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }

    /// Sign a request for the GDAX API
    ///
    /// Computes base64(HMAC-SHA256(base64decode(secret), canonical message))
    /// over the canonical message built from the arguments. Deterministic:
    /// identical inputs always yield an identical signature.
    ///
    /// Returns `None` when the secret is empty (public client), so callers
    /// can skip the `CB-ACCESS-SIGN` header entirely.
    ///
    /// # Arguments
    /// * `timestamp` - seconds since epoch as a decimal string; must equal
    ///   the `CB-ACCESS-TIMESTAMP` header value
    /// * `method` - HTTP method, uppercased into the message
    /// * `request_path` - path including any `?query` suffix
    /// * `body` - the exact body string transmitted, or `""` for no body
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> AuthResult<Option<String>> {
        let secret = self.secret.expose_secret();
        if secret.is_empty() {
            return Ok(None);
        }

        let key = BASE64.decode(secret)?;
        let message = canonical_message(timestamp, method, request_path, body);

        let mut mac =
            HmacSha256::new_from_slice(&key).expect("HMAC can take key of any size");
        mac.update(message.as_bytes());

        Ok(Some(BASE64.encode(mac.finalize().into_bytes())))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            passphrase: self.passphrase.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("passphrase", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Build the exact byte sequence that gets signed
///
/// `timestamp`, uppercased `method`, `request_path` (with query), and `body`
/// concatenated with no separators. The body string must be byte-identical
/// to the transmitted body or the signature is invalid.
pub fn canonical_message(timestamp: &str, method: &str, request_path: &str, body: &str) -> String {
    format!(
        "{}{}{}{}",
        timestamp,
        method.to_uppercase(),
        request_path,
        body
    )
}
