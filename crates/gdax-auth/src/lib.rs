//! Request signing for the GDAX REST API
//!
//! GDAX authenticates requests with three `CB-ACCESS-*` headers derived from
//! an API key, a passphrase, and a base64-encoded signing secret. The
//! signature is an HMAC-SHA256 over the canonical message
//! `timestamp + METHOD + request_path + body` (no separators), keyed with the
//! base64-decoded secret and base64-encoded for transport.
//!
//! Credentials with an empty secret produce no signature, which is how the
//! same pipeline serves public, unauthenticated endpoints.
//!
//! # Example
//!
//! ```
//! use gdax_auth::Credentials;
//!
//! let creds = Credentials::new("my-key", "my-passphrase", "c2VjcmV0LWtleQ==");
//! let signature = creds.sign("1500130020", "GET", "/time", "").unwrap();
//! assert!(signature.is_some());
//!
//! let public = Credentials::public();
//! assert_eq!(public.sign("1500130020", "GET", "/time", "").unwrap(), None);
//! ```

pub mod credentials;
pub mod error;

pub use credentials::{canonical_message, Credentials};
pub use error::{AuthError, AuthResult};
