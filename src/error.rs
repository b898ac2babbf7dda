//! # Registrar Errors
//!
//! Business-tier failures. Each one ends a registration with a `failed`
//! state, using the error's display text as the reason.

use thiserror::Error;

/// Errors raised while turning a registration request into a DID document
/// and submitting it to the DID method.
#[derive(Error, Debug)]
pub enum Error {
    /// The request did not contain any public keys.
    #[error("AddPublicKeys is empty")]
    NoPublicKeys,

    /// The public key value is not valid base64.
    #[error("failed to decode public key value: {0}")]
    InvalidEncoding(String),

    /// The key type is not one of the supported types.
    #[error("invalid key type: {0}")]
    InvalidKeyType(String),

    /// The key bytes do not describe a valid point on the declared curve.
    #[error("invalid {key_type} public key: {reason}")]
    InvalidKey {
        /// The declared key type.
        key_type: &'static str,

        /// Why the key was rejected.
        reason: String,
    },

    /// A public key declared a purpose that has no verification
    /// relationship.
    #[error("public key purpose {0} not supported")]
    UnsupportedPurpose(String),

    /// The DID method rejected the document.
    #[error("failed to create did doc: {0}")]
    Create(anyhow::Error),

    /// The configured operation mode is unknown.
    #[error("invalid operation mode: {0}")]
    InvalidMode(String),
}

/// Result type for registrar operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
