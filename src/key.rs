//! # Public Keys
//!
//! Decodes submitted key material into typed public keys and converts them
//! to the JWK representation used in DID documents.

use base64ct::{Base64, Base64UrlUnpadded, Encoding};
use ed25519_dalek::PUBLIC_KEY_LENGTH;
use multibase::Base;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Key type name for Ed25519 keys.
pub const ED25519: &str = "Ed25519";

/// Key type name for NIST P-256 keys.
pub const P256: &str = "P-256";

// SEC1 tag for an uncompressed point.
const UNCOMPRESSED: u8 = 0x04;

/// A decoded public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKey {
    /// An Ed25519 public key in its 32-byte encoding.
    Ed25519([u8; PUBLIC_KEY_LENGTH]),

    /// A point on the P-256 curve.
    P256(p256::PublicKey),
}

impl PublicKey {
    /// Decode raw key bytes according to the declared key type.
    ///
    /// Ed25519 keys are taken as submitted and only their length is checked.
    /// P-256 keys must be an uncompressed SEC1 point (`0x04 || x || y`) on the
    /// curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the key type is not supported, an Ed25519 key is
    /// not 32 bytes, or a P-256 key is not a valid point.
    pub fn decode(key_type: &str, raw: &[u8]) -> Result<Self> {
        match key_type {
            ED25519 => {
                let key = <[u8; PUBLIC_KEY_LENGTH]>::try_from(raw).map_err(|_| {
                    Error::InvalidKey {
                        key_type: ED25519,
                        reason: format!("expected {PUBLIC_KEY_LENGTH} bytes, got {}", raw.len()),
                    }
                })?;
                Ok(Self::Ed25519(key))
            }
            P256 => {
                if raw.first() != Some(&UNCOMPRESSED) {
                    return Err(Error::InvalidKey {
                        key_type: P256,
                        reason: "point is not uncompressed".into(),
                    });
                }
                let key = p256::PublicKey::from_sec1_bytes(raw).map_err(|e| Error::InvalidKey {
                    key_type: P256,
                    reason: e.to_string(),
                })?;
                Ok(Self::P256(key))
            }
            _ => Err(Error::InvalidKeyType(key_type.to_string())),
        }
    }

    /// The key type name this key was decoded from.
    #[must_use]
    pub const fn key_type(&self) -> &'static str {
        match self {
            Self::Ed25519(_) => ED25519,
            Self::P256(_) => P256,
        }
    }

    /// The key's canonical byte encoding.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(key) => key.to_vec(),
            Self::P256(key) => key.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Convert the key to a JWK.
    #[must_use]
    pub fn to_jwk(&self) -> PublicKeyJwk {
        match self {
            Self::Ed25519(key) => PublicKeyJwk {
                kty: KeyType::Okp,
                crv: Curve::Ed25519,
                x: Base64UrlUnpadded::encode_string(key),
                y: None,
            },
            Self::P256(key) => {
                // uncompressed: tag || x (32) || y (32)
                let point = key.to_encoded_point(false);
                let (x, y) = point.as_bytes()[1..].split_at(32);
                PublicKeyJwk {
                    kty: KeyType::Ec,
                    crv: Curve::P256,
                    x: Base64UrlUnpadded::encode_string(x),
                    y: Some(Base64UrlUnpadded::encode_string(y)),
                }
            }
        }
    }
}

/// Decode a standard (padded) base64 public key value.
///
/// # Errors
///
/// Returns an error if the value is not valid base64.
pub fn decode_value(value: &str) -> Result<Vec<u8>> {
    Base64::decode_vec(value).map_err(|e| Error::InvalidEncoding(e.to_string()))
}

/// Encode bytes as Base58 (Bitcoin alphabet, no multibase prefix).
#[must_use]
pub fn base58(bytes: &[u8]) -> String {
    Base::Base58Btc.encode(bytes)
}

/// Simplified JSON Web Key (JWK) for the public keys this crate handles.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PublicKeyJwk {
    /// Key type.
    pub kty: KeyType,

    /// Curve the key belongs to.
    pub crv: Curve,

    /// The x coordinate (or the whole key for OKP keys), base64url encoded.
    pub x: String,

    /// The y coordinate for EC keys, base64url encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

/// JWK key type.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum KeyType {
    /// Octet key pair (Edwards curves).
    #[serde(rename = "OKP")]
    Okp,

    /// Elliptic curve.
    #[serde(rename = "EC")]
    Ec,
}

/// JWK curve.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum Curve {
    /// Ed25519 signature curve.
    Ed25519,

    /// NIST P-256.
    #[serde(rename = "P-256")]
    P256,
}
