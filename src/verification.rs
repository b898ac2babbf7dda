//! # Verification Methods
//!
//! Builds verification methods from submitted public keys and places them
//! into the verification relationships of a document draft.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::DocumentDraft;
use crate::error::{Error, Result};
use crate::key::{PublicKey, PublicKeyJwk};
use crate::register::PublicKeyEntry;

/// Verification method type used when a request does not name one.
pub const JSON_WEB_KEY_2020: &str = "JsonWebKey2020";

/// A DID document can express verification methods, such as cryptographic
/// public keys, which can be used to authenticate or authorize interactions
/// with the DID subject or associated parties.
///
/// Methods built by the registrar use IDs relative to the document since the
/// DID is only known once the DID method has created it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Identifier for the verification method.
    pub id: String,

    /// The type of verification method. SHOULD be a registered type in the
    /// [DID Specification Registries](https://www.w3.org/TR/did-spec-registries).
    #[serde(rename = "type")]
    pub type_: String,

    /// The DID of the controller of the verification method. Empty until the
    /// DID method assigns an identifier.
    #[serde(default)]
    pub controller: String,

    /// The public key material.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_jwk: Option<PublicKeyJwk>,
}

/// A builder for creating a verification method.
#[derive(Default)]
pub struct VerificationMethodBuilder {
    jwk: Option<PublicKeyJwk>,
    id: String,
    type_: String,
}

impl VerificationMethodBuilder {
    /// Creates a new `VerificationMethodBuilder` for the given public key.
    #[must_use]
    pub fn new(key: &PublicKey) -> Self {
        Self {
            jwk: Some(key.to_jwk()),
            type_: JSON_WEB_KEY_2020.to_string(),
            ..Self::default()
        }
    }

    /// Set the verification method ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the verification method type. An empty type leaves the default
    /// (`JsonWebKey2020`) in place.
    #[must_use]
    pub fn method_type(mut self, type_: impl Into<String>) -> Self {
        let type_ = type_.into();
        if !type_.is_empty() {
            self.type_ = type_;
        }
        self
    }

    /// Build the verification method.
    #[must_use]
    pub fn build(self) -> VerificationMethod {
        VerificationMethod {
            id: self.id,
            type_: self.type_,
            controller: String::new(),
            public_key_jwk: self.jwk,
        }
    }
}

/// The purpose a verification method is used for. Each purpose maps to one
/// verification relationship of the document.
///
/// <https://www.w3.org/TR/did-1.0/#verification-relationships>
#[derive(Clone, Copy, Debug, Deserialize, Hash, PartialEq, Serialize, Eq)]
#[serde(rename_all = "camelCase")]
pub enum KeyPurpose {
    /// <https://www.w3.org/TR/did-1.0/#authentication>
    Authentication,

    /// <https://www.w3.org/TR/did-1.0/#assertion>
    AssertionMethod,

    /// <https://www.w3.org/TR/did-1.0/#key-agreement>
    KeyAgreement,

    /// <https://www.w3.org/TR/did-1.0/#capability-delegation>
    CapabilityDelegation,

    /// <https://www.w3.org/TR/did-1.0/#capability-invocation>
    CapabilityInvocation,
}

impl KeyPurpose {
    /// All purposes, in document order.
    pub const ALL: [Self; 5] = [
        Self::Authentication,
        Self::AssertionMethod,
        Self::KeyAgreement,
        Self::CapabilityDelegation,
        Self::CapabilityInvocation,
    ];
}

impl FromStr for KeyPurpose {
    type Err = Error;

    /// Parse a purpose tag. Accepts the lower camel case form used on the
    /// wire (`assertionMethod`) and the Pascal case form (`AssertionMethod`).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "authentication" | "Authentication" => Ok(Self::Authentication),
            "assertionMethod" | "AssertionMethod" => Ok(Self::AssertionMethod),
            "keyAgreement" | "KeyAgreement" => Ok(Self::KeyAgreement),
            "capabilityDelegation" | "CapabilityDelegation" => Ok(Self::CapabilityDelegation),
            "capabilityInvocation" | "CapabilityInvocation" => Ok(Self::CapabilityInvocation),
            _ => Err(Error::UnsupportedPurpose(s.to_string())),
        }
    }
}

impl Display for KeyPurpose {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::AssertionMethod => write!(f, "assertionMethod"),
            Self::KeyAgreement => write!(f, "keyAgreement"),
            Self::CapabilityDelegation => write!(f, "capabilityDelegation"),
            Self::CapabilityInvocation => write!(f, "capabilityInvocation"),
        }
    }
}

/// Add a decoded public key to the draft according to its role.
///
/// Recovery and update keys go to the draft's key slots and their purposes
/// are ignored. Any other key becomes a verification method referenced once
/// from each relationship named in its purposes.
///
/// # Errors
///
/// Returns an error if any of the entry's purposes is not supported. No part
/// of the entry is added in that case.
pub fn add_public_key(
    draft: DocumentDraft, entry: &PublicKeyEntry, key: PublicKey,
) -> Result<DocumentDraft> {
    if entry.recovery {
        return Ok(draft.recovery_key(key));
    }
    if entry.update {
        return Ok(draft.update_key(key));
    }

    let purposes =
        entry.purposes.iter().map(|p| p.parse::<KeyPurpose>()).collect::<Result<Vec<_>>>()?;

    let vm = VerificationMethodBuilder::new(&key).id(&entry.id).method_type(&entry.type_).build();
    let mut draft = draft.verification_method(vm);
    for purpose in purposes {
        draft = draft.relationship(purpose, &entry.id);
    }
    Ok(draft)
}
