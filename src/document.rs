//! # DID Document
//!
//! A DID Document is a JSON-LD document that contains information related to a
//! DID.

mod builder;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use self::builder::DocumentDraft;
use crate::core::Kind;
use crate::verification::{KeyPurpose, VerificationMethod};

/// DID Document
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The context of the DID document.
    #[serde(rename = "@context", default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<Kind<Value>>,

    /// The DID for a particular DID subject. Empty in a draft submitted for
    /// creation: the DID method assigns it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// If set, MUST be a set of verification methods for the DID subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<Vec<VerificationMethod>>,

    /// The `authentication` verification relationship is used to specify how
    /// the DID subject is expected to be authenticated, for purposes such
    /// as logging into a website or in any sort of challenge-response
    /// protocol.
    ///
    /// <https://www.w3.org/TR/did-core/#authentication>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Vec<Kind<VerificationMethod>>>,

    /// The `assertion_method` verification relationship is used to specify how
    /// the DID subject is expected to express claims, such as for the
    /// purposes of issuing a Verifiable Credential.
    ///
    /// <https://www.w3.org/TR/did-core/#assertion>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertion_method: Option<Vec<Kind<VerificationMethod>>>,

    /// The `key_agreement` verification relationship is used to specify how an
    /// entity can generate encryption material in order to transmit
    /// confidential information intended for the DID subject.
    ///
    /// <https://www.w3.org/TR/did-core/#key-agreement>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_agreement: Option<Vec<Kind<VerificationMethod>>>,

    /// The `capability_delegation` verification relationship is used to specify
    /// a mechanism that might be used by the DID subject to delegate a
    /// cryptographic capability to another party.
    ///
    /// <https://www.w3.org/TR/did-core/#capability-delegation>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_delegation: Option<Vec<Kind<VerificationMethod>>>,

    /// The `capability_invocation` verification relationship is used to specify
    /// a verification method that might be used by the DID subject to
    /// invoke a cryptographic capability, such as the authorization to
    /// update the DID Document.
    ///
    /// <https://www.w3.org/TR/did-core/#capability-invocation>
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_invocation: Option<Vec<Kind<VerificationMethod>>>,

    /// A set of services, that express ways of communicating with the DID
    /// subject or related entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Service>>,
}

impl Document {
    /// The references held by the verification relationship for `purpose`.
    #[must_use]
    pub const fn relationship(&self, purpose: KeyPurpose) -> Option<&Vec<Kind<VerificationMethod>>> {
        match purpose {
            KeyPurpose::Authentication => self.authentication.as_ref(),
            KeyPurpose::AssertionMethod => self.assertion_method.as_ref(),
            KeyPurpose::KeyAgreement => self.key_agreement.as_ref(),
            KeyPurpose::CapabilityDelegation => self.capability_delegation.as_ref(),
            KeyPurpose::CapabilityInvocation => self.capability_invocation.as_ref(),
        }
    }

    pub(crate) fn relationship_mut(
        &mut self, purpose: KeyPurpose,
    ) -> &mut Vec<Kind<VerificationMethod>> {
        let bucket = match purpose {
            KeyPurpose::Authentication => &mut self.authentication,
            KeyPurpose::AssertionMethod => &mut self.assertion_method,
            KeyPurpose::KeyAgreement => &mut self.key_agreement,
            KeyPurpose::CapabilityDelegation => &mut self.capability_delegation,
            KeyPurpose::CapabilityInvocation => &mut self.capability_invocation,
        };
        bucket.get_or_insert_with(Vec::new)
    }
}

/// Services are used to express ways of communicating with the DID subject or
/// associated entities.
///
/// Service entries submitted for registration are copied into the document
/// unchanged.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// A URI unique to the service.
    pub id: String,

    /// The service type. SHOULD be registered in the DID Specification
    /// Registries.
    #[serde(rename = "type")]
    pub type_: String,

    /// Relative priority of the service, lower first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,

    /// Keys of the intended recipients of messages sent to the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipient_keys: Vec<String>,

    /// Keys of mediators messages pass through on the way to the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routing_keys: Vec<String>,

    /// The service endpoint: a URI or a map of endpoint properties.
    #[serde(alias = "endpoint")]
    #[allow(clippy::struct_field_names)]
    pub service_endpoint: Kind<Value>,
}

/// DID document metadata.
///
/// <https://w3c.github.io/did-core/#dfn-diddocumentmetadata>
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Timestamp of the Create operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Timestamp of the last Update operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Set to `true` if the DID has been deactivated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<bool>,

    /// Method-specific metadata (for example, commitments to the recovery and
    /// update keys).
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}
