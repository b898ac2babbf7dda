//! # Register
//!
//! Turns a registration request into a DID document, submits it to the DID
//! method and reports the outcome as a job state.
//!
//! Registration is modelled as a job: every outcome, including validation
//! failures, is reported in the response body rather than as an error.
//!
//! See <https://identity.foundation/did-registration/>.

use serde::{Deserialize, Serialize};

use crate::document::{DocumentDraft, Service};
use crate::error::{Error, Result};
use crate::key::{self, PublicKey};
use crate::provider::DidMethod;
use crate::verification;

/// Request to register a new DID.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Identifies the registration job. Echoed back unchanged.
    #[serde(rename = "jobID", alias = "jobId", default)]
    pub job_id: String,

    /// The document to register.
    #[serde(default)]
    pub did_document: DocumentRequest,
}

/// The contents of the DID document to register.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DocumentRequest {
    /// Public keys, in the order they should appear in the document.
    #[serde(rename = "publicKey", alias = "publicKeys", default)]
    pub public_key: Vec<PublicKeyEntry>,

    /// Services to add to the document.
    #[serde(rename = "service", alias = "services", default)]
    pub service: Vec<Service>,
}

/// A public key submitted for registration.
///
/// Missing fields are empty, so an incomplete entry fails registration with
/// a reason instead of being rejected as a malformed request.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicKeyEntry {
    /// Key ID, relative to the DID.
    pub id: String,

    /// Verification method type, e.g. `JsonWebKey2020`.
    #[serde(rename = "type")]
    pub type_: String,

    /// Key type: `Ed25519` or `P-256`.
    pub key_type: String,

    /// Standard base64 encoding of the raw public key.
    pub value: String,

    /// Verification relationships the key is used for.
    pub purposes: Vec<String>,

    /// The key authorizes recovery of the DID.
    pub recovery: bool,

    /// The key authorizes updates to the DID.
    pub update: bool,
}

/// Response to a registration request.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// The job ID from the request.
    #[serde(rename = "jobID")]
    pub job_id: String,

    /// The outcome of the registration.
    pub did_state: DidState,
}

/// Terminal state of a registration job.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DidState {
    /// The registered DID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Why registration failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Finished or failed.
    pub state: RegistrationState,

    /// Key material for the registered DID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<Secret>,
}

impl DidState {
    /// A finished registration.
    #[must_use]
    pub fn finished(identifier: impl Into<String>, secret: Secret) -> Self {
        Self {
            identifier: Some(identifier.into()),
            state: RegistrationState::Finished,
            secret: Some(secret),
            ..Self::default()
        }
    }

    /// A failed registration.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            state: RegistrationState::Failed,
            ..Self::default()
        }
    }
}

/// Registration job state.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationState {
    /// The DID was created.
    Finished,

    /// The DID could not be created.
    #[default]
    Failed,
}

/// Key material returned for a registered DID.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Secret {
    /// One entry per verification key in the document.
    pub keys: Vec<SecretKey>,
}

/// A public key of the registered DID.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SecretKey {
    /// DID URL of the key: `<did>#<key id>`.
    pub id: String,

    /// Base58 encoding of the submitted key bytes.
    #[serde(rename = "publicKeyBase58")]
    pub public_key_base58: String,
}

/// Register a DID for the requested document.
///
/// Keys are processed in order and the first invalid key fails the whole
/// registration. Nothing is submitted to the DID method unless every key is
/// valid.
pub async fn register(method: &impl DidMethod, request: RegisterRequest) -> RegisterResponse {
    let did_state = match create(method, &request.did_document).await {
        Ok((identifier, secret)) => {
            tracing::info!(job_id = %request.job_id, did = %identifier, "registered DID");
            DidState::finished(identifier, secret)
        }
        Err(e) => {
            tracing::error!(job_id = %request.job_id, "registration failed: {e}");
            DidState::failed(e.to_string())
        }
    };

    RegisterResponse {
        job_id: request.job_id,
        did_state,
    }
}

async fn create(method: &impl DidMethod, request: &DocumentRequest) -> Result<(String, Secret)> {
    if request.public_key.is_empty() {
        return Err(Error::NoPublicKeys);
    }

    let mut draft = DocumentDraft::new();
    let mut verification_keys: Vec<(String, Vec<u8>)> = vec![];

    for entry in &request.public_key {
        let raw = key::decode_value(&entry.value)?;
        let public_key = PublicKey::decode(&entry.key_type, &raw)?;
        draft = verification::add_public_key(draft, entry, public_key)?;

        if !entry.recovery && !entry.update {
            match verification_keys.iter_mut().find(|(id, _)| id == &entry.id) {
                Some(existing) => existing.1 = raw,
                None => verification_keys.push((entry.id.clone(), raw)),
            }
        }
    }

    for service in &request.service {
        draft = draft.service(service.clone());
    }

    let (document, options) = draft.build();
    let resolution = method.create(document, options).await.map_err(Error::Create)?;
    let did = resolution.did_document.id;

    let secret = Secret {
        keys: verification_keys
            .iter()
            .map(|(id, raw)| SecretKey {
                id: format!("{did}#{id}"),
                public_key_base58: key::base58(raw),
            })
            .collect(),
    };

    Ok((did, secret))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserialize_request() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "jobID": "job-1",
            "didDocument": {
                "publicKey": [{
                    "id": "key-1",
                    "type": "JsonWebKey2020",
                    "keyType": "Ed25519",
                    "value": "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=",
                    "purposes": ["authentication"]
                }],
                "service": [{
                    "id": "hub",
                    "type": "LinkedDomains",
                    "serviceEndpoint": "https://example.com"
                }]
            }
        }))
        .expect("should deserialize");

        assert_eq!(request.job_id, "job-1");
        let entry = &request.did_document.public_key[0];
        assert_eq!(entry.key_type, "Ed25519");
        assert!(!entry.recovery && !entry.update);
        assert_eq!(request.did_document.service.len(), 1);
    }

    #[test]
    fn deserialize_incomplete_entry() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "jobID": "j1",
            "didDocument": {"publicKey": [{"id": "k1", "value": "AAAA"}]}
        }))
        .expect("should deserialize");

        let entry = &request.did_document.public_key[0];
        assert_eq!(entry.id, "k1");
        assert_eq!(entry.key_type, "");
        assert!(entry.purposes.is_empty());
    }

    #[test]
    fn deserialize_aliases() {
        let request: RegisterRequest = serde_json::from_value(json!({
            "jobId": "job-2",
            "didDocument": {"publicKeys": [], "services": []}
        }))
        .expect("should deserialize");
        assert_eq!(request.job_id, "job-2");
        assert!(request.did_document.public_key.is_empty());
    }

    #[test]
    fn failed_state_shape() {
        let response = RegisterResponse {
            job_id: "job-1".into(),
            did_state: DidState::failed("AddPublicKeys is empty"),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "jobID": "job-1",
                "didState": {"reason": "AddPublicKeys is empty", "state": "failed"}
            })
        );
    }

    #[test]
    fn finished_state_shape() {
        let secret = Secret {
            keys: vec![SecretKey {
                id: "did:example:abc#key-1".into(),
                public_key_base58: "StV1DL6CwTryKyV".into(),
            }],
        };
        let state = DidState::finished("did:example:abc", secret);
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "identifier": "did:example:abc",
                "state": "finished",
                "secret": {"keys": [{"id": "did:example:abc#key-1", "publicKeyBase58": "StV1DL6CwTryKyV"}]}
            })
        );
    }
}
