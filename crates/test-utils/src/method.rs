//! In-memory DID method.

use std::sync::Arc;

use anyhow::{Result, anyhow, bail};
use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::Utc;
use dashmap::DashMap;
use did_registrar::{CreateOptions, DidMethod, Document, DocumentMetadata, PublicKey, Resolution};
use serde_json::json;
use sha2::{Digest, Sha256};

/// A DID method that keeps created documents in memory.
///
/// Unless an identifier is fixed with [`MockMethod::with_identifier`], DIDs
/// are `did:<domain>:<suffix>` where the suffix is the base64url SHA-256 hash
/// of the submitted document.
#[derive(Clone, Debug, Default)]
pub struct MockMethod {
    domain: String,
    identifier: Option<String>,
    failure: Option<String>,
    store: Arc<DashMap<String, Entry>>,
}

#[derive(Clone, Debug)]
struct Entry {
    resolution: Resolution,
    options: CreateOptions,
}

impl MockMethod {
    /// Create a DID method for `domain`.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Assign `did` to every document created.
    #[must_use]
    pub fn with_identifier(mut self, did: impl Into<String>) -> Self {
        self.identifier = Some(did.into());
        self
    }

    /// A DID method that fails every call with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// The creation options submitted with the document for `did`.
    #[must_use]
    pub fn options(&self, did: &str) -> Option<CreateOptions> {
        self.store.get(did).map(|e| e.options.clone())
    }

    /// Number of DIDs created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no DIDs have been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl DidMethod for MockMethod {
    async fn create(&self, mut document: Document, options: CreateOptions) -> Result<Resolution> {
        if let Some(reason) = &self.failure {
            bail!("{reason}");
        }

        let did = match &self.identifier {
            Some(did) => did.clone(),
            None => {
                let digest = Sha256::digest(serde_json::to_vec(&document)?);
                format!("did:{}:{}", self.domain, Base64UrlUnpadded::encode_string(&digest))
            }
        };
        document.id.clone_from(&did);

        let mut metadata = DocumentMetadata {
            created: Some(Utc::now()),
            ..DocumentMetadata::default()
        };
        metadata.additional.insert(
            "method".to_string(),
            json!({
                "published": false,
                "recoveryKey": options.recovery_key.as_ref().map(PublicKey::to_jwk),
                "updateKey": options.update_key.as_ref().map(PublicKey::to_jwk),
            }),
        );

        let resolution = Resolution::new(document).metadata(metadata);
        self.store.insert(
            did,
            Entry {
                resolution: resolution.clone(),
                options,
            },
        );
        Ok(resolution)
    }

    async fn read(&self, did: &str) -> Result<Resolution> {
        if let Some(reason) = &self.failure {
            bail!("{reason}");
        }
        self.store.get(did).map(|e| e.resolution.clone()).ok_or_else(|| anyhow!("DID not found: {did}"))
    }
}
