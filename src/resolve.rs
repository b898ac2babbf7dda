//! # DID Resolver
//!
//! Resolves a DID through the DID method and serializes the resolution for
//! return to the client.
//!
//! See [DID resolution](https://www.w3.org/TR/did-core/#did-resolution) for more.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, DocumentMetadata};
use crate::provider::DidMethod;

/// Media type of a resolved DID document.
pub const DID_LD_JSON: &str = "application/did+ld+json";

/// Context of a DID resolution result.
pub const RESOLUTION_CONTEXT: &str = "https://w3id.org/did-resolution/v1";

/// The result of resolving (or creating) a DID.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The DID resolution context.
    #[serde(rename = "@context", default = "default_context")]
    pub context: String,

    /// The DID document.
    pub did_document: Document,

    /// DID document metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_document_metadata: Option<DocumentMetadata>,
}

fn default_context() -> String {
    RESOLUTION_CONTEXT.to_string()
}

impl Resolution {
    /// Wrap a document in a resolution result.
    #[must_use]
    pub fn new(did_document: Document) -> Self {
        Self {
            context: default_context(),
            did_document,
            did_document_metadata: None,
        }
    }

    /// Attach document metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.did_document_metadata = Some(metadata);
        self
    }
}

/// Errors returned by the resolve endpoint.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No DID was supplied.
    #[error("url param 'did' is missing")]
    MissingDid,

    /// The DID method could not resolve the DID.
    #[error("failed to resolve did: {0}")]
    Resolve(anyhow::Error),

    /// The resolution could not be serialized.
    #[error("failed to marshal doc resolution: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ResolveError {
    /// The HTTP status code for the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingDid | Self::Resolve(_) => StatusCode::BAD_REQUEST,
            Self::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Resolve `did` and return the serialized resolution.
///
/// # Errors
///
/// Returns an error if `did` is missing or empty, if the DID method fails to
/// resolve it, or if the resolution cannot be serialized.
pub async fn resolve(method: &impl DidMethod, did: Option<&str>) -> Result<Vec<u8>, ResolveError> {
    let Some(did) = did.filter(|d| !d.is_empty()) else {
        return Err(ResolveError::MissingDid);
    };
    tracing::debug!(did, "resolving DID");

    let resolution = method.read(did).await.map_err(ResolveError::Resolve)?;
    Ok(serde_json::to_vec(&resolution)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ResolveError::MissingDid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ResolveError::Resolve(anyhow::anyhow!("not found")).status(),
            StatusCode::BAD_REQUEST
        );
        let ser_err = serde_json::from_str::<Document>("{").expect_err("should fail");
        assert_eq!(ResolveError::from(ser_err).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages() {
        assert_eq!(ResolveError::MissingDid.to_string(), "url param 'did' is missing");
        assert_eq!(
            ResolveError::Resolve(anyhow::anyhow!("not found")).to_string(),
            "failed to resolve did: not found"
        );
    }

    #[test]
    fn resolution_shape() {
        let resolution = Resolution::new(Document {
            id: "did:example:123".into(),
            ..Document::default()
        });
        assert_eq!(
            serde_json::to_value(&resolution).unwrap(),
            json!({
                "@context": "https://w3id.org/did-resolution/v1",
                "didDocument": {"id": "did:example:123"}
            })
        );
    }
}
