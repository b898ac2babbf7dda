//! # Provider Traits
//!
//! The registrar does not implement a DID method itself. Creating, anchoring
//! and resolving DIDs is delegated to an implementer of [`DidMethod`].

use anyhow::Result;

use crate::document::Document;
use crate::key::PublicKey;
use crate::resolve::Resolution;

/// [`DidMethod`] is the backend a registrar submits documents to and resolves
/// DIDs from.
///
/// A single instance is shared by all requests, so implementations must
/// support concurrent calls.
pub trait DidMethod: Send + Sync + Clone + 'static {
    /// Create a DID for the document.
    ///
    /// The returned resolution holds the document as created, with its ID set
    /// to the newly assigned DID.
    ///
    /// # Errors
    ///
    /// Returns an error if the DID method rejects the document or cannot be
    /// reached.
    fn create(
        &self, document: Document, options: CreateOptions,
    ) -> impl Future<Output = Result<Resolution>> + Send;

    /// Resolve a DID to its current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the DID cannot be resolved.
    fn read(&self, did: &str) -> impl Future<Output = Result<Resolution>> + Send;
}

/// Keys passed to the DID method outside of the document body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Key authorizing future recovery of the DID.
    pub recovery_key: Option<PublicKey>,

    /// Key authorizing future updates to the DID.
    pub update_key: Option<PublicKey>,
}
