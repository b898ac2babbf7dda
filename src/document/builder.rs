//! # Document Draft
//!
//! Accumulates the parts of a DID document submitted for creation along with
//! the keys that travel to the DID method out of band.

use crate::core::Kind;
use crate::document::{Document, Service};
use crate::key::PublicKey;
use crate::provider::CreateOptions;
use crate::verification::{KeyPurpose, VerificationMethod};

/// A DID document under construction.
///
/// Each step consumes the draft and returns it, so a failed step leaves
/// nothing half-built behind.
#[derive(Clone, Debug, Default)]
pub struct DocumentDraft {
    doc: Document,
    recovery_key: Option<PublicKey>,
    update_key: Option<PublicKey>,
}

impl DocumentDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key authorizing recovery of the DID.
    #[must_use]
    pub fn recovery_key(mut self, key: PublicKey) -> Self {
        self.recovery_key = Some(key);
        self
    }

    /// Set the key authorizing updates to the DID.
    #[must_use]
    pub fn update_key(mut self, key: PublicKey) -> Self {
        self.update_key = Some(key);
        self
    }

    /// Add a verification method.
    ///
    /// Chain to add multiple verification methods.
    #[must_use]
    pub fn verification_method(mut self, vm: VerificationMethod) -> Self {
        self.doc.verification_method.get_or_insert_with(Vec::new).push(vm);
        self
    }

    /// Reference the verification method with ID `vm_id` from the
    /// relationship for `purpose`.
    #[must_use]
    pub fn relationship(mut self, purpose: KeyPurpose, vm_id: &str) -> Self {
        self.doc.relationship_mut(purpose).push(Kind::String(vm_id.to_string()));
        self
    }

    /// Add a service endpoint.
    ///
    /// Chain to add multiple service endpoints.
    #[must_use]
    pub fn service(mut self, service: Service) -> Self {
        self.doc.service.get_or_insert_with(Vec::new).push(service);
        self
    }

    /// Finish the draft, separating the document from the keys passed to the
    /// DID method as creation options.
    #[must_use]
    pub fn build(self) -> (Document, CreateOptions) {
        let options = CreateOptions {
            recovery_key: self.recovery_key,
            update_key: self.update_key,
        };
        (self.doc, options)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn service(id: &str) -> Service {
        Service {
            id: id.to_string(),
            type_: "LinkedDomains".to_string(),
            service_endpoint: Kind::String(format!("https://{id}.example.com")),
            ..Service::default()
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let (doc, _) = DocumentDraft::new()
            .relationship(KeyPurpose::Authentication, "key-2")
            .relationship(KeyPurpose::Authentication, "key-1")
            .service(service("b"))
            .service(service("a"))
            .build();

        let refs: Vec<_> = doc
            .relationship(KeyPurpose::Authentication)
            .expect("should have refs")
            .iter()
            .filter_map(Kind::as_str)
            .collect();
        assert_eq!(refs, ["key-2", "key-1"]);

        let ids: Vec<_> = doc.service.iter().flatten().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn empty_build() {
        let (doc, options) = DocumentDraft::new().build();
        assert_eq!(doc, Document::default());
        assert!(options.recovery_key.is_none());
        assert!(options.update_key.is_none());
        assert_eq!(serde_json::to_value(&doc).unwrap(), Value::Object(serde_json::Map::new()));
    }
}
