//! # DID Registrar
//!
//! An HTTP façade for registering and resolving Decentralized Identifiers
//! (DIDs) against a pluggable DID method.
//!
//! Clients submit public keys (with their roles and purposes) and service
//! endpoints. The registrar shapes them into a DID document, submits the
//! document to a [`DidMethod`] and reports the outcome as a registration job
//! state. A companion endpoint resolves a DID back into its document.
//!
//! The exposed endpoints depend on the operating [`Mode`]:
//!
//! | Mode        | Endpoints                                  |
//! |-------------|--------------------------------------------|
//! | `registrar` | `POST /1.0/register`                       |
//! | `resolver`  | `GET /resolveDID?did=<did>`                |
//! | `combined`  | `POST /1.0/register`, `GET /resolveDID`    |
//!
//! # Example
//!
//! ```rust,ignore
//! let router = did_registrar::router(Mode::Combined, method);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

mod config;
mod core;
pub mod document;
mod error;
mod handlers;
pub mod key;
mod provider;
mod register;
mod resolve;
pub mod verification;

pub use self::config::{Config, GenesisFile, Mode, TlsConfig};
pub use self::core::Kind;
pub use self::document::{Document, DocumentDraft, DocumentMetadata, Service};
pub use self::error::{Error, Result};
pub use self::handlers::{Handler, REGISTER_PATH, RESOLVE_PATH, handlers, router};
pub use self::key::{PublicKey, PublicKeyJwk};
pub use self::provider::{CreateOptions, DidMethod};
pub use self::register::{
    DidState, DocumentRequest, PublicKeyEntry, RegisterRequest, RegisterResponse,
    RegistrationState, Secret, SecretKey, register,
};
pub use self::resolve::{DID_LD_JSON, Resolution, ResolveError, resolve};
pub use self::verification::{KeyPurpose, VerificationMethod, VerificationMethodBuilder};
