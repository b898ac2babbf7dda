//! Test fixtures for the registrar: an in-memory DID method and sample keys.

pub mod keys;
mod method;

pub use crate::method::MockMethod;
