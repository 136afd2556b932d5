//! Business logic for extsmith.
//!
//! Two cooperating pieces, both free of concrete I/O:
//!
//! - [`conversation`] -- the requirements-gathering chat service,
//!   generic over the [`llm::provider::TextModel`] trait.
//! - [`bundle`] -- the deterministic manifest/stub/zip generator,
//!   generic over the [`bundle::store::BundleStore`] storage port.
//!
//! Concrete adapters (the Gemini HTTP client, the local filesystem
//! store) live in extsmith-infra.

pub mod bundle;
pub mod conversation;
pub mod llm;
