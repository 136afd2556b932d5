//! Shared domain types for extsmith.
//!
//! This crate contains the core domain types used across the extsmith
//! service: chat transcripts, the extension requirements record, the
//! manifest schema, generation artifacts, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod bundle;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod manifest;
pub mod requirements;
