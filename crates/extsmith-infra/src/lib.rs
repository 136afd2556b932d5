//! Infrastructure adapters for extsmith.
//!
//! Concrete implementations of the ports defined in extsmith-core:
//! the Gemini HTTP client, the local-disk bundle store, and the
//! `config.toml` loader.

pub mod config;
pub mod filesystem;
pub mod llm;
