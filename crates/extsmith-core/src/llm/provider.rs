//! TextModel trait definition.
//!
//! This is the abstraction the conversation service and model catalog
//! depend on. Uses RPITIT (native async fn in traits, Rust 2024
//! edition). The concrete implementation lives in extsmith-infra
//! (`GeminiClient`).

use extsmith_types::llm::{ChatTurn, LlmError, ModelDescriptor};

/// Trait for remote text-generation backends.
pub trait TextModel: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send the role-mapped `history` plus one new user-side `message`
    /// to `model` and return the raw response text.
    fn generate(
        &self,
        model: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;

    /// Query the discovery endpoint for available model descriptors.
    fn list_models(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ModelDescriptor>, LlmError>> + Send;
}
