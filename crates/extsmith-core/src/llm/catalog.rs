//! Model catalog: discovery with a fixed fallback list.
//!
//! Listing never fails. Any discovery error (including a missing
//! credential) is logged and the fixed default list is returned with
//! the `fell_back` flag set so the caller can surface a non-fatal
//! warning.

use tracing::warn;

use extsmith_types::llm::ModelDescriptor;

use crate::llm::provider::TextModel;

/// Model used when nothing else has been selected.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Fixed fallback list used when discovery fails.
pub const DEFAULT_MODELS: [&str; 2] = ["gemini-1.5-flash", "gemini-1.5-pro"];

/// Namespace prefix the discovery endpoint puts on model identifiers.
const MODEL_NAME_PREFIX: &str = "models/";

/// The generation capability a usable model must advertise.
const GENERATE_CONTENT: &str = "generateContent";

/// Result of a model listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelListing {
    /// Sorted, prefix-stripped model identifiers.
    pub models: Vec<String>,
    /// True when discovery failed and the fixed defaults were used.
    pub fell_back: bool,
}

impl ModelListing {
    fn fallback() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            fell_back: true,
        }
    }
}

/// List available models through `provider`, falling back to
/// [`DEFAULT_MODELS`] on any failure. `provider` is `None` when no
/// credential has been configured yet.
pub async fn list_models<P: TextModel>(provider: Option<&P>) -> ModelListing {
    let Some(provider) = provider else {
        warn!("model listing requested without a credential, using defaults");
        return ModelListing::fallback();
    };

    match provider.list_models().await {
        Ok(descriptors) => {
            let mut models = filter_generation_models(&descriptors);
            models.sort();
            ModelListing {
                models,
                fell_back: false,
            }
        }
        Err(err) => {
            warn!(provider = provider.name(), error = %err, "model discovery failed, using defaults");
            ModelListing::fallback()
        }
    }
}

/// Keep descriptors that support content generation and strip the
/// namespace prefix from their identifiers.
fn filter_generation_models(descriptors: &[ModelDescriptor]) -> Vec<String> {
    descriptors
        .iter()
        .filter(|d| {
            d.supported_generation_methods
                .iter()
                .any(|m| m == GENERATE_CONTENT)
        })
        .map(|d| {
            d.name
                .strip_prefix(MODEL_NAME_PREFIX)
                .unwrap_or(&d.name)
                .to_string()
        })
        .collect()
}

/// Reconcile the session's selected model against a fresh listing.
///
/// Keeps the current selection if still listed; otherwise prefers
/// [`DEFAULT_MODEL`] when available, else the first listed entry.
pub fn reconcile_selection(current: &str, models: &[String]) -> String {
    if models.iter().any(|m| m == current) {
        current.to_string()
    } else if models.iter().any(|m| m == DEFAULT_MODEL) {
        DEFAULT_MODEL.to_string()
    } else {
        models.first().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extsmith_types::llm::{ChatTurn, LlmError};

    /// Provider whose discovery either succeeds with canned descriptors
    /// or fails with a provider error.
    struct FakeProvider {
        descriptors: Option<Vec<ModelDescriptor>>,
    }

    impl TextModel for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn generate(
            &self,
            _model: &str,
            _history: &[ChatTurn],
            _message: &str,
        ) -> Result<String, LlmError> {
            unreachable!("catalog tests never generate")
        }

        async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LlmError> {
            match &self.descriptors {
                Some(d) => Ok(d.clone()),
                None => Err(LlmError::Provider {
                    message: "HTTP 500".to_string(),
                }),
            }
        }
    }

    fn descriptor(name: &str, methods: &[&str]) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_listing_filters_strips_and_sorts() {
        let provider = FakeProvider {
            descriptors: Some(vec![
                descriptor("models/gemini-1.5-pro", &["generateContent"]),
                descriptor("models/embedding-001", &["embedContent"]),
                descriptor("models/gemini-1.5-flash", &["generateContent", "countTokens"]),
            ]),
        };

        let listing = list_models(Some(&provider)).await;
        assert!(!listing.fell_back);
        assert_eq!(listing.models, vec!["gemini-1.5-flash", "gemini-1.5-pro"]);
    }

    #[tokio::test]
    async fn test_listing_failure_falls_back_to_defaults() {
        let provider = FakeProvider { descriptors: None };

        let listing = list_models(Some(&provider)).await;
        assert!(listing.fell_back);
        assert_eq!(listing.models, vec!["gemini-1.5-flash", "gemini-1.5-pro"]);
    }

    #[tokio::test]
    async fn test_listing_without_credential_falls_back() {
        let listing = list_models::<FakeProvider>(None).await;
        assert!(listing.fell_back);
        assert_eq!(listing.models.len(), 2);
    }

    #[test]
    fn test_reconcile_keeps_current_when_listed() {
        let models = vec!["gemini-1.5-flash".to_string(), "gemini-2.0-pro".to_string()];
        assert_eq!(reconcile_selection("gemini-2.0-pro", &models), "gemini-2.0-pro");
    }

    #[test]
    fn test_reconcile_prefers_default_when_current_missing() {
        let models = vec!["gemini-1.5-flash".to_string(), "gemini-2.0-pro".to_string()];
        assert_eq!(reconcile_selection("gone-model", &models), DEFAULT_MODEL);
    }

    #[test]
    fn test_reconcile_falls_back_to_first_entry() {
        let models = vec!["gemini-2.0-pro".to_string()];
        assert_eq!(reconcile_selection("gone-model", &models), "gemini-2.0-pro");
    }

    #[test]
    fn test_reconcile_empty_listing_yields_empty() {
        assert_eq!(reconcile_selection("anything", &[]), "");
    }
}
