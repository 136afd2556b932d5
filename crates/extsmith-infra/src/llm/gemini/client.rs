//! GeminiClient -- concrete [`TextModel`] implementation for the Google
//! Gemini API.
//!
//! Sends requests to `models/{model}:generateContent` and lists models
//! through the discovery endpoint. The API key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use extsmith_core::llm::provider::TextModel;
use extsmith_types::llm::{ChatTurn, LlmError, ModelDescriptor};

use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, ListModelsResponse, Part,
};

/// Google Gemini text-generation client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the auth header. The struct intentionally does not
/// derive `Debug`.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map history turns plus the new message into request contents.
    fn to_contents(history: &[ChatTurn], message: &str) -> Vec<Content> {
        history
            .iter()
            .map(|turn| Content {
                role: turn.role.to_string(),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .chain(std::iter::once(Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: message.to_string(),
                }],
            }))
            .collect()
    }

    /// Map a non-success HTTP status to an [`LlmError`].
    fn status_error(status: reqwest::StatusCode, body: String) -> LlmError {
        match status.as_u16() {
            401 | 403 => LlmError::AuthenticationFailed,
            429 => LlmError::RateLimited,
            _ => LlmError::Provider {
                message: format!("HTTP {status}: {body}"),
            },
        }
    }
}

impl TextModel for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        model: &str,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: Self::to_contents(history, message),
        };
        let url = self.url(&format!("/v1beta/models/{model}:generateContent"));

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, error_body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        parsed.text().ok_or_else(|| {
            LlmError::Deserialization("response contained no candidates".to_string())
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LlmError> {
        let url = self.url("/v1beta/models");

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, error_body));
        }

        let parsed: ListModelsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(parsed.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extsmith_types::llm::TurnRole;

    fn make_client() -> GeminiClient {
        GeminiClient::new(SecretString::from("test-key-not-real"))
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_client().name(), "gemini");
    }

    #[test]
    fn test_base_url_override() {
        let client = make_client().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            client.url("/v1beta/models"),
            "http://localhost:8080/v1beta/models"
        );
    }

    #[test]
    fn test_to_contents_appends_new_turn() {
        let history = vec![ChatTurn::model("greeting"), ChatTurn::user("hi")];
        let contents = GeminiClient::to_contents(&history, "new message");

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, TurnRole::Model.to_string());
        assert_eq!(contents[1].role, "user");
        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[2].parts[0].text, "new message");
    }

    #[test]
    fn test_status_error_mapping() {
        let err = GeminiClient::status_error(
            reqwest::StatusCode::UNAUTHORIZED,
            String::new(),
        );
        assert!(matches!(err, LlmError::AuthenticationFailed));

        let err = GeminiClient::status_error(
            reqwest::StatusCode::FORBIDDEN,
            String::new(),
        );
        assert!(matches!(err, LlmError::AuthenticationFailed));

        let err = GeminiClient::status_error(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            String::new(),
        );
        assert!(matches!(err, LlmError::RateLimited));

        let err = GeminiClient::status_error(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "quota".to_string(),
        );
        match err {
            LlmError::Provider { message } => assert!(message.contains("quota")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
