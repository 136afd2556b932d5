//! Conversation service: one requirements-gathering turn at a time.

use tracing::{debug, info};

use extsmith_types::chat::{ChatMessage, MessageRole};
use extsmith_types::config::MergeStrategy;
use extsmith_types::error::ChatError;
use extsmith_types::llm::ChatTurn;
use extsmith_types::requirements::Requirements;

use crate::conversation::envelope::{parse_envelope, FALLBACK_REPLY};
use crate::conversation::prompt::outbound_message;
use crate::conversation::session::SessionState;
use crate::llm::provider::TextModel;

/// Drives conversation turns against a text-generation provider.
///
/// The provider is `None` until the session has a credential; submitting
/// without one fails with [`ChatError::MissingCredential`] (after the
/// blank-input check, which never contacts the remote service).
pub struct ConversationService<P> {
    provider: Option<P>,
    merge_strategy: MergeStrategy,
}

impl<P: TextModel> ConversationService<P> {
    pub fn new(provider: Option<P>, merge_strategy: MergeStrategy) -> Self {
        Self {
            provider,
            merge_strategy,
        }
    }

    /// Process one user turn.
    ///
    /// On success, appends exactly two transcript entries (user, then
    /// assistant) and folds the returned requirements into the session;
    /// both mutations land together after the remote call completes. On
    /// any failure the transcript and requirements are left untouched.
    pub async fn submit(
        &self,
        state: &mut SessionState,
        user_text: &str,
    ) -> Result<String, ChatError> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let provider = self.provider.as_ref().ok_or(ChatError::MissingCredential)?;

        let history = map_history(&state.transcript);
        let message = outbound_message(&state.requirements, user_text);

        debug!(model = %state.selected_model, turns = history.len(), "sending conversation turn");
        let raw = provider
            .generate(&state.selected_model, &history, &message)
            .await?;

        let envelope = parse_envelope(&raw)?;
        let reply = envelope
            .response
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        state.transcript.push(ChatMessage::user(user_text));
        state.transcript.push(ChatMessage::assistant(reply.clone()));
        if let Some(updated) = envelope.requirements {
            state.requirements =
                apply_requirements(&state.requirements, updated, self.merge_strategy);
        }

        info!(
            transcript_len = state.transcript.len(),
            name = %state.requirements.name,
            "conversation turn complete"
        );
        Ok(reply)
    }
}

/// Role-map the transcript for the remote API (assistant -> "model").
pub fn map_history(transcript: &[ChatMessage]) -> Vec<ChatTurn> {
    transcript
        .iter()
        .map(|msg| match msg.role {
            MessageRole::User => ChatTurn::user(msg.content.clone()),
            MessageRole::Assistant => ChatTurn::model(msg.content.clone()),
        })
        .collect()
}

/// Fold the model's requirements object into the prior record.
///
/// `Replace` takes the model's object wholesale. `Merge` keeps a prior
/// non-empty string or list when the model returns it empty; booleans
/// are always taken from the model (false is indistinguishable from
/// "unset" there).
fn apply_requirements(
    prior: &Requirements,
    updated: Requirements,
    strategy: MergeStrategy,
) -> Requirements {
    match strategy {
        MergeStrategy::Replace => updated,
        MergeStrategy::Merge => Requirements {
            name: keep_if_empty(updated.name, &prior.name),
            description: keep_if_empty(updated.description, &prior.description),
            target_browser: if updated.target_browser.is_empty() {
                prior.target_browser.clone()
            } else {
                updated.target_browser
            },
            inject_urls: if updated.inject_urls.is_empty() {
                prior.inject_urls.clone()
            } else {
                updated.inject_urls
            },
            has_background_script: updated.has_background_script,
            has_popup: updated.has_popup,
            has_options_page: updated.has_options_page,
        },
    }
}

fn keep_if_empty(updated: String, prior: &str) -> String {
    if updated.is_empty() {
        prior.to_string()
    } else {
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use extsmith_types::llm::{LlmError, ModelDescriptor};
    use extsmith_types::requirements::TargetBrowser;

    use crate::conversation::session::GREETING;

    /// Provider returning a canned reply and counting calls.
    struct FakeProvider {
        reply: String,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextModel for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn generate(
            &self,
            _model: &str,
            history: &[ChatTurn],
            message: &str,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // The greeting must be role-mapped into the history, and the
            // outbound message must carry the system instruction.
            assert!(!history.is_empty());
            assert!(message.contains("User input:"));
            Ok(self.reply.clone())
        }

        async fn list_models(&self) -> Result<Vec<ModelDescriptor>, LlmError> {
            Ok(Vec::new())
        }
    }

    fn service(reply: &str) -> ConversationService<FakeProvider> {
        ConversationService::new(Some(FakeProvider::new(reply)), MergeStrategy::Replace)
    }

    #[tokio::test]
    async fn test_successful_turn_appends_two_entries_and_replaces() {
        let svc = service(
            r#"{"response": "Nice name!", "requirements": {"name": "Tab Saver"}}"#,
        );
        let mut state = SessionState::new();

        let reply = svc.submit(&mut state, "call it Tab Saver").await.unwrap();
        assert_eq!(reply, "Nice name!");
        // Greeting + user + assistant.
        assert_eq!(state.transcript.len(), 3);
        assert_eq!(state.transcript[1].role, MessageRole::User);
        assert_eq!(state.transcript[1].content, "call it Tab Saver");
        assert_eq!(state.transcript[2].role, MessageRole::Assistant);
        assert_eq!(state.transcript[2].content, "Nice name!");
        assert_eq!(state.requirements.name, "Tab Saver");
        // Wholesale replacement: fields the model omitted reset to default.
        assert!(state.requirements.description.is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_provider() {
        let svc = service(r#"{"response": "unused"}"#);
        let mut state = SessionState::new();

        for blank in ["", "   ", "\n\t"] {
            let err = svc.submit(&mut state, blank).await.unwrap_err();
            assert!(matches!(err, ChatError::EmptyInput));
        }
        assert_eq!(svc.provider.as_ref().unwrap().call_count(), 0);
        assert_eq!(state.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let svc: ConversationService<FakeProvider> =
            ConversationService::new(None, MergeStrategy::Replace);
        let mut state = SessionState::new();

        let err = svc.submit(&mut state, "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::MissingCredential));
        assert_eq!(state.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_braceless_reply_leaves_state_unchanged() {
        let svc = service("I refuse to emit JSON today.");
        let mut state = SessionState::new();
        state.requirements.name = "Kept".to_string();

        let err = svc.submit(&mut state, "hello").await.unwrap_err();
        assert!(matches!(err, ChatError::MalformedResponse(_)));
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.requirements.name, "Kept");
    }

    #[tokio::test]
    async fn test_missing_response_key_uses_fallback() {
        let svc = service(r#"{"requirements": {"name": "Tab Saver"}}"#);
        let mut state = SessionState::new();

        let reply = svc.submit(&mut state, "hello").await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
        assert_eq!(state.requirements.name, "Tab Saver");
    }

    #[tokio::test]
    async fn test_missing_requirements_keeps_prior_record() {
        let svc = service(r#"{"response": "Sorry, say again?"}"#);
        let mut state = SessionState::new();
        state.requirements.name = "Tab Saver".to_string();

        svc.submit(&mut state, "hello").await.unwrap();
        assert_eq!(state.requirements.name, "Tab Saver");
        assert_eq!(state.transcript.len(), 3);
    }

    #[tokio::test]
    async fn test_prose_wrapped_envelope_is_accepted() {
        let svc = service(
            "Here you go:\n```json\n{\"response\": \"ok\", \"requirements\": {\"name\": \"X\"}}\n```",
        );
        let mut state = SessionState::new();

        let reply = svc.submit(&mut state, "hello").await.unwrap();
        assert_eq!(reply, "ok");
        assert_eq!(state.requirements.name, "X");
    }

    #[tokio::test]
    async fn test_merge_strategy_keeps_prior_nonempty_fields() {
        let svc = ConversationService::new(
            Some(FakeProvider::new(
                r#"{"response": "ok", "requirements": {"description": "Saves tabs"}}"#,
            )),
            MergeStrategy::Merge,
        );
        let mut state = SessionState::new();
        state.requirements.name = "Tab Saver".to_string();
        state.requirements.target_browser = vec![TargetBrowser::Firefox];

        svc.submit(&mut state, "it saves tabs").await.unwrap();
        assert_eq!(state.requirements.name, "Tab Saver");
        assert_eq!(state.requirements.description, "Saves tabs");
        assert_eq!(state.requirements.target_browser, vec![TargetBrowser::Firefox]);
    }

    #[test]
    fn test_map_history_roles() {
        let transcript = vec![
            ChatMessage::assistant(GREETING),
            ChatMessage::user("hi"),
        ];
        let history = map_history(&transcript);
        assert_eq!(history[0].role, extsmith_types::llm::TurnRole::Model);
        assert_eq!(history[1].role, extsmith_types::llm::TurnRole::User);
        assert_eq!(history[1].text, "hi");
    }
}
