//! Per-session conversation state.
//!
//! All mutable conversation state is owned by a [`SessionState`] held
//! inside a [`SessionEntry`]; there are no process-wide singletons.
//! Mutating operations serialize on the entry's mutex (single-flight
//! per session), while the `busy` flag stays readable from outside the
//! lock so a poller can observe an in-flight operation.

use std::sync::atomic::{AtomicBool, Ordering};

use secrecy::SecretString;
use tokio::sync::Mutex;

use extsmith_types::bundle::GenerationResult;
use extsmith_types::chat::ChatMessage;
use extsmith_types::requirements::Requirements;

use crate::llm::catalog::{DEFAULT_MODEL, DEFAULT_MODELS};

/// Fixed assistant greeting that opens every fresh transcript.
pub const GREETING: &str = "Hello! I can help you create a browser extension. \
What would you like your extension to be called?";

/// Mutable state of one requirements-gathering conversation.
pub struct SessionState {
    /// Ordered, append-only chat transcript.
    pub transcript: Vec<ChatMessage>,
    /// Structured requirements record, mutated only by merging model output.
    pub requirements: Requirements,
    /// API key for the remote model, supplied once and retained.
    pub api_key: Option<SecretString>,
    /// Model used for generation requests.
    pub selected_model: String,
    /// Most recent model listing shown to the user.
    pub available_models: Vec<String>,
    /// Artifact of the most recent successful generation run.
    pub artifact: Option<GenerationResult>,
}

impl SessionState {
    /// Fresh session: greeting transcript, empty requirements, default model.
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(GREETING)],
            requirements: Requirements::default(),
            api_key: None,
            selected_model: DEFAULT_MODEL.to_string(),
            available_models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            artifact: None,
        }
    }

    /// Store the API key for the rest of the session.
    pub fn set_credential(&mut self, key: SecretString) {
        self.api_key = Some(key);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry entry pairing session state with an externally readable
/// processing flag.
pub struct SessionEntry {
    busy: AtomicBool,
    pub state: Mutex<SessionState>,
}

impl SessionEntry {
    pub fn new(state: SessionState) -> Self {
        Self {
            busy: AtomicBool::new(false),
            state: Mutex::new(state),
        }
    }

    /// Whether a mutating operation is currently in flight.
    pub fn is_processing(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Mark the session busy for the lifetime of the returned guard.
    ///
    /// The flag is cleared on drop, so no exit path (including errors
    /// and panics) can leave the session marked in-progress.
    pub fn begin_processing(&self) -> ProcessingGuard<'_> {
        self.busy.store(true, Ordering::SeqCst);
        ProcessingGuard { busy: &self.busy }
    }
}

/// RAII guard clearing a session's busy flag.
pub struct ProcessingGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
