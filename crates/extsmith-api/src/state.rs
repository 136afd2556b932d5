//! Application state wiring the session registry and configuration.
//!
//! One logical conversation lives in one [`SessionEntry`]; the registry
//! maps session ids to entries. Mutating handlers lock the entry's
//! mutex, giving single-flight per session -- concurrent triggers from
//! the UI cannot interleave writes to a transcript or requirements
//! record. There is no cross-session shared mutable state.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use extsmith_core::conversation::session::{SessionEntry, SessionState};
use extsmith_infra::config::{load_global_config, resolve_output_root};
use extsmith_infra::filesystem::resolve_data_dir;
use extsmith_types::config::GlobalConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<DashMap<Uuid, Arc<SessionEntry>>>,
    pub config: GlobalConfig,
    pub output_root: PathBuf,
}

impl AppState {
    /// Initialize application state: data directory, config, output root.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let output_root = resolve_output_root(&config, &data_dir);
        tokio::fs::create_dir_all(&output_root).await?;

        Ok(Self::with_config(config, output_root))
    }

    /// Build state from explicit parts (used by tests).
    pub fn with_config(config: GlobalConfig, output_root: PathBuf) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            config,
            output_root,
        }
    }

    /// Create a fresh session and return its id.
    pub fn create_session(&self) -> Uuid {
        let id = Uuid::now_v7();
        let mut state = SessionState::new();
        state.selected_model = self.config.default_model.clone();
        self.sessions.insert(id, Arc::new(SessionEntry::new(state)));
        id
    }

    /// Look up a session entry by id.
    pub fn session(&self, id: &Uuid) -> Option<Arc<SessionEntry>> {
        self.sessions.get(id).map(|entry| Arc::clone(&entry))
    }
}
