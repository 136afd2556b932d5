//! Global configuration types for extsmith.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! the output root, default model, and requirements merge behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use std::fmt;
use std::str::FromStr;

/// How model-returned requirements are applied to the session record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Replace the record wholesale with the model's object, trusting
    /// the model not to regress known fields.
    #[default]
    Replace,
    /// Keep a previously non-empty field when the model returns an
    /// empty value for it.
    Merge,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::Replace => write!(f, "replace"),
            MergeStrategy::Merge => write!(f, "merge"),
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(MergeStrategy::Replace),
            "merge" => Ok(MergeStrategy::Merge),
            other => Err(format!("invalid merge strategy: '{other}'")),
        }
    }
}

/// Top-level configuration for the extsmith service.
///
/// Loaded from `{data_dir}/config.toml`. All fields have defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Model used for new sessions until the user picks another.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// How model-returned requirements are applied.
    #[serde(default)]
    pub merge_strategy: MergeStrategy,

    /// Override for the bundle output root. When unset, bundles land
    /// under `{data_dir}/bundles`.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            merge_strategy: MergeStrategy::default(),
            output_dir: None,
        }
    }
}
