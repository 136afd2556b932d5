//! Generation artifact types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a successful bundle generation run.
///
/// One is produced per `generate` call; a new run invalidates (and
/// removes) the previous run's output directory for the same name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Location of the produced zip archive, relative to the output root.
    pub zip_path: PathBuf,
    /// Set once the archive has been fully written.
    pub complete: bool,
}
