//! Bundle generator: manifest + stubs + zip archive.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use extsmith_types::bundle::GenerationResult;
use extsmith_types::error::GenerateError;
use extsmith_types::manifest::Manifest;
use extsmith_types::requirements::Requirements;

use crate::bundle::manifest::{build_manifest, dir_name};
use crate::bundle::store::BundleStore;
use crate::bundle::stubs;

/// Produces extension bundles from a completed requirements record.
///
/// All filesystem access goes through the [`BundleStore`] port; the zip
/// bytes are assembled in memory so the generator stays free of any
/// direct disk dependency.
pub struct BundleGenerator<S> {
    store: S,
}

impl<S: BundleStore> BundleGenerator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Generate the bundle directory and its zip archive.
    ///
    /// Any prior output directory for the same derived name is removed
    /// first, so regeneration never leaves stale files behind.
    pub async fn generate(
        &self,
        requirements: &Requirements,
    ) -> Result<GenerationResult, GenerateError> {
        if !requirements.is_generatable() {
            return Err(GenerateError::Validation(
                "extension name and description are required".to_string(),
            ));
        }

        let dir = PathBuf::from(dir_name(&requirements.name));
        self.store.remove_dir(&dir).await?;

        let manifest = build_manifest(requirements);
        self.write_bundle_files(&dir, &manifest).await?;

        let archive = self.archive_dir(&dir).await?;
        let zip_path = PathBuf::from(format!("{}.zip", dir.display()));
        self.store.write_file(&zip_path, &archive).await?;

        info!(zip = %zip_path.display(), "bundle generation complete");
        Ok(GenerationResult {
            zip_path,
            complete: true,
        })
    }

    /// Write the manifest and the stub for each feature it declares.
    async fn write_bundle_files(
        &self,
        dir: &Path,
        manifest: &Manifest,
    ) -> Result<(), GenerateError> {
        let manifest_json = serde_json::to_vec_pretty(manifest)
            .map_err(|e| GenerateError::Storage(e.to_string()))?;
        self.store
            .write_file(&dir.join("manifest.json"), &manifest_json)
            .await?;

        if manifest.content_scripts.is_some() {
            self.store
                .write_file(&dir.join("content.js"), stubs::CONTENT_SCRIPT.as_bytes())
                .await?;
        }
        if manifest.background.is_some() {
            self.store
                .write_file(&dir.join("background.js"), stubs::BACKGROUND_SCRIPT.as_bytes())
                .await?;
        }
        if manifest.action.is_some() {
            self.store
                .write_file(&dir.join("popup.html"), stubs::POPUP_HTML.as_bytes())
                .await?;
            self.store
                .write_file(&dir.join("popup.js"), stubs::POPUP_JS.as_bytes())
                .await?;
            self.store
                .write_file(&dir.join("popup.css"), stubs::POPUP_CSS.as_bytes())
                .await?;
        }
        if manifest.options_ui.is_some() {
            self.store
                .write_file(&dir.join("options.html"), stubs::OPTIONS_HTML.as_bytes())
                .await?;
            self.store
                .write_file(&dir.join("options.js"), stubs::OPTIONS_JS.as_bytes())
                .await?;
            self.store
                .write_file(&dir.join("options.css"), stubs::OPTIONS_CSS.as_bytes())
                .await?;
        }

        Ok(())
    }

    /// Zip every file under `dir` into an in-memory archive.
    ///
    /// Entries are sorted by relative path so identical inputs always
    /// produce identical archive bytes.
    async fn archive_dir(&self, dir: &Path) -> Result<Vec<u8>, GenerateError> {
        let mut entries = self.store.list_dir(dir).await?;
        entries.sort();

        // Fixed timestamp keeps the archive reproducible.
        let options =
            SimpleFileOptions::default().last_modified_time(zip::DateTime::default());

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for entry in &entries {
            let data = self.store.read_file(&dir.join(entry)).await?;
            let name = archive_entry_name(entry);
            writer
                .start_file(name, options)
                .map_err(|e| GenerateError::Archive(e.to_string()))?;
            writer
                .write_all(&data)
                .map_err(|e| GenerateError::Archive(e.to_string()))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| GenerateError::Archive(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

/// Archive entry name for a relative path, always '/'-separated.
fn archive_entry_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
