//! Typed MV3 manifest subset emitted by the bundle generator.
//!
//! Optional members use `skip_serializing_if` so that features the
//! requirements record does not ask for never appear in the serialized
//! JSON at all (the end-to-end determinism tests rely on this).

use serde::{Deserialize, Serialize};

/// Subset of a Manifest V3 `manifest.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest_version: u32,
    pub name: String,
    pub version: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundDecl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_scripts: Option<Vec<ContentScriptDecl>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionDecl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_ui: Option<OptionsUiDecl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_specific_settings: Option<BrowserSpecificSettings>,
}

/// Background service-worker declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundDecl {
    pub service_worker: String,
}

/// A single content-script declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentScriptDecl {
    pub matches: Vec<String>,
    pub js: Vec<String>,
}

/// Toolbar action (popup) declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDecl {
    pub default_popup: String,
}

/// Options page declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsUiDecl {
    pub page: String,
    pub open_in_tab: bool,
}

/// Firefox-specific settings block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserSpecificSettings {
    pub gecko: GeckoSettings,
}

/// Gecko add-on identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeckoSettings {
    pub id: String,
}
