//! The extension requirements record.
//!
//! This is the structured output of the requirements-gathering
//! conversation. Fields default to empty/false and are only mutated by
//! merging model output; the conversation service trusts the model's
//! returned object (see the merge strategy in [`crate::config`]).

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Browser the generated extension targets.
///
/// Serialized capitalized ("Chrome", "Firefox") to match the JSON the
/// model is instructed to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetBrowser {
    Chrome,
    Firefox,
}

impl fmt::Display for TargetBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetBrowser::Chrome => write!(f, "Chrome"),
            TargetBrowser::Firefox => write!(f, "Firefox"),
        }
    }
}

impl FromStr for TargetBrowser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chrome" => Ok(TargetBrowser::Chrome),
            "firefox" => Ok(TargetBrowser::Firefox),
            other => Err(format!("invalid target browser: '{other}'")),
        }
    }
}

/// Structured description of the browser extension to be generated.
///
/// Every field carries a serde default so a partial object from the
/// model deserializes with the missing fields left empty/false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_browser: Vec<TargetBrowser>,
    #[serde(default)]
    pub inject_urls: Vec<String>,
    #[serde(default)]
    pub has_background_script: bool,
    #[serde(default)]
    pub has_popup: bool,
    #[serde(default)]
    pub has_options_page: bool,
}

impl Requirements {
    /// Whether the record carries the fields generation requires.
    pub fn is_generatable(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty()
    }

    /// Whether Firefox is among the targeted browsers.
    pub fn targets_firefox(&self) -> bool {
        self.target_browser.contains(&TargetBrowser::Firefox)
    }
}
