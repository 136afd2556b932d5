//! Manifest construction and name derivation.
//!
//! Both derivations are pure: identical requirements always yield an
//! identical manifest and directory name.

use extsmith_types::manifest::{
    ActionDecl, BackgroundDecl, BrowserSpecificSettings, ContentScriptDecl, GeckoSettings,
    Manifest, OptionsUiDecl,
};
use extsmith_types::requirements::Requirements;

/// Manifest schema version emitted for every bundle.
pub const MANIFEST_VERSION: u32 = 3;

/// Version string stamped on every generated extension.
pub const EXTENSION_VERSION: &str = "1.0";

/// Directory name used when the requirements name has no alphanumerics.
pub const DEFAULT_DIR_NAME: &str = "my_extension";

/// Derive a filesystem-safe directory name from the extension name.
///
/// Keeps only alphanumeric characters, lower-cased; an empty result
/// falls back to [`DEFAULT_DIR_NAME`].
pub fn dir_name(name: &str) -> String {
    let derived: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    if derived.is_empty() {
        DEFAULT_DIR_NAME.to_string()
    } else {
        derived
    }
}

/// Deterministic gecko add-on id for Firefox builds.
fn gecko_id(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase().replace(' ', "-"))
}

/// Build the manifest record for a requirements record.
///
/// Feature members appear only when the corresponding requirement is
/// set; `content_scripts` additionally needs a non-empty URL list.
pub fn build_manifest(requirements: &Requirements) -> Manifest {
    Manifest {
        manifest_version: MANIFEST_VERSION,
        name: requirements.name.clone(),
        version: EXTENSION_VERSION.to_string(),
        description: requirements.description.clone(),
        background: requirements.has_background_script.then(|| BackgroundDecl {
            service_worker: "background.js".to_string(),
        }),
        content_scripts: (!requirements.inject_urls.is_empty()).then(|| {
            vec![ContentScriptDecl {
                matches: requirements.inject_urls.clone(),
                js: vec!["content.js".to_string()],
            }]
        }),
        action: requirements.has_popup.then(|| ActionDecl {
            default_popup: "popup.html".to_string(),
        }),
        options_ui: requirements.has_options_page.then(|| OptionsUiDecl {
            page: "options.html".to_string(),
            open_in_tab: true,
        }),
        browser_specific_settings: requirements.targets_firefox().then(|| {
            BrowserSpecificSettings {
                gecko: GeckoSettings {
                    id: gecko_id(&requirements.name),
                },
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extsmith_types::requirements::TargetBrowser;

    #[test]
    fn test_dir_name_strips_symbols_and_lowercases() {
        assert_eq!(dir_name("My Cool Ext!"), "mycoolext");
        assert_eq!(dir_name("Tab Saver"), "tabsaver");
        assert_eq!(dir_name("ABC123"), "abc123");
    }

    #[test]
    fn test_dir_name_fallback() {
        assert_eq!(dir_name(""), DEFAULT_DIR_NAME);
        assert_eq!(dir_name("!!! ---"), DEFAULT_DIR_NAME);
    }

    #[test]
    fn test_gecko_id_hyphenates() {
        assert_eq!(gecko_id("Tab Saver"), "tab-saver@example.com");
    }

    #[test]
    fn test_minimal_manifest_has_no_feature_keys() {
        let requirements = Requirements {
            name: "Plain".to_string(),
            description: "Nothing extra".to_string(),
            ..Default::default()
        };

        let manifest = build_manifest(&requirements);
        assert_eq!(manifest.manifest_version, 3);
        assert_eq!(manifest.version, "1.0");
        assert!(manifest.background.is_none());
        assert!(manifest.content_scripts.is_none());
        assert!(manifest.action.is_none());
        assert!(manifest.options_ui.is_none());
        assert!(manifest.browser_specific_settings.is_none());
    }

    #[test]
    fn test_full_manifest_features() {
        let requirements = Requirements {
            name: "Busy Ext".to_string(),
            description: "Everything on".to_string(),
            target_browser: vec![TargetBrowser::Chrome, TargetBrowser::Firefox],
            inject_urls: vec!["https://example.com/*".to_string()],
            has_background_script: true,
            has_popup: true,
            has_options_page: true,
        };

        let manifest = build_manifest(&requirements);
        assert_eq!(
            manifest.background.unwrap().service_worker,
            "background.js"
        );
        let scripts = manifest.content_scripts.unwrap();
        assert_eq!(scripts[0].matches, vec!["https://example.com/*"]);
        assert_eq!(scripts[0].js, vec!["content.js"]);
        assert_eq!(manifest.action.unwrap().default_popup, "popup.html");
        let options = manifest.options_ui.unwrap();
        assert_eq!(options.page, "options.html");
        assert!(options.open_in_tab);
        assert_eq!(
            manifest.browser_specific_settings.unwrap().gecko.id,
            "busy-ext@example.com"
        );
    }

    #[test]
    fn test_empty_inject_urls_omit_content_scripts() {
        let requirements = Requirements {
            name: "x".to_string(),
            description: "y".to_string(),
            has_background_script: true,
            ..Default::default()
        };
        assert!(build_manifest(&requirements).content_scripts.is_none());
    }

    #[test]
    fn test_manifest_is_deterministic() {
        let requirements = Requirements {
            name: "Tab Saver".to_string(),
            description: "Saves tabs".to_string(),
            target_browser: vec![TargetBrowser::Firefox],
            has_background_script: true,
            ..Default::default()
        };

        let a = serde_json::to_vec_pretty(&build_manifest(&requirements)).unwrap();
        let b = serde_json::to_vec_pretty(&build_manifest(&requirements)).unwrap();
        assert_eq!(a, b);
    }
}
