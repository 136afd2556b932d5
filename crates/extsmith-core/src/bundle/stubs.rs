//! Fixed-content stub files written alongside the manifest.
//!
//! Contents are static boilerplate; the manifest is what wires them in.

pub const CONTENT_SCRIPT: &str = "// Content script for your extension\n\nconsole.log('Content script loaded!');";

pub const BACKGROUND_SCRIPT: &str = "// Background script for your extension\n\nconsole.log('Background script loaded!');";

pub const POPUP_HTML: &str = "<html><head><title>Popup</title><link rel='stylesheet' href='popup.css'></head><body><h1>Extension Popup</h1><script src='popup.js'></script></body></html>";

pub const POPUP_JS: &str = "console.log('Popup script loaded!');";

pub const POPUP_CSS: &str =
    "body { width: 200px; font-family: sans-serif; text-align: center; }";

pub const OPTIONS_HTML: &str = "<html><head><title>Options</title><link rel='stylesheet' href='options.css'></head><body><h1>Extension Options</h1><script src='options.js'></script></body></html>";

pub const OPTIONS_JS: &str = "console.log('Options script loaded!');";

pub const OPTIONS_CSS: &str = "body { width: 400px; font-family: sans-serif; }";
