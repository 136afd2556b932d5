//! Extraction of the `{response, requirements}` envelope from raw
//! model text.
//!
//! Models wrap JSON in prose or code fences often enough that the
//! extractor takes the first `{` through the last `}` rather than
//! parsing the whole reply.

use serde::Deserialize;

use extsmith_types::error::ChatError;
use extsmith_types::requirements::Requirements;

/// Reply used when the envelope lacks a `response` key.
pub const FALLBACK_REPLY: &str =
    "I'm not sure how to respond to that. Could you try again?";

/// The JSON envelope the model is instructed to return.
#[derive(Debug, Deserialize)]
pub struct ModelEnvelope {
    /// Conversational reply; absent -> [`FALLBACK_REPLY`].
    pub response: Option<String>,
    /// Updated requirements record; absent -> prior record kept.
    pub requirements: Option<Requirements>,
}

/// Slice out the first-`{`-to-last-`}` substring of `text`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse the envelope out of raw model text.
///
/// Fails with [`ChatError::MalformedResponse`] when no braced substring
/// exists or the substring is not valid envelope JSON.
pub fn parse_envelope(text: &str) -> Result<ModelEnvelope, ChatError> {
    let json = extract_json_object(text).ok_or_else(|| {
        ChatError::MalformedResponse("no JSON object in response".to_string())
    })?;

    serde_json::from_str(json)
        .map_err(|e| ChatError::MalformedResponse(e.to_string()))
}
