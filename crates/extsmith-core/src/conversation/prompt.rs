//! System instruction sent with every conversation turn.
//!
//! The instruction restates the target JSON schema and the current
//! requirements record so the model can carry known fields forward
//! instead of re-asking for them.

use extsmith_types::requirements::Requirements;

/// Build the fixed system instruction for the current requirements.
pub fn system_prompt(requirements: &Requirements) -> String {
    let current = serde_json::to_string_pretty(requirements)
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"You are an expert in creating browser extensions. Your goal is to help a user define the requirements for a browser extension through a conversation.
The user will talk to you, and you need to ask questions to fill out the following requirements structure.
When you have a value for a field, add it. Do not ask for it again.
Once all requirements are gathered, tell the user they can generate the extension.

Current requirements:
{current}

Your response MUST be a valid JSON object with two keys:
1. "response": A friendly, conversational reply to the user.
2. "requirements": The updated requirements JSON object. If you don't have new information for a field, keep the existing value.

The requirements structure is:
{{
    "name": "string",
    "description": "string",
    "target_browser": ["Chrome" | "Firefox"],
    "inject_urls": ["url_pattern"],
    "has_background_script": boolean,
    "has_popup": boolean,
    "has_options_page": boolean
}}

Keep your conversational response concise.
Ask one question at a time.
Start by asking for the extension name.
"#
    )
}

/// Compose the single outbound message: system instruction plus the
/// new user text.
pub fn outbound_message(requirements: &Requirements, user_text: &str) -> String {
    format!("{}\n\nUser input: {user_text}", system_prompt(requirements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_current_requirements() {
        let requirements = Requirements {
            name: "Tab Saver".to_string(),
            ..Default::default()
        };
        let prompt = system_prompt(&requirements);
        assert!(prompt.contains("\"name\": \"Tab Saver\""));
        assert!(prompt.contains("Ask one question at a time."));
    }

    #[test]
    fn test_outbound_message_appends_user_text() {
        let msg = outbound_message(&Requirements::default(), "call it Tab Saver");
        assert!(msg.ends_with("User input: call it Tab Saver"));
        assert!(msg.contains("Current requirements:"));
    }
}
