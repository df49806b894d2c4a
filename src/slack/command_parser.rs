use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::SlackError;

/// Structure representing a Slack slash command event.
/// This contains all the fields that Slack sends when a user invokes a slash command.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SlackCommandEvent {
    pub token: String,
    pub team_id: String,
    pub team_domain: String,
    pub channel_id: String,
    pub channel_name: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

/// Decodes a URL-encoded form component (`+` stands for a space).
///
/// # Errors
///
/// Returns an error message if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use slackcmd::slack::command_parser::decode_url_component;
///
/// assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {e}"))
}

/// Parses URL-encoded form data into a [`SlackCommandEvent`].
///
/// Missing fields are left empty; the authenticator and tokenizer decide
/// what an empty token or text means.
///
/// # Errors
///
/// Returns [`SlackError::ParseError`] if a key or value fails to decode.
///
/// # Examples
///
/// ```
/// use slackcmd::slack::command_parser::parse_form_data;
///
/// let form_data = "token=abc123&team_id=T123&channel_name=general&\
///                  command=%2Fkv&text=echo+-u+hello";
///
/// let event = parse_form_data(form_data).unwrap();
/// assert_eq!(event.command, "/kv");
/// assert_eq!(event.text, "echo -u hello");
/// ```
pub fn parse_form_data(form_data: &str) -> Result<SlackCommandEvent, SlackError> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&') {
        if let Some((raw_key, raw_value)) = pair.split_once('=') {
            let key = decode_url_component(raw_key)
                .map_err(|e| SlackError::ParseError(format!("Failed to decode key: {e}")))?;
            let value = decode_url_component(raw_value)
                .map_err(|e| SlackError::ParseError(format!("Failed to decode value: {e}")))?;
            map.insert(key, value);
        }
    }

    let mut field = |name: &str| map.remove(name).unwrap_or_default();

    Ok(SlackCommandEvent {
        token: field("token"),
        team_id: field("team_id"),
        team_domain: field("team_domain"),
        channel_id: field("channel_id"),
        channel_name: field("channel_name"),
        user_id: field("user_id"),
        user_name: field("user_name"),
        command: field("command"),
        text: field("text"),
        response_url: field("response_url"),
        trigger_id: field("trigger_id"),
    })
}
