use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::SlackError;

/// Returns the request body of a Lambda proxy event, decoding it when API
/// Gateway marked it as base64.
///
/// # Errors
///
/// Returns [`SlackError::ParseError`] if the body is missing, not a string,
/// or not valid base64 / UTF-8.
pub fn extract_body(payload: &Value) -> Result<String, SlackError> {
    let Some(body) = payload.get("body") else {
        return Err(SlackError::ParseError("Missing body".to_string()));
    };

    let Some(body_str) = body.as_str() else {
        return Err(SlackError::ParseError("Invalid body format".to_string()));
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !encoded {
        return Ok(body_str.to_string());
    }

    let bytes = STANDARD
        .decode(body_str)
        .map_err(|e| SlackError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| SlackError::ParseError(format!("Body is not UTF-8: {e}")))
}

/// Case-insensitive header lookup.
pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
