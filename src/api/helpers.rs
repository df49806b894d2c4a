//! Common helper functions for API handlers.
//!
//! Lambda proxy responses are plain JSON values of the form
//! `{ statusCode, headers, body }`.

use serde_json::{Value, json};

use crate::slack::response_builder::SlackResponse;

/// Returns a 200 OK response carrying a serialized Slack response.
#[must_use]
pub fn ok_response(response: &SlackResponse) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "application/json" },
        "body": response.as_json().to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "error": message }).to_string()
    })
}
