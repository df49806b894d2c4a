//! API Lambda handler: unwraps the proxy event and hands the slash command
//! to a [`SlackView`].

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use super::view::SlackView;
use super::{helpers, parsing};
use crate::slack::command_parser::parse_form_data;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails at the Lambda level; every outcome is an HTTP response value.
#[tracing::instrument(level = "info", skip(view, event), fields(request_id = %Uuid::new_v4()))]
pub async fn function_handler(view: &SlackView, event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(handle_request(view, &event.payload))
}

/// Turns one proxy event into one proxy response.
///
/// Bad bodies get a 400 and fatal errors an opaque 500. Everything else,
/// rejected tokens and user mistakes included, is a 200 with a Slack reply.
#[must_use]
pub fn handle_request(view: &SlackView, payload: &Value) -> Value {
    if let Some(trace_id) = payload
        .get("headers")
        .and_then(|headers| parsing::get_header_value(headers, "X-Amzn-Trace-Id"))
    {
        info!(xray_trace_id = %trace_id, "Slash command request");
    }

    let body = match parsing::extract_body(payload) {
        Ok(body) => body,
        Err(e) => {
            error!("Request body rejected: {}", e);
            return helpers::err_response(400, &e.to_string());
        }
    };

    let event = match parse_form_data(&body) {
        Ok(event) => event,
        Err(e) => {
            error!("Failed to parse Slack event: {}", e);
            return helpers::err_response(400, &format!("Parse Error: {e}"));
        }
    };

    match view.respond(&event) {
        Ok(response) => helpers::ok_response(&response),
        Err(_) => helpers::err_response(500, "internal server error"),
    }
}
