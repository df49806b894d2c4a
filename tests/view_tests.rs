use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Value, json};
use lambda_runtime::{Context, LambdaEvent};
use slackcmd::api::{SlackView, function_handler, handle_request};
use slackcmd::command::{ArgOptions, CommandRouter};
use slackcmd::core::config::{AccessGrant, AppConfig};
use slackcmd::core::store::MemoryStore;
use slackcmd::errors::SlackError;
use slackcmd::slack::{ResponseType, SlackCommandEvent, SlackResponse};

const TOKEN: &str = "s3cret";

fn view() -> SlackView {
    let router = CommandRouter::builder()
        .raw("echo", |_, mut parser| {
            parser.add_argument(&["--uppercase", "-u"], ArgOptions::count())?;
            let args = parser.run()?;
            let mut text = args.positionals().join(" ");
            if args.is_set("uppercase") {
                text = text.to_uppercase();
            }
            Ok(SlackResponse::new(text))
        })
        .positional("whoami", |ctx, _| {
            let invocation = ctx.invocation();
            Ok(SlackResponse::new(format!(
                "{}@{}",
                invocation.user_name, invocation.team_domain
            ))
            .in_channel())
        })
        .raw("crash", |_, _| {
            Err(SlackError::InternalError("backend unavailable".to_string()))
        })
        .build()
        .unwrap();

    let config = AppConfig::new(HashMap::from([
        (TOKEN.to_string(), AccessGrant::Enabled(true)),
        ("pinned".to_string(), AccessGrant::Team("T1".to_string())),
    ]));
    SlackView::new(&config, Arc::new(router), Arc::new(MemoryStore::hierarchical()))
}

fn form(token: &str, text: &str) -> String {
    format!(
        "token={}&team_id=T1&team_domain=acme&user_id=U1&user_name=ann&\
         channel_id=C1&channel_name=general&command=%2Fkv&text={}",
        utf8_percent_encode(token, NON_ALPHANUMERIC),
        utf8_percent_encode(text, NON_ALPHANUMERIC)
    )
}

fn proxy_event(body: &str) -> Value {
    json!({
        "httpMethod": "POST",
        "headers": {
            "content-type": "application/x-www-form-urlencoded",
            "x-amzn-trace-id": "Root=1-abc"
        },
        "body": body,
        "isBase64Encoded": false
    })
}

fn status(response: &Value) -> u64 {
    response["statusCode"].as_u64().unwrap()
}

fn body(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}

fn event(token: &str, text: &str) -> SlackCommandEvent {
    SlackCommandEvent {
        token: token.to_string(),
        team_id: "T1".to_string(),
        text: text.to_string(),
        ..SlackCommandEvent::default()
    }
}

#[test]
fn test_successful_command_returns_200() {
    let response = handle_request(&view(), &proxy_event(&form(TOKEN, "echo -u hello world")));

    assert_eq!(status(&response), 200);
    assert_eq!(response["headers"]["Content-Type"], "application/json");
    let body = body(&response);
    assert_eq!(body["text"], "HELLO WORLD");
    assert_eq!(body["response_type"], "ephemeral");
    assert_eq!(body["attachments"], json!([]));
}

#[test]
fn test_handlers_see_request_metadata() {
    let response = handle_request(&view(), &proxy_event(&form(TOKEN, "whoami")));

    let body = body(&response);
    assert_eq!(body["text"], "ann@acme");
    assert_eq!(body["response_type"], "in_channel");
}

#[test]
fn test_base64_body_is_decoded() {
    let mut payload = proxy_event(&STANDARD.encode(form(TOKEN, "echo quoted \"two words\"")));
    payload["isBase64Encoded"] = json!(true);

    let response = handle_request(&view(), &payload);
    assert_eq!(status(&response), 200);
    assert_eq!(body(&response)["text"], "quoted two words");
}

#[test]
fn test_bad_token_gets_private_rejection() {
    let view = view();

    for token in ["wrong", "", "PINNED"] {
        let response = handle_request(&view, &proxy_event(&form(token, "echo hi")));
        assert_eq!(status(&response), 200, "token {token:?}");
        let body = body(&response);
        assert_eq!(body["text"], "access denied");
        assert_eq!(body["response_type"], "ephemeral");
    }
}

#[test]
fn test_team_pinned_token_matches_request_team() {
    let response = handle_request(&view(), &proxy_event(&form("pinned", "echo hi")));

    assert_eq!(status(&response), 200);
    assert_eq!(body(&response)["text"], "hi");
}

#[test]
fn test_unauthenticated_requests_never_reach_the_tokenizer() {
    // An open quote would be a user error if the token were valid
    let response = handle_request(&view(), &proxy_event(&form("wrong", "echo \"oops")));
    assert_eq!(body(&response)["text"], "access denied");
}

#[test]
fn test_missing_or_invalid_body_is_bad_request() {
    let view = view();

    let response = handle_request(&view, &json!({ "headers": {} }));
    assert_eq!(status(&response), 400);

    let response = handle_request(&view, &json!({ "body": 42 }));
    assert_eq!(status(&response), 400);

    let response = handle_request(&view, &json!({ "body": "%%%", "isBase64Encoded": true }));
    assert_eq!(status(&response), 400);

    let response = handle_request(&view, &proxy_event("token=%FF%FE&text=hi"));
    assert_eq!(status(&response), 400);
    assert!(
        body(&response)["error"]
            .as_str()
            .unwrap()
            .starts_with("Parse Error:")
    );
}

#[test]
fn test_fatal_handler_error_is_opaque_500() {
    let response = handle_request(&view(), &proxy_event(&form(TOKEN, "crash")));

    assert_eq!(status(&response), 500);
    let error = body(&response)["error"].as_str().unwrap().to_string();
    assert_eq!(error, "internal server error");
    assert!(!error.contains("backend"));
}

#[test]
fn test_user_errors_become_private_replies() {
    let view = view();

    let cases = [
        ("Echo hi", "unknown subcommand 'Echo'; try 'help'"),
        ("", "unknown subcommand ''; try 'help'"),
        ("echo --loud hi", "unrecognized argument '--loud'; try 'help'"),
        ("echo \"hi", "malformed command (missing closing quote); check your quotes"),
    ];
    for (text, expected) in cases {
        let response = view.respond(&event(TOKEN, text)).unwrap();
        assert_eq!(response.text(), expected, "text {text:?}");
        assert_eq!(response.response_type(), ResponseType::Ephemeral);
    }
}

#[test]
fn test_em_dash_is_read_as_double_hyphen() {
    let response = view()
        .respond(&event(TOKEN, "echo \u{2014}uppercase hi"))
        .unwrap();

    assert_eq!(response.text(), "HI");
}

#[test]
fn test_respond_surfaces_only_fatal_errors() {
    let view = view();

    assert_eq!(
        view.respond(&event("nope", "echo hi")).unwrap().text(),
        "access denied"
    );
    assert!(matches!(
        view.dispatch(&event("nope", "echo hi")),
        Err(SlackError::AuthorizationError)
    ));
    assert!(matches!(
        view.respond(&event(TOKEN, "crash")),
        Err(SlackError::InternalError(_))
    ));
}

#[test]
fn test_dispatch_keeps_user_errors() {
    assert!(matches!(
        view().dispatch(&event(TOKEN, "nope")),
        Err(SlackError::UnknownCommand(name)) if name == "nope"
    ));
}

#[tokio::test]
async fn test_lambda_handler_wraps_request() {
    let view = view();
    let event = LambdaEvent::new(proxy_event(&form(TOKEN, "echo hi")), Context::default());

    let response = function_handler(&view, event).await.unwrap();
    assert_eq!(status(&response), 200);
    assert_eq!(body(&response)["text"], "hi");
}
