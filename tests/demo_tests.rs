use slackcmd::command::CommandRouter;
use slackcmd::core::models::CommandInvocation;
use slackcmd::core::store::{KeyValueStore, MemoryStore};
use slackcmd::demo;
use slackcmd::errors::SlackError;
use slackcmd::slack::{ResponseType, SlackResponse};

fn run(
    router: &CommandRouter,
    store: &MemoryStore,
    user: &str,
    text: &str,
) -> Result<SlackResponse, SlackError> {
    let mut invocation = CommandInvocation::parse(text)?;
    invocation.team_id = "T1".to_string();
    invocation.user_id = user.to_string();
    router.dispatch(&invocation, store)
}

fn text(text: &str) -> String {
    let router = demo::router().unwrap();
    run(&router, &MemoryStore::hierarchical(), "U1", text)
        .unwrap()
        .text()
        .to_string()
}

#[test]
fn test_echo() {
    assert_eq!(text("echo I say hello"), "you said: I-say-hello");
    assert_eq!(text("e I say hello"), "you said: I-say-hello");
    assert_eq!(text("echo -u I say hello"), "you said: I-SAY-HELLO");
    assert_eq!(text("echo --uppercase \"I say\" hello"), "you said: I SAY-HELLO");
    assert_eq!(text("echo"), "you said: ");
}

#[test]
fn test_echo_public_is_in_channel() {
    let router = demo::router().unwrap();
    let store = MemoryStore::new();

    let response = run(&router, &store, "U1", "echo -p hi").unwrap();
    assert_eq!(response.response_type(), ResponseType::InChannel);

    let response = run(&router, &store, "U1", "echo hi").unwrap();
    assert_eq!(response.response_type(), ResponseType::Ephemeral);
}

#[test]
fn test_echob_joins_positionals() {
    assert_eq!(text("echob I say hello"), "you said: I:say:hello");
}

#[test]
fn test_echob_rejects_flags() {
    let router = demo::router().unwrap();

    assert!(matches!(
        run(&router, &MemoryStore::new(), "U1", "echob -u hi"),
        Err(SlackError::UnrecognizedArgument(flag)) if flag == "-u"
    ));
}

#[test]
fn test_unknown_and_empty_subcommands() {
    let router = demo::router().unwrap();
    let store = MemoryStore::new();

    for input in ["ECHO hi", "echoo", "E"] {
        assert!(matches!(
            run(&router, &store, "U1", input),
            Err(SlackError::UnknownCommand(_))
        ));
    }
    for input in ["", "     "] {
        assert!(matches!(
            run(&router, &store, "U1", input),
            Err(SlackError::UnknownCommand(name)) if name.is_empty()
        ));
    }
}

#[test]
fn test_show_builds_attachment() {
    let router = demo::router().unwrap();
    let response = run(&router, &MemoryStore::new(), "U1", "show").unwrap();

    assert_eq!(response.text(), "Just showing off!");
    let json = response.as_json();
    let attachment = &json["attachments"][0];
    assert_eq!(attachment["color"], "#36a64f");
    assert_eq!(attachment["title"], "Some Random Stock Photo");
    assert_eq!(attachment["author_name"], "Stefan Loesch");
    assert_eq!(attachment["fields"][0]["title"], "Priority");
    assert_eq!(attachment["fields"][0]["short"], false);
    assert!(attachment["thumb_url"].as_str().unwrap().ends_with("small.jpeg"));
}

#[test]
fn test_version_and_help() {
    assert_eq!(
        text("version"),
        format!("Slack library version {}", env!("CARGO_PKG_VERSION"))
    );
    assert_eq!(text("v"), text("version"));
    assert!(text("help").contains("'echo'"));
}

#[test]
fn test_set_and_get_with_team_fallback() {
    let router = demo::router().unwrap();
    let store = MemoryStore::hierarchical();

    assert_eq!(
        run(&router, &store, "U1", "set --team color blue").unwrap().text(),
        "color = blue"
    );
    assert_eq!(
        run(&router, &store, "U1", "set color dark red").unwrap().text(),
        "color = dark red"
    );

    assert_eq!(run(&router, &store, "U1", "get color").unwrap().text(), "color = dark red");
    assert_eq!(run(&router, &store, "U2", "get color").unwrap().text(), "color = blue");
    assert_eq!(run(&router, &store, "U2", "get size").unwrap().text(), "size is not set");

    assert_eq!(store.get("T1", "color").as_deref(), Some("blue"));
    assert_eq!(store.get("T1::U1", "color").as_deref(), Some("dark red"));
}

#[test]
fn test_set_and_get_usage_errors() {
    let router = demo::router().unwrap();
    let store = MemoryStore::hierarchical();

    for input in ["set", "set key", "get", "get a b"] {
        assert!(matches!(
            run(&router, &store, "U1", input),
            Err(SlackError::HandlerError(msg)) if msg.starts_with("usage:")
        ));
    }
}

#[test]
fn test_set_accepts_hash_values() {
    let router = demo::router().unwrap();
    let store = MemoryStore::hierarchical();

    assert_eq!(
        run(&router, &store, "U1", "set color #36a64f").unwrap().text(),
        "color = #36a64f"
    );
    assert_eq!(run(&router, &store, "U1", "get color").unwrap().text(), "color = #36a64f");
    assert_eq!(text("echo #general is #1"), "you said: #general-is-#1");
}
