use std::collections::HashMap;

use slackcmd::api::Authenticator;
use slackcmd::core::config::{AccessGrant, AppConfig};
use slackcmd::errors::SlackError;
use slackcmd::slack::SlackCommandEvent;

fn authenticator() -> Authenticator {
    Authenticator::from_grants(HashMap::from([
        ("open".to_string(), AccessGrant::Enabled(true)),
        ("revoked".to_string(), AccessGrant::Enabled(false)),
        ("pinned".to_string(), AccessGrant::Team("T123".to_string())),
    ]))
}

#[test]
fn test_enabled_tokens_are_accepted() {
    let auth = authenticator();

    assert!(auth.authenticate("open"));
    assert!(auth.authenticate_team("open", Some("T999")));
}

#[test]
fn test_rejected_tokens() {
    let auth = authenticator();

    for token in ["revoked", "unknown", "", "   ", "OPEN", "open "] {
        assert!(!auth.authenticate(token), "{token:?} should be rejected");
    }
}

#[test]
fn test_team_pinned_tokens() {
    let auth = authenticator();

    assert!(auth.authenticate_team("pinned", Some("T123")));
    assert!(!auth.authenticate_team("pinned", Some("T999")));
    assert!(!auth.authenticate_team("pinned", Some("")));
    assert!(!auth.authenticate_team("pinned", None));
    assert!(!auth.authenticate("pinned"));
}

#[test]
fn test_empty_table_rejects_everything() {
    let auth = Authenticator::default();

    assert!(!auth.authenticate("open"));
    assert!(!auth.authenticate(""));
}

#[test]
fn test_new_reads_access_table_from_config() {
    let config = AppConfig::from_json(r#"{"tok": true}"#, None).unwrap();
    let auth = Authenticator::new(&config);

    assert!(auth.authenticate("tok"));
    assert!(!auth.authenticate("other"));
}

#[test]
fn test_verify_uses_event_token_and_team() {
    let auth = authenticator();
    let event = |token: &str, team_id: &str| SlackCommandEvent {
        token: token.to_string(),
        team_id: team_id.to_string(),
        ..SlackCommandEvent::default()
    };

    assert!(auth.verify(&event("open", "")).is_ok());
    assert!(auth.verify(&event("pinned", "T123")).is_ok());
    assert!(matches!(
        auth.verify(&event("pinned", "T999")),
        Err(SlackError::AuthorizationError)
    ));
    assert!(matches!(
        auth.verify(&event("", "T123")),
        Err(SlackError::AuthorizationError)
    ));
}
