//! slackcmd - token-authenticated Slack slash-command dispatcher.
//!
//! A slash command such as `/kv echo -u "hello world"` arrives as a form POST.
//! The crate authenticates the request token, splits the command text
//! shell-style, routes the first token to a registered handler and sends
//! the handler's [`slack::SlackResponse`] back as JSON.
//!
//! # Architecture
//!
//! - [`api`]: Lambda entrypoint, authentication and per-request orchestration
//! - [`command`]: tokenizer, flag parser and subcommand router
//! - [`slack`]: form parsing and the response/attachment model
//! - [`core`]: configuration, invocation model and key/value storage
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use slackcmd::api::SlackView;
//! use slackcmd::command::{ArgOptions, CommandRouter};
//! use slackcmd::core::config::{AccessGrant, AppConfig};
//! use slackcmd::core::store::MemoryStore;
//! use slackcmd::slack::{SlackCommandEvent, SlackResponse};
//!
//! let router = CommandRouter::builder()
//!     .raw("greet", |_, mut parser| {
//!         parser.add_argument(&["--loud", "-l"], ArgOptions::store_true())?;
//!         let args = parser.run()?;
//!         let mut text = format!("hello {}", args.positionals().join(" "));
//!         if args.is_set("loud") {
//!             text = text.to_uppercase();
//!         }
//!         Ok(SlackResponse::new(text))
//!     })
//!     .build()
//!     .unwrap();
//!
//! let config = AppConfig::new(HashMap::from([(
//!     "secret".to_string(),
//!     AccessGrant::Enabled(true),
//! )]));
//! let view = SlackView::new(&config, Arc::new(router), Arc::new(MemoryStore::new()));
//!
//! let event = SlackCommandEvent {
//!     token: "secret".into(),
//!     text: "greet -l world".into(),
//!     ..SlackCommandEvent::default()
//! };
//! assert_eq!(view.respond(&event).unwrap().text(), "HELLO WORLD");
//! ```

pub mod api;
pub mod command;
pub mod core;
pub mod demo;
pub mod errors;
pub mod slack;

pub use errors::SlackError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// slackcmd::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
