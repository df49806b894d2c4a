//! Per-request orchestration of a slash command.
//!
//! Authentication runs first, so forged requests never reach the tokenizer
//! or any handler.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::auth::Authenticator;
use crate::command::router::CommandRouter;
use crate::core::config::AppConfig;
use crate::core::models::CommandInvocation;
use crate::core::store::KeyValueStore;
use crate::errors::SlackError;
use crate::slack::command_parser::SlackCommandEvent;
use crate::slack::response_builder::SlackResponse;

pub struct SlackView {
    authenticator: Authenticator,
    router: Arc<CommandRouter>,
    store: Arc<dyn KeyValueStore>,
}

impl SlackView {
    #[must_use]
    pub fn new(config: &AppConfig, router: Arc<CommandRouter>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            authenticator: Authenticator::new(config),
            router,
            store,
        }
    }

    #[must_use]
    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Authenticates, parses and dispatches without converting any error.
    ///
    /// # Errors
    ///
    /// Returns whatever step failed first.
    pub fn dispatch(&self, event: &SlackCommandEvent) -> Result<SlackResponse, SlackError> {
        self.authenticator.verify(event)?;
        let invocation = CommandInvocation::from_event(event)?;
        info!(
            subcommand = %invocation.subcommand,
            user_id = %invocation.user_id,
            channel_id = %invocation.channel_id,
            "Dispatching slash command"
        );
        self.router.dispatch(&invocation, self.store.as_ref())
    }

    /// Like [`SlackView::dispatch`], but every recoverable error, a rejected
    /// token included, becomes a private reply.
    ///
    /// # Errors
    ///
    /// Only fatal errors (see [`SlackError::is_fatal`]) are returned.
    pub fn respond(&self, event: &SlackCommandEvent) -> Result<SlackResponse, SlackError> {
        match self.dispatch(event) {
            Ok(response) => Ok(response),
            Err(e) if e.is_fatal() => {
                error!("Slash command failed: {}", e);
                Err(e)
            }
            Err(e) => {
                warn!("Slash command rejected: {}", e);
                Ok(SlackResponse::new(e.to_string()))
            }
        }
    }
}
