use serde::{Deserialize, Serialize};

use crate::command::tokenizer::{normalize_dashes, tokenize};
use crate::errors::SlackError;
use crate::slack::command_parser::SlackCommandEvent;

/// One parsed slash-command call, alive for the duration of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    /// Command text after em-dash normalization.
    pub text: String,
    /// First token of the text; empty when the text has no tokens.
    pub subcommand: String,
    /// Remaining tokens, in order.
    pub args: Vec<String>,
    pub user_id: String,
    pub user_name: String,
    pub channel_id: String,
    pub channel_name: String,
    pub team_id: String,
    pub team_domain: String,
    pub response_url: String,
}

impl CommandInvocation {
    /// # Errors
    ///
    /// Returns [`SlackError::MalformedCommand`] if the text has an open quote.
    pub fn parse(text: &str) -> Result<Self, SlackError> {
        let text = normalize_dashes(text);
        let mut tokens = tokenize(&text)?.into_iter();
        let subcommand = tokens.next().unwrap_or_default();

        Ok(Self {
            subcommand,
            args: tokens.collect(),
            text,
            ..Self::default()
        })
    }

    /// # Errors
    ///
    /// Returns [`SlackError::MalformedCommand`] if the event text has an open
    /// quote.
    pub fn from_event(event: &SlackCommandEvent) -> Result<Self, SlackError> {
        Ok(Self {
            user_id: event.user_id.clone(),
            user_name: event.user_name.clone(),
            channel_id: event.channel_id.clone(),
            channel_name: event.channel_name.clone(),
            team_id: event.team_id.clone(),
            team_domain: event.team_domain.clone(),
            response_url: event.response_url.clone(),
            ..Self::parse(&event.text)?
        })
    }
}
