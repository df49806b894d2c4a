use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("access denied")]
    AuthorizationError,

    #[error("malformed command ({0}); check your quotes")]
    MalformedCommand(String),

    #[error("invalid parser configuration: {0}")]
    ConfigurationError(String),

    #[error("unrecognized argument '{0}'; try 'help'")]
    UnrecognizedArgument(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("unknown subcommand '{0}'; try 'help'")]
    UnknownCommand(String),

    #[error("{0}")]
    HandlerError(String),

    #[error("internal handler failure: {0}")]
    InternalError(String),

    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to load configuration: {0}")]
    ConfigError(String),
}

impl SlackError {
    /// Errors that indicate a defect rather than bad user input.
    ///
    /// These are never turned into a chat reply; the API layer answers them
    /// with a server error instead.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SlackError::ConfigurationError(_)
                | SlackError::InternalError(_)
                | SlackError::ConfigError(_)
        )
    }
}

impl From<anyhow::Error> for SlackError {
    fn from(error: anyhow::Error) -> Self {
        SlackError::HandlerError(error.to_string())
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(error: serde_json::Error) -> Self {
        SlackError::ParseError(error.to_string())
    }
}

impl From<shell_words::ParseError> for SlackError {
    fn from(error: shell_words::ParseError) -> Self {
        SlackError::MalformedCommand(error.to_string())
    }
}
