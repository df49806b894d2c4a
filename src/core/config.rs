use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

use crate::errors::SlackError;

/// What a configured access token is allowed to do.
///
/// In `SLACK_ACCESS` a token maps either to a boolean (`true` accepts every
/// team, `false` disables the token) or to the team id it is pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessGrant {
    Enabled(bool),
    Team(String),
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub slack_access: HashMap<String, AccessGrant>,
    /// Per-user permission levels (0-3). Deprecated: parsed for backward
    /// compatibility with existing deployments but never enforced.
    pub slack_users: HashMap<String, u8>,
}

impl AppConfig {
    #[must_use]
    pub fn new(slack_access: HashMap<String, AccessGrant>) -> Self {
        Self {
            slack_access,
            slack_users: HashMap::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if `SLACK_ACCESS` is missing or either variable is not
    /// valid JSON of the expected shape.
    pub fn from_env() -> Result<Self, SlackError> {
        let access = env::var("SLACK_ACCESS")
            .map_err(|e| SlackError::ConfigError(format!("SLACK_ACCESS: {e}")))?;
        let users = env::var("SLACK_USERS").ok();
        Self::from_json(&access, users.as_deref())
    }

    /// Builds the configuration from the raw JSON values of `SLACK_ACCESS`
    /// and (optionally) `SLACK_USERS`.
    ///
    /// # Errors
    ///
    /// Returns an error if either value does not deserialize.
    pub fn from_json(access: &str, users: Option<&str>) -> Result<Self, SlackError> {
        let slack_access: HashMap<String, AccessGrant> = serde_json::from_str(access)
            .map_err(|e| SlackError::ConfigError(format!("SLACK_ACCESS: {e}")))?;

        let slack_users = match users {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)
                .map_err(|e| SlackError::ConfigError(format!("SLACK_USERS: {e}")))?,
            _ => HashMap::new(),
        };

        Ok(Self {
            slack_access,
            slack_users,
        })
    }
}
