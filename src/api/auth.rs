use std::collections::HashMap;

use tracing::warn;

use crate::core::config::{AccessGrant, AppConfig};
use crate::errors::SlackError;
use crate::slack::command_parser::SlackCommandEvent;

/// Checks request tokens against the configured access table.
///
/// Fails closed: unknown, disabled and empty tokens are all rejected.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    grants: HashMap<String, AccessGrant>,
}

impl Authenticator {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self::from_grants(config.slack_access.clone())
    }

    #[must_use]
    pub fn from_grants(grants: HashMap<String, AccessGrant>) -> Self {
        Self { grants }
    }

    /// Accepts only tokens enabled for every team; team-pinned tokens need
    /// [`Authenticator::authenticate_team`].
    #[must_use]
    pub fn authenticate(&self, token: &str) -> bool {
        self.authenticate_team(token, None)
    }

    #[must_use]
    pub fn authenticate_team(&self, token: &str, team_id: Option<&str>) -> bool {
        if token.trim().is_empty() {
            return false;
        }

        match self.grants.get(token) {
            Some(AccessGrant::Enabled(enabled)) => *enabled,
            Some(AccessGrant::Team(team)) => {
                team_id.is_some_and(|id| !id.is_empty() && id == team)
            }
            None => false,
        }
    }

    /// # Errors
    ///
    /// Returns [`SlackError::AuthorizationError`] if the event's token is not
    /// accepted for the event's team.
    pub fn verify(&self, event: &SlackCommandEvent) -> Result<(), SlackError> {
        let team_id = Some(event.team_id.as_str()).filter(|id| !id.is_empty());
        if self.authenticate_team(&event.token, team_id) {
            Ok(())
        } else {
            warn!(
                team_id = %event.team_id,
                user_id = %event.user_id,
                "Rejected slash command with invalid token"
            );
            Err(SlackError::AuthorizationError)
        }
    }
}
