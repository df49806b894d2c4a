//! Subcommand registration and dispatch.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::args::{ParserHandle, ParserSpec};
use crate::core::models::CommandInvocation;
use crate::core::store::KeyValueStore;
use crate::errors::SlackError;
use crate::slack::response_builder::SlackResponse;

/// Handler that declares its own flags on the [`ParserHandle`] it receives.
pub type RawHandler =
    dyn Fn(&CommandContext<'_>, ParserHandle) -> Result<SlackResponse, SlackError> + Send + Sync;

/// Handler that only ever sees positional arguments.
pub type PositionalHandler =
    dyn Fn(&CommandContext<'_>, Vec<String>) -> Result<SlackResponse, SlackError> + Send + Sync;

/// What a handler gets to see besides its arguments.
pub struct CommandContext<'a> {
    invocation: &'a CommandInvocation,
    store: &'a dyn KeyValueStore,
}

impl<'a> CommandContext<'a> {
    #[must_use]
    pub fn new(invocation: &'a CommandInvocation, store: &'a dyn KeyValueStore) -> Self {
        Self { invocation, store }
    }

    #[must_use]
    pub fn invocation(&self) -> &CommandInvocation {
        self.invocation
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store
    }
}

/// A registered handler, tagged with its calling convention.
#[derive(Clone)]
pub enum Handler {
    Raw(Arc<RawHandler>),
    Positional(Arc<PositionalHandler>),
}

impl Handler {
    pub fn raw<F>(f: F) -> Self
    where
        F: Fn(&CommandContext<'_>, ParserHandle) -> Result<SlackResponse, SlackError>
            + Send
            + Sync
            + 'static,
    {
        Handler::Raw(Arc::new(f))
    }

    pub fn positional<F>(f: F) -> Self
    where
        F: Fn(&CommandContext<'_>, Vec<String>) -> Result<SlackResponse, SlackError>
            + Send
            + Sync
            + 'static,
    {
        Handler::Positional(Arc::new(f))
    }

    fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> Result<SlackResponse, SlackError> {
        match self {
            Handler::Raw(f) => f(ctx, ParserHandle::new(args.to_vec())),
            Handler::Positional(f) => {
                // No declared flags, so any flag-like token is rejected here.
                let positionals = ParserSpec::new().run(args)?.into_positionals();
                f(ctx, positionals)
            }
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Raw(_) => f.write_str("Handler::Raw"),
            Handler::Positional(_) => f.write_str("Handler::Positional"),
        }
    }
}

/// Collects registrations; [`CommandRouterBuilder::build`] validates them.
#[derive(Default)]
pub struct CommandRouterBuilder {
    handlers: BTreeMap<String, Handler>,
    aliases: Vec<(String, String)>,
    errors: Vec<String>,
}

impl CommandRouterBuilder {
    #[must_use]
    pub fn raw<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&CommandContext<'_>, ParserHandle) -> Result<SlackResponse, SlackError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, Handler::raw(f))
    }

    #[must_use]
    pub fn positional<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&CommandContext<'_>, Vec<String>) -> Result<SlackResponse, SlackError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, Handler::positional(f))
    }

    #[must_use]
    pub fn register(mut self, name: impl Into<String>, handler: Handler) -> Self {
        let name = name.into();
        if name.is_empty() || name.contains(char::is_whitespace) {
            self.errors
                .push(format!("'{name}' is not a valid subcommand name"));
        } else if self.handlers.contains_key(&name) {
            self.errors
                .push(format!("subcommand '{name}' is registered more than once"));
        } else {
            self.handlers.insert(name, handler);
        }
        self
    }

    /// Makes `alias` dispatch to the handler registered as `target`.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    /// Freezes the registration table.
    ///
    /// A `help` subcommand listing the registered names is added unless one
    /// was registered explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::ConfigurationError`] for duplicate or invalid
    /// names and for aliases whose target is not registered.
    pub fn build(mut self) -> Result<CommandRouter, SlackError> {
        for (alias, target) in std::mem::take(&mut self.aliases) {
            match self.handlers.get(&target).cloned() {
                Some(handler) => self = self.register(alias, handler),
                None => self.errors.push(format!(
                    "alias '{alias}' points at unknown subcommand '{target}'"
                )),
            }
        }

        if !self.errors.is_empty() {
            return Err(SlackError::ConfigurationError(self.errors.join("; ")));
        }

        if !self.handlers.contains_key("help") {
            let mut names: Vec<String> = self.handlers.keys().cloned().collect();
            names.push("help".to_string());
            names.sort();
            let text = format!("available subcommands: {}", names.join(", "));
            self.handlers.insert(
                "help".to_string(),
                Handler::positional(move |_, _| Ok(SlackResponse::new(text.clone()))),
            );
        }

        Ok(CommandRouter {
            handlers: self.handlers,
        })
    }
}

/// Immutable subcommand → handler table.
#[derive(Debug)]
pub struct CommandRouter {
    handlers: BTreeMap<String, Handler>,
}

impl CommandRouter {
    #[must_use]
    pub fn builder() -> CommandRouterBuilder {
        CommandRouterBuilder::default()
    }

    /// Registered subcommand names (aliases included), sorted.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Runs the handler registered for `invocation.subcommand`.
    ///
    /// Lookup is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::UnknownCommand`] for an unregistered name, or
    /// whatever the handler (or its argument parsing) fails with.
    pub fn dispatch(
        &self,
        invocation: &CommandInvocation,
        store: &dyn KeyValueStore,
    ) -> Result<SlackResponse, SlackError> {
        let Some(handler) = self.handlers.get(&invocation.subcommand) else {
            return Err(SlackError::UnknownCommand(invocation.subcommand.clone()));
        };

        debug!(
            subcommand = %invocation.subcommand,
            args = invocation.args.len(),
            "Dispatching subcommand"
        );
        let ctx = CommandContext::new(invocation, store);
        handler.call(&ctx, &invocation.args)
    }
}
