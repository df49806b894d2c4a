//! Flag and positional argument parsing for subcommands.
//!
//! A [`ParserSpec`] declares the flags a subcommand understands. Running it
//! over a token sequence is a pure operation: a fresh `clap` command is built
//! from the declarations on every run, so nothing carries over between calls.
//! Whatever no flag consumes ends up in [`ParseResult::positionals`], in the
//! order it appeared.

use std::collections::BTreeMap;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgMatches, Command, value_parser};
use serde::Serialize;

use crate::errors::SlackError;

/// Internal id of the catch-all positional argument.
const POSITIONALS: &str = "__positionals";

/// How a flag consumes tokens and what value it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgAction {
    /// Consumes the next token as a string; the last occurrence wins.
    Store,
    /// Consumes the next token as a signed integer; the last occurrence wins.
    StoreInt,
    /// Consumes nothing; counts occurrences. The count saturates at 255.
    Count,
    /// Consumes nothing; `true` when present.
    StoreTrue,
    /// Consumes the next token; every occurrence is collected.
    Append,
}

impl ArgAction {
    fn takes_value(self) -> bool {
        matches!(self, ArgAction::Store | ArgAction::StoreInt | ArgAction::Append)
    }
}

/// Options for [`ParserSpec::add_argument`].
#[derive(Debug, Clone)]
pub struct ArgOptions {
    action: ArgAction,
    dest: Option<String>,
    default: Option<String>,
    aliases: Vec<String>,
    help: Option<String>,
}

impl ArgOptions {
    #[must_use]
    pub fn new(action: ArgAction) -> Self {
        Self {
            action,
            dest: None,
            default: None,
            aliases: Vec::new(),
            help: None,
        }
    }

    #[must_use]
    pub fn store() -> Self {
        Self::new(ArgAction::Store)
    }

    #[must_use]
    pub fn store_int() -> Self {
        Self::new(ArgAction::StoreInt)
    }

    #[must_use]
    pub fn count() -> Self {
        Self::new(ArgAction::Count)
    }

    #[must_use]
    pub fn store_true() -> Self {
        Self::new(ArgAction::StoreTrue)
    }

    #[must_use]
    pub fn append() -> Self {
        Self::new(ArgAction::Append)
    }

    /// Name under which the value appears in the [`ParseResult`].
    ///
    /// Defaults to the first long name (dashes inside it become
    /// underscores), or the first short letter when there is no long name.
    #[must_use]
    pub fn dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    /// Value used when the flag does not occur. Only valid for flags that
    /// take a value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Extra flag form (`-x` or `--name`) resolving to the same destination.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

enum FlagName {
    Short(char),
    Long(String),
}

fn parse_flag_name(name: &str) -> Result<FlagName, SlackError> {
    if let Some(long) = name.strip_prefix("--") {
        let valid = !long.is_empty()
            && !long.starts_with('-')
            && !long.contains('=')
            && !long.contains(char::is_whitespace);
        if valid {
            return Ok(FlagName::Long(long.to_string()));
        }
    } else if let Some(short) = name.strip_prefix('-') {
        let mut chars = short.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c != '-' && !c.is_ascii_digit() && !c.is_whitespace() {
                return Ok(FlagName::Short(c));
            }
        }
    }
    Err(SlackError::ConfigurationError(format!(
        "'{name}' is not a valid flag name; use '-x' or '--name'"
    )))
}

#[derive(Debug, Clone)]
struct ArgDecl {
    dest: String,
    shorts: Vec<char>,
    longs: Vec<String>,
    action: ArgAction,
    default: Option<String>,
    help: Option<String>,
}

impl ArgDecl {
    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.dest.clone());

        let mut shorts = self.shorts.iter().copied();
        if let Some(first) = shorts.next() {
            arg = arg.short(first);
        }
        for short in shorts {
            arg = arg.short_alias(short);
        }

        let mut longs = self.longs.iter().cloned();
        if let Some(first) = longs.next() {
            arg = arg.long(first);
        }
        for long in longs {
            arg = arg.alias(long);
        }

        arg = match self.action {
            ArgAction::Store => arg
                .action(clap::ArgAction::Set)
                .num_args(1)
                .allow_negative_numbers(true),
            ArgAction::StoreInt => arg
                .action(clap::ArgAction::Set)
                .num_args(1)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64)),
            ArgAction::Count => arg.action(clap::ArgAction::Count),
            ArgAction::StoreTrue => arg.action(clap::ArgAction::SetTrue),
            ArgAction::Append => arg
                .action(clap::ArgAction::Append)
                .num_args(1)
                .allow_negative_numbers(true),
        };

        if let Some(default) = &self.default {
            arg = arg.default_value(default.clone());
        }
        if let Some(help) = &self.help {
            arg = arg.help(help.clone());
        }
        arg
    }

    fn extract(&self, matches: &ArgMatches) -> FlagValue {
        let id = self.dest.as_str();
        match self.action {
            ArgAction::Store => matches
                .get_one::<String>(id)
                .cloned()
                .map_or(FlagValue::Absent, FlagValue::Str),
            ArgAction::StoreInt => matches
                .get_one::<i64>(id)
                .copied()
                .map_or(FlagValue::Absent, FlagValue::Int),
            ArgAction::Count => FlagValue::Count(u32::from(matches.get_count(id))),
            ArgAction::StoreTrue => FlagValue::Bool(matches.get_flag(id)),
            ArgAction::Append => FlagValue::List(
                matches
                    .get_many::<String>(id)
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default(),
            ),
        }
    }
}

/// Declared flags of one subcommand.
#[derive(Debug, Clone, Default)]
pub struct ParserSpec {
    args: Vec<ArgDecl>,
}

impl ParserSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a flag under one or more names.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::ConfigurationError`] if a name is malformed, if
    /// any name, alias or the destination is already declared, or if a
    /// default is given that the action cannot hold.
    pub fn add_argument(
        &mut self,
        names: &[&str],
        options: ArgOptions,
    ) -> Result<&mut Self, SlackError> {
        if names.is_empty() {
            return Err(SlackError::ConfigurationError(
                "an argument needs at least one name".to_string(),
            ));
        }

        let mut shorts: Vec<char> = Vec::new();
        let mut longs: Vec<String> = Vec::new();
        let all_names = names
            .iter()
            .copied()
            .chain(options.aliases.iter().map(String::as_str));

        for name in all_names {
            let taken = match parse_flag_name(name)? {
                FlagName::Short(c) => {
                    let taken = shorts.contains(&c) || self.has_short(c);
                    shorts.push(c);
                    taken
                }
                FlagName::Long(long) => {
                    let taken = longs.contains(&long) || self.has_long(&long);
                    longs.push(long);
                    taken
                }
            };
            if taken {
                return Err(SlackError::ConfigurationError(format!(
                    "flag '{name}' is declared more than once"
                )));
            }
        }

        let dest = options
            .dest
            .clone()
            .or_else(|| longs.first().map(|long| long.replace('-', "_")))
            .or_else(|| shorts.first().map(char::to_string))
            .unwrap_or_default();

        if dest.is_empty() || dest == POSITIONALS {
            return Err(SlackError::ConfigurationError(format!(
                "'{dest}' cannot be used as a destination"
            )));
        }
        if self.args.iter().any(|decl| decl.dest == dest) {
            return Err(SlackError::ConfigurationError(format!(
                "destination '{dest}' is declared more than once"
            )));
        }

        if let Some(default) = &options.default {
            if !options.action.takes_value() {
                return Err(SlackError::ConfigurationError(format!(
                    "'{dest}' takes no value, so it cannot have a default"
                )));
            }
            if options.action == ArgAction::StoreInt && default.parse::<i64>().is_err() {
                return Err(SlackError::ConfigurationError(format!(
                    "default '{default}' of '{dest}' is not an integer"
                )));
            }
        }

        self.args.push(ArgDecl {
            dest,
            shorts,
            longs,
            action: options.action,
            default: options.default,
            help: options.help,
        });
        Ok(self)
    }

    fn has_short(&self, c: char) -> bool {
        self.args.iter().any(|decl| decl.shorts.contains(&c))
    }

    fn has_long(&self, long: &str) -> bool {
        self.args.iter().any(|decl| decl.longs.iter().any(|l| l == long))
    }

    /// Destinations of all declared flags, in declaration order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|decl| decl.dest.as_str())
    }

    fn command(&self) -> Command {
        let positionals = Arg::new(POSITIONALS)
            .value_name("ARGS")
            .action(clap::ArgAction::Append)
            .num_args(1..)
            .allow_negative_numbers(true);

        self.args.iter().fold(
            Command::new("slackcmd")
                .no_binary_name(true)
                .disable_help_flag(true)
                .disable_version_flag(true)
                .args_override_self(true)
                .arg(positionals),
            |cmd, decl| cmd.arg(decl.to_arg()),
        )
    }

    /// Parses `tokens` against the declared flags.
    ///
    /// Either every token is accounted for or the whole run fails.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::UnrecognizedArgument`] for an undeclared flag and
    /// [`SlackError::InvalidArguments`] for a missing or mistyped value.
    ///
    /// # Examples
    ///
    /// ```
    /// use slackcmd::command::{ArgOptions, ParserSpec};
    ///
    /// let mut spec = ParserSpec::new();
    /// spec.add_argument(&["-c", "--channel"], ArgOptions::count()).unwrap();
    ///
    /// let result = spec.run(&["-c", "foo", "-c", "bar"]).unwrap();
    /// assert_eq!(result.count("channel"), 2);
    /// assert_eq!(result.positionals(), ["foo", "bar"]);
    /// ```
    pub fn run<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseResult, SlackError> {
        let matches = self
            .command()
            .try_get_matches_from(tokens.iter().map(AsRef::as_ref))
            .map_err(|err| map_clap_error(err, tokens))?;

        let positionals = matches
            .get_many::<String>(POSITIONALS)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let flags = self
            .args
            .iter()
            .map(|decl| (decl.dest.clone(), decl.extract(&matches)))
            .collect();

        Ok(ParseResult { flags, positionals })
    }
}

fn map_clap_error<S: AsRef<str>>(err: clap::Error, tokens: &[S]) -> SlackError {
    if err.kind() == ErrorKind::UnknownArgument {
        if let Some(ContextValue::String(reported)) = err.get(ContextKind::InvalidArg) {
            return SlackError::UnrecognizedArgument(typed_token(reported, tokens));
        }
    }

    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();
    SlackError::InvalidArguments(message)
}

/// Maps clap's view of an unknown flag back to the token the user typed.
///
/// For grouped shorts such as `-c5` clap only reports the failing letter.
fn typed_token<S: AsRef<str>>(reported: &str, tokens: &[S]) -> String {
    let tokens = || tokens.iter().map(AsRef::as_ref);
    if tokens().any(|token| token == reported) {
        return reported.to_string();
    }

    let grouped = reported
        .strip_prefix('-')
        .filter(|letters| !letters.is_empty() && !letters.starts_with('-'))
        .and_then(|letters| {
            tokens().find(|token| {
                token.len() > 2
                    && !token.starts_with("--")
                    && token
                        .strip_prefix('-')
                        .is_some_and(|group| group.contains(letters))
            })
        });
    grouped.unwrap_or(reported).to_string()
}

/// Parsed value of one declared flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A value flag that did not occur and has no default.
    Absent,
    Str(String),
    Int(i64),
    Count(u32),
    Bool(bool),
    List(Vec<String>),
}

/// Outcome of [`ParserSpec::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    flags: BTreeMap<String, FlagValue>,
    positionals: Vec<String>,
}

impl ParseResult {
    #[must_use]
    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.flags
    }

    #[must_use]
    pub fn get(&self, dest: &str) -> Option<&FlagValue> {
        self.flags.get(dest)
    }

    #[must_use]
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    #[must_use]
    pub fn into_positionals(self) -> Vec<String> {
        self.positionals
    }

    /// Occurrences of a count flag, saturating at 255; 0 if undeclared.
    #[must_use]
    pub fn count(&self, dest: &str) -> u32 {
        match self.flags.get(dest) {
            Some(FlagValue::Count(n)) => *n,
            _ => 0,
        }
    }

    #[must_use]
    pub fn string(&self, dest: &str) -> Option<&str> {
        match self.flags.get(dest) {
            Some(FlagValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn int(&self, dest: &str) -> Option<i64> {
        match self.flags.get(dest) {
            Some(FlagValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, dest: &str) -> &[String] {
        match self.flags.get(dest) {
            Some(FlagValue::List(values)) => values,
            _ => &[],
        }
    }

    /// Whether a boolean or count flag was given at least once.
    #[must_use]
    pub fn is_set(&self, dest: &str) -> bool {
        match self.flags.get(dest) {
            Some(FlagValue::Bool(b)) => *b,
            Some(FlagValue::Count(n)) => *n > 0,
            _ => false,
        }
    }
}

/// A fresh [`ParserSpec`] bound to the arguments of one invocation.
///
/// Raw-mode handlers receive one of these, declare their flags and call
/// [`ParserHandle::run`].
#[derive(Debug, Clone)]
pub struct ParserHandle {
    spec: ParserSpec,
    tokens: Vec<String>,
}

impl ParserHandle {
    #[must_use]
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            spec: ParserSpec::new(),
            tokens,
        }
    }

    /// See [`ParserSpec::add_argument`].
    ///
    /// # Errors
    ///
    /// Returns [`SlackError::ConfigurationError`] on a duplicate or malformed
    /// declaration.
    pub fn add_argument(
        &mut self,
        names: &[&str],
        options: ArgOptions,
    ) -> Result<&mut Self, SlackError> {
        self.spec.add_argument(names, options)?;
        Ok(self)
    }

    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// # Errors
    ///
    /// See [`ParserSpec::run`].
    pub fn run(&self) -> Result<ParseResult, SlackError> {
        self.spec.run(&self.tokens)
    }
}
