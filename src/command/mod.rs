//! Command-line handling: tokenizing, flag parsing and subcommand routing

pub mod args;
pub mod router;
pub mod tokenizer;

pub use args::{ArgAction, ArgOptions, FlagValue, ParseResult, ParserHandle, ParserSpec};
pub use router::{CommandContext, CommandRouter, CommandRouterBuilder, Handler};
pub use tokenizer::{normalize_dashes, tokenize};
