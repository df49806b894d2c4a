//! Example command set served by the API binary.
//!
//! Doubles as a reference for writing handlers in both calling conventions.

use crate::command::{ArgOptions, CommandContext, CommandRouter, ParserHandle};
use crate::errors::SlackError;
use crate::slack::response_builder::{
    Attachment, Author, Color, Field, Image, SlackResponse, Text, Title,
};

const SHOW_IMAGE: &str = "https://static.pexels.com/photos/57690/pexels-photo-57690-large.jpeg";
const SHOW_THUMB: &str = "https://static.pexels.com/photos/57690/pexels-photo-57690-small.jpeg";

/// Builds the example router.
///
/// # Errors
///
/// Returns [`SlackError::ConfigurationError`] if the registration table is
/// inconsistent.
pub fn router() -> Result<CommandRouter, SlackError> {
    CommandRouter::builder()
        .raw("echo", echo)
        .positional("echob", echob)
        .raw("show", show)
        .raw("version", version)
        .positional("help", help)
        .raw("set", set)
        .positional("get", get)
        .alias("e", "echo")
        .alias("v", "version")
        .build()
}

/// `echo [-u] [--public] WORDS...`
fn echo(_ctx: &CommandContext<'_>, mut parser: ParserHandle) -> Result<SlackResponse, SlackError> {
    parser
        .add_argument(&["--uppercase", "-u"], ArgOptions::count())?
        .add_argument(&["--public"], ArgOptions::store_true().alias("-p"))?;
    let args = parser.run()?;

    let mut out = args.positionals().join("-");
    if args.is_set("uppercase") {
        out = out.to_uppercase();
    }

    let response = SlackResponse::new(format!("you said: {out}"));
    Ok(if args.is_set("public") {
        response.in_channel()
    } else {
        response
    })
}

/// `echob WORDS...`
fn echob(_ctx: &CommandContext<'_>, words: Vec<String>) -> Result<SlackResponse, SlackError> {
    Ok(SlackResponse::new(format!("you said: {}", words.join(":"))))
}

fn show(_ctx: &CommandContext<'_>, parser: ParserHandle) -> Result<SlackResponse, SlackError> {
    parser.run()?;

    let attachment = Attachment::new("that's a show-off attachment")
        .with(
            Author::new("Stefan Loesch")
                .with_link("https://twitter.com/oditorium")
                .with_icon("https://pbs.twimg.com/profile_images/491834678383374336/eSPXgb6I_bigger.jpeg"),
        )
        .with(Title::new("Some Random Stock Photo").with_link("https://www.pexels.com/"))
        .with(Image::new(SHOW_IMAGE).with_thumb(SHOW_THUMB))
        .with(
            Text::new("This text appears within the attachment!")
                .with_pretext("This text appears above the attachment!"),
        )
        .with(Color("#36a64f".to_string()))
        .with(Field::new("Priority", "High", false));

    Ok(SlackResponse::new("Just showing off!").with_attachment(attachment))
}

fn version(_ctx: &CommandContext<'_>, parser: ParserHandle) -> Result<SlackResponse, SlackError> {
    parser.run()?;
    Ok(SlackResponse::new(format!(
        "Slack library version {}",
        env!("CARGO_PKG_VERSION")
    )))
}

fn help(_ctx: &CommandContext<'_>, _args: Vec<String>) -> Result<SlackResponse, SlackError> {
    Ok(SlackResponse::new(
        "try the 'echo', 'echob', 'show', 'set', 'get' or 'version' subcommands",
    ))
}

fn user_namespace(ctx: &CommandContext<'_>) -> String {
    let invocation = ctx.invocation();
    format!("{}::{}", invocation.team_id, invocation.user_id)
}

/// `set [--team] KEY VALUE...`
///
/// Stores for the invoking user, or for the whole team with `--team`.
fn set(ctx: &CommandContext<'_>, mut parser: ParserHandle) -> Result<SlackResponse, SlackError> {
    parser.add_argument(&["--team", "-t"], ArgOptions::store_true())?;
    let args = parser.run()?;

    let Some((key, value)) = args.positionals().split_first() else {
        return Err(SlackError::HandlerError("usage: set [--team] KEY VALUE".to_string()));
    };
    if value.is_empty() {
        return Err(SlackError::HandlerError(format!("usage: set [--team] {key} VALUE")));
    }

    let namespace = if args.is_set("team") {
        ctx.invocation().team_id.clone()
    } else {
        user_namespace(ctx)
    };
    let value = value.join(" ");
    ctx.store().set(&namespace, key, value.clone());

    Ok(SlackResponse::new(format!("{key} = {value}")))
}

/// `get KEY`
///
/// Reads the user's value, falling back to the team's.
fn get(ctx: &CommandContext<'_>, args: Vec<String>) -> Result<SlackResponse, SlackError> {
    let [key] = args.as_slice() else {
        return Err(SlackError::HandlerError("usage: get KEY".to_string()));
    };

    let text = match ctx.store().get(&user_namespace(ctx), key) {
        Some(value) => format!("{key} = {value}"),
        None => format!("{key} is not set"),
    };
    Ok(SlackResponse::new(text))
}
