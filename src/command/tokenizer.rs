//! Shell-style splitting of slash-command text.

use crate::errors::SlackError;

/// Splits command text into argument tokens.
///
/// Whitespace separates tokens; single- and double-quoted substrings stay
/// together and backslash escapes work as in a POSIX shell. Unlike a shell,
/// `#` never starts a comment, so `#general` or `#36a64f` are plain words.
/// Empty or whitespace-only input yields no tokens.
///
/// # Errors
///
/// Returns [`SlackError::MalformedCommand`] when a quote is left open.
///
/// # Examples
///
/// ```
/// use slackcmd::command::tokenize;
///
/// let tokens = tokenize(r#"say "hello world""#).unwrap();
/// assert_eq!(tokens, vec!["say", "hello world"]);
///
/// assert!(tokenize("say 'oops").is_err());
/// ```
pub fn tokenize(text: &str) -> Result<Vec<String>, SlackError> {
    Ok(shell_words::split(&escape_word_hashes(text))?)
}

/// Backslash-escapes every unquoted `#` that begins a word.
fn escape_word_hashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut word_start = true;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if let Some(open) = quote {
            out.push(c);
            if c == open {
                quote = None;
            } else if open == '"' && c == '\\' {
                out.extend(chars.next());
            }
            continue;
        }

        match c {
            '#' if word_start => out.push_str("\\#"),
            '\\' => {
                out.push(c);
                out.extend(chars.next());
            }
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            _ => out.push(c),
        }
        word_start = c.is_whitespace();
    }
    out
}

/// Undoes Slack's typographic rewrite of `--` into an em-dash.
///
/// Every em-dash is replaced, so a literal em-dash cannot be passed through
/// a command.
#[must_use]
pub fn normalize_dashes(text: &str) -> String {
    text.replace('\u{2014}', "--")
}
