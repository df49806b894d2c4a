//! All Slack-specific functionality

pub mod command_parser;
pub mod response_builder;

// Re-export main types for convenience
pub use command_parser::{SlackCommandEvent, parse_form_data};
pub use response_builder::{
    Attachment, AttachmentComponent, Author, Color, Field, Image, ResponseType, SlackResponse,
    Text, Title, format_url,
};
