//! Response-related utilities for Slack interactions.
//!
//! A [`SlackResponse`] is the reply to one slash command: text, a delivery
//! scope and an ordered list of [`Attachment`]s. Attachments are built by
//! adding components; fields accumulate, every other component replaces
//! whatever was set before.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SlackError;

/// Who gets to see a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the user who invoked the command.
    #[default]
    Ephemeral,
    /// Everyone in the channel.
    InChannel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "title")]
    name: String,
    value: String,
    #[serde(default)]
    short: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            short,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_short(&self) -> bool {
        self.short
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub image_url: String,
    pub thumb_url: Option<String>,
}

impl Image {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            thumb_url: None,
        }
    }

    #[must_use]
    pub fn with_thumb(mut self, thumb_url: impl Into<String>) -> Self {
        self.thumb_url = Some(thumb_url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub link: Option<String>,
    pub icon: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub title: String,
    pub link: Option<String>,
}

impl Title {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
        }
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Body text of an attachment, with the optional line shown above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text: String,
    pub pretext: Option<String>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pretext: None,
        }
    }

    #[must_use]
    pub fn with_pretext(mut self, pretext: impl Into<String>) -> Self {
        self.pretext = Some(pretext.into());
        self
    }
}

/// Sidebar color: `good`, `warning`, `danger` or a hex code such as `#36a64f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentComponent {
    Text(Text),
    Author(Author),
    Title(Title),
    Image(Image),
    Field(Field),
    Color(Color),
}

impl From<Text> for AttachmentComponent {
    fn from(value: Text) -> Self {
        AttachmentComponent::Text(value)
    }
}

impl From<Author> for AttachmentComponent {
    fn from(value: Author) -> Self {
        AttachmentComponent::Author(value)
    }
}

impl From<Title> for AttachmentComponent {
    fn from(value: Title) -> Self {
        AttachmentComponent::Title(value)
    }
}

impl From<Image> for AttachmentComponent {
    fn from(value: Image) -> Self {
        AttachmentComponent::Image(value)
    }
}

impl From<Field> for AttachmentComponent {
    fn from(value: Field) -> Self {
        AttachmentComponent::Field(value)
    }
}

impl From<Color> for AttachmentComponent {
    fn from(value: Color) -> Self {
        AttachmentComponent::Color(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    fallback: String,
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pretext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title_link: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumb_url: Option<String>,
}

impl Attachment {
    /// Creates an attachment whose text doubles as the plain-text fallback
    /// shown by clients that cannot render attachments.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            fallback: text.clone(),
            text,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Chaining form of [`Attachment::add`].
    #[must_use]
    pub fn with(mut self, component: impl Into<AttachmentComponent>) -> Self {
        self.add(component);
        self
    }

    pub fn add(&mut self, component: impl Into<AttachmentComponent>) -> &mut Self {
        match component.into() {
            AttachmentComponent::Text(text) => {
                self.text = text.text;
                self.pretext = text.pretext;
            }
            AttachmentComponent::Author(author) => {
                self.author_name = Some(author.name);
                self.author_link = author.link;
                self.author_icon = author.icon;
            }
            AttachmentComponent::Title(title) => {
                self.title = Some(title.title);
                self.title_link = title.link;
            }
            AttachmentComponent::Image(image) => {
                self.image_url = Some(image.image_url);
                self.thumb_url = image.thumb_url;
            }
            AttachmentComponent::Field(field) => self.fields.push(field),
            AttachmentComponent::Color(Color(color)) => self.color = Some(color),
        }
        self
    }

    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn thumb_url(&self) -> Option<&str> {
        self.thumb_url.as_deref()
    }
}

/// Reply to a slash command.
///
/// # Examples
///
/// ```
/// use slackcmd::slack::response_builder::{Attachment, Field, SlackResponse};
///
/// let mut response = SlackResponse::new("Build finished");
/// response.add(
///     Attachment::new("main @ 1f2e3d")
///         .with_color("good")
///         .with(Field::new("Duration", "4m 12s", true)),
/// );
///
/// let json = response.as_json();
/// assert_eq!(json["response_type"], "ephemeral");
/// assert_eq!(json["attachments"][0]["fields"][0]["title"], "Duration");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackResponse {
    text: String,
    #[serde(default)]
    response_type: ResponseType,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

impl SlackResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            response_type: ResponseType::Ephemeral,
            attachments: Vec::new(),
        }
    }

    /// Makes the response visible to the whole channel.
    #[must_use]
    pub fn in_channel(self) -> Self {
        self.with_scope(ResponseType::InChannel)
    }

    #[must_use]
    pub fn with_scope(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.add(attachment);
        self
    }

    pub fn add(&mut self, attachment: Attachment) -> &mut Self {
        self.attachments.push(attachment);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// The wire representation Slack expects.
    #[must_use]
    pub fn as_json(&self) -> Value {
        serde_json::json!({
            "text": self.text,
            "response_type": self.response_type,
            "attachments": self.attachments,
        })
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, SlackError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Formats a link in Slack markup: `<url>` or `<url|label>`.
///
/// # Examples
///
/// ```
/// use slackcmd::slack::response_builder::format_url;
///
/// assert_eq!(format_url("https://my.server.com", None), "<https://my.server.com>");
/// assert_eq!(
///     format_url("https://my.server.com", Some("myserver")),
///     "<https://my.server.com|myserver>"
/// );
/// ```
#[must_use]
pub fn format_url(url: &str, label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => format!("<{url}|{label}>"),
        _ => format!("<{url}>"),
    }
}
