use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::errors::{Result, TeamsError};

const MESSAGE_TYPE: &str = "message";
const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
const ADAPTIVE_CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const ADAPTIVE_CARD_TYPE: &str = "AdaptiveCard";
const ADAPTIVE_CARD_VERSION: &str = "1.4";

/// Text weight of a [`TextBlock`]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum TextWeight {
    Lighter,
    Default,
    Bolder,
}

/// Text size of a [`TextBlock`]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum TextSize {
    Small,
    Default,
    Medium,
    Large,
    ExtraLarge,
}

/// Text color of a [`TextBlock`]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum TextColor {
    Default,
    Dark,
    Light,
    Accent,
    Good,
    Warning,
    Attention,
}

/// Display size of an [`Image`]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ImageSize {
    Auto,
    Stretch,
    Small,
    Medium,
    Large,
}

/// A block of text
///
/// Only `text` is required. Unset styling options are left out of the
/// payload so Teams applies its defaults.
///
/// # Example
///
/// ```rust
/// use teams_webhook::{TextBlock, TextSize, TextWeight};
///
/// let heading = TextBlock::new("Deployment finished")
///     .with_weight(TextWeight::Bolder)
///     .with_size(TextSize::Medium);
///
/// let body = TextBlock::new("All checks passed").wrap();
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    wrap: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<TextWeight>,

    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<TextSize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<TextColor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    is_subtle: Option<bool>,
}

impl TextBlock {
    /// Create a text block with default styling
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrap: None,
            weight: None,
            size: None,
            color: None,
            is_subtle: None,
        }
    }

    /// Allow the text to wrap instead of being clipped
    pub fn wrap(mut self) -> Self {
        self.wrap = Some(true);
        self
    }

    /// Set the font weight
    pub fn with_weight(mut self, weight: TextWeight) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set the font size
    pub fn with_size(mut self, size: TextSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the text color
    pub fn with_color(mut self, color: TextColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Render the text slightly dimmed
    pub fn subtle(mut self) -> Self {
        self.is_subtle = Some(true);
        self
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single title/value pair inside a [`FactSet`]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Fact {
    pub title: String,
    pub value: String,
}

/// A list of title/value pairs rendered as a two column table
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FactSet {
    facts: Vec<Fact>,
}

impl FactSet {
    /// Create an empty fact set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a title/value pair
    pub fn with_fact(mut self, title: impl Into<String>, value: impl Into<String>) -> Self {
        self.facts.push(Fact {
            title: title.into(),
            value: value.into(),
        });
        self
    }

    /// Get the facts in insertion order
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }
}

/// An image referenced by URL
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    alt_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<ImageSize>,
}

impl Image {
    /// Create an image from its URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: None,
            size: None,
        }
    }

    /// Set the text shown when the image cannot be displayed
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    /// Set the display size
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    /// Get the image URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// One renderable unit of a [`Card`]
///
/// Serialized with its Adaptive Card `type` tag, e.g.
/// `{"type": "TextBlock", "text": "..."}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Element {
    TextBlock(TextBlock),
    FactSet(FactSet),
    Image(Image),
}

impl From<TextBlock> for Element {
    fn from(block: TextBlock) -> Self {
        Self::TextBlock(block)
    }
}

impl From<FactSet> for Element {
    fn from(facts: FactSet) -> Self {
        Self::FactSet(facts)
    }
}

impl From<Image> for Element {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

/// Message card posted to a Teams incoming webhook
///
/// A card is an ordered list of elements. It serializes to the message
/// envelope Teams expects, with the elements as the Adaptive Card `body`
/// in insertion order.
///
/// # Example
///
/// ```rust
/// use teams_webhook::{Card, FactSet, TextBlock};
///
/// let mut card = Card::new();
/// card.add_element(TextBlock::new("Build #42 failed"));
/// card.add_element(FactSet::new().with_fact("Branch", "main"));
///
/// let payload = card.to_payload().unwrap();
/// assert_eq!(payload["attachments"][0]["content"]["body"][0]["text"], "Build #42 failed");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    body: Vec<Element>,
}

#[derive(Serialize)]
struct Message<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    attachments: [Attachment<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Attachment<'a> {
    content_type: &'static str,
    content_url: Option<&'static str>,
    content: AdaptiveCard<'a>,
}

#[derive(Serialize)]
struct AdaptiveCard<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    version: &'static str,
    body: &'a [Element],
}

impl Card {
    /// Create an empty card
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to the card body
    pub fn add_element(&mut self, element: impl Into<Element>) -> &mut Self {
        self.body.push(element.into());
        self
    }

    /// Builder-style variant of [`Card::add_element`]
    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.body.push(element.into());
        self
    }

    /// Get the elements in insertion order
    pub fn elements(&self) -> &[Element] {
        &self.body
    }

    /// Number of elements in the card body
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the card has no elements
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Webhook payload as a JSON value
    pub fn to_payload(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(TeamsError::Serialize)
    }

    /// Webhook payload as a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(TeamsError::Serialize)
    }

    pub(crate) fn to_json_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(TeamsError::Serialize)
    }

    fn message(&self) -> Message<'_> {
        Message {
            kind: MESSAGE_TYPE,
            attachments: [Attachment {
                content_type: ADAPTIVE_CARD_CONTENT_TYPE,
                content_url: None,
                content: AdaptiveCard {
                    schema: ADAPTIVE_CARD_SCHEMA,
                    kind: ADAPTIVE_CARD_TYPE,
                    version: ADAPTIVE_CARD_VERSION,
                    body: &self.body,
                },
            }],
        }
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.message().serialize(serializer)
    }
}
