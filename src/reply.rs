// reply.rs - Reply Payloads
// Platform-neutral reply bodies. Serialized with serde into the JSON body
// Discord expects for edits and follow-ups.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::Serialize;
use serde_json::Value;

/// Discord message flag hiding a reply from everyone but the invoker.
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplyEmbed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl ReplyEmbed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }
}

/// A reply body: text, embeds and visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyPayload {
    pub content: Option<String>,
    pub embeds: Vec<ReplyEmbed>,
    pub ephemeral: bool,
}

#[derive(Serialize)]
struct ReplyBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "no_embeds")]
    embeds: &'a [ReplyEmbed],
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<u64>,
}

fn no_embeds(embeds: &&[ReplyEmbed]) -> bool {
    embeds.is_empty()
}

impl ReplyPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: ReplyEmbed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn embeds(mut self, embeds: Vec<ReplyEmbed>) -> Self {
        self.embeds = embeds;
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    /// Rewrite the content in place to `"<glyph>  <content>"`.
    /// Missing content renders as empty text.
    pub fn prefix_content(&mut self, glyph: &str) {
        let original = self.content.take().unwrap_or_default();
        self.content = Some(format!("{}  {}", glyph, original));
    }

    /// Discord JSON body for edit / follow-up endpoints.
    pub fn to_json(&self) -> Value {
        let body = ReplyBody {
            content: self.content.as_deref(),
            embeds: &self.embeds,
            flags: self.ephemeral.then_some(EPHEMERAL_FLAG),
        };
        // Serializing plain strings and integers cannot fail
        serde_json::to_value(body).unwrap_or(Value::Null)
    }
}

impl From<&str> for ReplyPayload {
    fn from(content: &str) -> Self {
        ReplyPayload::new().content(content)
    }
}

impl From<String> for ReplyPayload {
    fn from(content: String) -> Self {
        ReplyPayload::new().content(content)
    }
}

impl From<ReplyEmbed> for ReplyPayload {
    fn from(embed: ReplyEmbed) -> Self {
        ReplyPayload::new().embed(embed)
    }
}
