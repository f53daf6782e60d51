use crate::model::{ActionRow, EmbedObject};
use serde::{Deserialize, Serialize};

/// A message entity as returned by the Discord REST API.
///
/// Only the fields this crate consumes are modeled; everything else in the
/// payload is ignored on deserialization.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Message {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tts: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<EmbedObject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mention_roles: Vec<String>,
    #[serde(default)]
    pub mention_everyone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_id: Option<String>,
    /// Whether this entity was materialized from a cache rather than a
    /// response payload. Never part of the wire representation.
    #[serde(skip)]
    pub cache_backed: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Materializes message entities from raw response payloads.
pub struct EntityBuilder;

impl EntityBuilder {
    /// Builds a [`Message`] from a parsed response payload, bound to the
    /// channel the request targeted. The payload's own `channel_id` wins
    /// when present.
    pub fn create_message(
        payload: serde_json::Value,
        channel_id: u64,
        cache_backed: bool,
    ) -> anyhow::Result<Message> {
        let mut message = serde_json::from_value::<Message>(payload)?;
        if message.channel_id.is_empty() {
            message.channel_id = channel_id.to_string();
        }
        message.cache_backed = cache_backed;
        Ok(message)
    }
}
