use crate::model::{
    ActionRow, AllowedMentions, AllowedMentionsDirective, EmbedObject, EntityBuilder, MentionParse,
    Mentionable, Message, RequestError,
};
use crate::request::body::{FilePart, WireBody};
use serde::Serialize;

pub const SPOILER_PREFIX: &str = "SPOILER_";

const MAX_EMBEDS: usize = 10;
const MAX_FILES: usize = 10;
const MAX_ACTION_ROWS: usize = 5;
const MAX_USERNAME_LENGTH: usize = 128;
const EPHEMERAL_FLAG: u64 = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttachmentOption {
    Spoiler,
}

/// A deferred, validating builder for a webhook message request.
///
/// All mutators validate at call time; a rejected call leaves the builder
/// exactly as it was. Serialization happens once, when the execution engine
/// invokes [`finalize_data`](Self::finalize_data); attachment data is drained
/// by that call, so a second finalization re-serializes the remaining state
/// with an empty attachment set (a still-valid, attachment-less body).
#[derive(Debug, Clone, Default)]
pub struct WebhookMessageRequest {
    channel_id: u64,
    content: String,
    embeds: Vec<EmbedObject>,
    files: Vec<(String, Vec<u8>)>,
    components: Vec<ActionRow>,
    allowed_mentions: AllowedMentions,
    tts: bool,
    ephemeral: bool,
    username: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Serialize)]
struct WebhookMessagePayload<'a> {
    content: &'a str,
    tts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<u64>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    embeds: &'a [EmbedObject],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    components: &'a [ActionRow],
    allowed_mentions: AllowedMentionsDirective,
}

impl WebhookMessageRequest {
    pub fn new(channel_id: u64) -> Self {
        WebhookMessageRequest {
            channel_id,
            ..Default::default()
        }
    }

    pub fn channel_id(&self) -> u64 {
        self.channel_id
    }

    /// Copies the text-to-speech flag, embeds, effective mention policy and
    /// action rows from an existing message, and replaces the content with
    /// that message's raw text. Intended for re-send style flows.
    pub fn apply_message(&mut self, message: &Message) -> &mut Self {
        self.tts = message.tts;
        self.embeds.extend(message.embeds.iter().cloned());
        self.allowed_mentions.apply_message(message);
        self.components.extend(message.components.iter().cloned());
        self.set_content(Some(&message.content))
    }

    pub fn set_content(&mut self, content: Option<&str>) -> &mut Self {
        self.content.clear();
        if let Some(content) = content {
            self.content.push_str(content);
        }
        self
    }

    pub fn set_tts(&mut self, tts: bool) -> &mut Self {
        self.tts = tts;
        self
    }

    pub fn set_ephemeral(&mut self, ephemeral: bool) -> &mut Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn set_username(&mut self, name: Option<&str>) -> Result<&mut Self, RequestError> {
        if let Some(name) = name {
            if name.is_empty() {
                return Err(RequestError::invalid_argument("Name may not be empty"));
            }
            if name.chars().count() > MAX_USERNAME_LENGTH {
                return Err(RequestError::invalid_argument(format!(
                    "Name may not be longer than {} characters",
                    MAX_USERNAME_LENGTH
                )));
            }
            self.username = Some(name.to_string());
        } else {
            self.username = None;
        }
        Ok(self)
    }

    /// An empty url is normalized to "unset" at this boundary.
    pub fn set_avatar_url(&mut self, icon_url: Option<&str>) -> &mut Self {
        self.avatar_url = icon_url.filter(|url| !url.is_empty()).map(str::to_string);
        self
    }

    pub fn add_embeds<I>(&mut self, embeds: I) -> Result<&mut Self, RequestError>
    where
        I: IntoIterator<Item = EmbedObject>,
    {
        let embeds = embeds.into_iter().collect::<Vec<_>>();
        if self.embeds.len() + embeds.len() > MAX_EMBEDS {
            return Err(RequestError::invalid_argument(format!(
                "Cannot have more than {} embeds in a message!",
                MAX_EMBEDS
            )));
        }
        self.embeds.extend(embeds);
        Ok(self)
    }

    /// Yes < 10 not <= 10 since we add one after this check.
    pub fn add_file(
        &mut self,
        name: &str,
        data: Vec<u8>,
        options: &[AttachmentOption],
    ) -> Result<&mut Self, RequestError> {
        if self.files.len() >= MAX_FILES {
            return Err(RequestError::invalid_argument(format!(
                "Cannot have more than {} files in a message!",
                MAX_FILES
            )));
        }
        let name = if options.first() == Some(&AttachmentOption::Spoiler) {
            format!("{}{}", SPOILER_PREFIX, name)
        } else {
            name.to_string()
        };
        if let Some(existing) = self.files.iter_mut().find(|(stored, _)| *stored == name) {
            existing.1 = data;
        } else {
            self.files.push((name, data));
        }
        Ok(self)
    }

    pub fn add_action_rows<I>(&mut self, rows: I) -> Result<&mut Self, RequestError>
    where
        I: IntoIterator<Item = ActionRow>,
    {
        let rows = rows.into_iter().collect::<Vec<_>>();
        if self.components.len() + rows.len() > MAX_ACTION_ROWS {
            return Err(RequestError::invalid_argument(format!(
                "Can only have {} action rows per message!",
                MAX_ACTION_ROWS
            )));
        }
        self.components.extend(rows);
        Ok(self)
    }

    pub fn mention_replied_user(&mut self, mention: bool) -> &mut Self {
        self.allowed_mentions.mention_replied_user(mention);
        self
    }

    pub fn allowed_mentions<I>(&mut self, allowed: Option<I>) -> &mut Self
    where
        I: IntoIterator<Item = MentionParse>,
    {
        self.allowed_mentions.allowed_mentions(allowed);
        self
    }

    pub fn mention<I>(&mut self, mentions: I) -> &mut Self
    where
        I: IntoIterator<Item = Mentionable>,
    {
        self.allowed_mentions.mention(mentions);
        self
    }

    pub fn mention_users<I, S>(&mut self, user_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_mentions.mention_users(user_ids);
        self
    }

    pub fn mention_roles<I, S>(&mut self, role_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_mentions.mention_roles(role_ids);
        self
    }

    fn get_json(&self) -> anyhow::Result<serde_json::Value> {
        let payload = WebhookMessagePayload {
            content: &self.content,
            tts: self.tts,
            username: self.username.as_deref(),
            avatar_url: self.avatar_url.as_deref(),
            flags: self.ephemeral.then_some(EPHEMERAL_FLAG),
            embeds: &self.embeds,
            components: &self.components,
            allowed_mentions: self.allowed_mentions.directive(),
        };
        Ok(serde_json::to_value(payload)?)
    }

    /// Serializes the accumulated state into the wire body. Invoked once by
    /// the execution engine at dispatch time. Pending attachments are moved
    /// out of the builder and cannot be reused afterwards.
    pub fn finalize_data(&mut self) -> anyhow::Result<WireBody> {
        let json = self.get_json()?;
        if self.files.is_empty() {
            return Ok(WireBody::Json(json));
        }

        let files = std::mem::take(&mut self.files)
            .into_iter()
            .enumerate()
            .map(|(index, (file_name, data))| FilePart {
                name: format!("file{}", index),
                file_name,
                data,
            })
            .collect();
        Ok(WireBody::Multipart {
            files,
            payload_json: json.to_string(),
        })
    }

    /// Turns a successfully parsed response payload into the message entity
    /// for the channel this request was bound to.
    pub fn handle_success(&self, payload: serde_json::Value) -> anyhow::Result<Message> {
        EntityBuilder::create_message(payload, self.channel_id, false)
    }
}
