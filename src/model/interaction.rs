use crate::model::errors::RequestError;
use crate::shared::discord::create_new_followup_url;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// How an interaction is acknowledged.
///
/// The wire codes are fixed by the Discord protocol and are mapped
/// explicitly; reordering the variants must never change them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InteractionCallbackType {
    /// Respond with a message, showing the user's input.
    ChannelMessageWithSource,
    /// Acknowledge without sending a message, showing the user's input.
    DeferredChannelMessageWithSource,
    /// Defer the update of the message for a component interaction.
    DeferredMessageUpdate,
    /// Update the message for a component interaction.
    MessageUpdate,
}

impl InteractionCallbackType {
    pub const fn raw(self) -> u8 {
        match self {
            InteractionCallbackType::ChannelMessageWithSource => 4,
            InteractionCallbackType::DeferredChannelMessageWithSource => 5,
            InteractionCallbackType::DeferredMessageUpdate => 6,
            InteractionCallbackType::MessageUpdate => 7,
        }
    }
}

impl TryFrom<u8> for InteractionCallbackType {
    type Error = RequestError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(InteractionCallbackType::ChannelMessageWithSource),
            5 => Ok(InteractionCallbackType::DeferredChannelMessageWithSource),
            6 => Ok(InteractionCallbackType::DeferredMessageUpdate),
            7 => Ok(InteractionCallbackType::MessageUpdate),
            _ => Err(RequestError::invalid_argument(format!(
                "Unknown interaction callback type: {}",
                value
            ))),
        }
    }
}

impl Serialize for InteractionCallbackType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.raw())
    }
}

/// The body posted to the interaction callback endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl InteractionResponse {
    pub fn new(kind: InteractionCallbackType) -> Self {
        InteractionResponse { kind, data: None }
    }

    pub fn with_data(kind: InteractionCallbackType, data: serde_json::Value) -> Self {
        InteractionResponse {
            kind,
            data: Some(data),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InteractionFollowupUrlData {
    pub application_id: u64,
    pub interaction_token: String,
}

impl InteractionFollowupUrlData {
    pub fn followup_url(&self) -> String {
        create_new_followup_url(self.application_id, &self.interaction_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_codes_match_the_protocol() {
        assert_eq!(InteractionCallbackType::ChannelMessageWithSource.raw(), 4);
        assert_eq!(
            InteractionCallbackType::DeferredChannelMessageWithSource.raw(),
            5
        );
        assert_eq!(InteractionCallbackType::DeferredMessageUpdate.raw(), 6);
        assert_eq!(InteractionCallbackType::MessageUpdate.raw(), 7);
    }

    #[test]
    fn codes_round_trip_and_reject_everything_else() {
        for raw in [4u8, 5, 6, 7] {
            let kind = InteractionCallbackType::try_from(raw).unwrap();
            assert_eq!(kind.raw(), raw);
        }
        for raw in [0u8, 1, 2, 3, 8, 255] {
            assert!(matches!(
                InteractionCallbackType::try_from(raw),
                Err(RequestError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn response_serializes_the_raw_code() {
        let response = InteractionResponse::with_data(
            InteractionCallbackType::ChannelMessageWithSource,
            serde_json::json!({ "content": "pong" }),
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": 4, "data": { "content": "pong" } })
        );
    }

    #[test]
    fn deferred_response_omits_data() {
        let response = InteractionResponse::new(InteractionCallbackType::DeferredMessageUpdate);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "type": 6 }));
    }

    #[test]
    fn followup_url_embeds_application_and_token() {
        let data = InteractionFollowupUrlData {
            application_id: 42,
            interaction_token: "token".to_string(),
        };
        assert_eq!(
            data.followup_url(),
            "https://discord.com/api/webhooks/42/token"
        );
    }
}
