use serde::{Deserialize, Serialize};

const ACTION_ROW_TYPE: u8 = 1;
const BUTTON_TYPE: u8 = 2;

/// An ordered group of interactive components attached to a message.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ActionRow {
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<MessageComponent>,
}

impl ActionRow {
    pub fn new(components: Vec<MessageComponent>) -> Self {
        ActionRow {
            kind: ACTION_ROW_TYPE,
            components,
        }
    }
}

impl Default for ActionRow {
    fn default() -> Self {
        Self::new(vec![])
    }
}

/// A single interactive component inside an action row. The builder treats
/// these as opaque serializable values.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MessageComponent {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl MessageComponent {
    pub fn button<S, C>(style: u8, label: S, custom_id: C) -> Self
    where
        S: Into<String>,
        C: Into<String>,
    {
        MessageComponent {
            kind: BUTTON_TYPE,
            style: Some(style),
            label: Some(label.into()),
            custom_id: Some(custom_id.into()),
            ..Default::default()
        }
    }
}
