// src/models.rs

use crate::constants::{COPIED_GLYPH, COPY_FAILED_GLYPH, COPY_GLYPH, NO_RESPONSE_FALLBACK};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who produced a displayed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// The text sent to the chat endpoint, serialized as `{"message": text}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    #[serde(rename = "message")]
    text: String,
}

impl OutboundMessage {
    /// Trims `raw` and returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim_matches(is_input_whitespace);
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Whitespace as browsers trim it: the BOM counts, NEL (U+0085) does not.
fn is_input_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyGlyph {
    #[default]
    Idle,
    Copied,
    Failed,
}

impl CopyGlyph {
    pub fn as_str(self) -> &'static str {
        match self {
            CopyGlyph::Idle => COPY_GLYPH,
            CopyGlyph::Copied => COPIED_GLYPH,
            CopyGlyph::Failed => COPY_FAILED_GLYPH,
        }
    }
}

/// Copy affordance attached to every bot message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyControl {
    pub glyph: CopyGlyph,
}

/// A rendered chat line.
#[derive(Debug, Clone)]
pub struct DisplayedMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub copy: Option<CopyControl>,
}

impl DisplayedMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        let copy = match sender {
            Sender::Bot => Some(CopyControl::default()),
            Sender::User => None,
        };
        Self {
            sender,
            text: text.into(),
            timestamp: Local::now(),
            copy,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

/// Body returned by the chat endpoint.
#[derive(Debug, Clone, Default)]
pub struct ChatReply {
    response: Option<Value>,
}

impl ChatReply {
    /// Accepts any JSON document; non-objects simply have no `response`.
    pub fn from_value(body: Value) -> Self {
        let response = match body {
            Value::Object(mut map) => map.remove("response"),
            _ => None,
        };
        Self { response }
    }

    /// The bot text, or the fallback when the field is missing or falsy.
    pub fn text(&self) -> String {
        match &self.response {
            None | Some(Value::Null) | Some(Value::Bool(false)) => NO_RESPONSE_FALLBACK.to_string(),
            Some(Value::String(s)) if s.is_empty() => NO_RESPONSE_FALLBACK.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => NO_RESPONSE_FALLBACK.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Logs details of each outbound call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_message_is_trimmed() {
        let message = OutboundMessage::new("  hello \n").unwrap();
        assert_eq!(message.text(), "hello");
        assert_eq!(serde_json::to_value(&message).unwrap(), json!({"message": "hello"}));
    }

    #[test]
    fn test_outbound_message_rejects_blank_input() {
        assert!(OutboundMessage::new("").is_none());
        assert!(OutboundMessage::new(" \t\n ").is_none());
    }

    #[test]
    fn test_outbound_message_trims_like_a_text_field() {
        assert!(OutboundMessage::new("\u{feff}").is_none());
        assert!(OutboundMessage::new("\u{feff} \u{a0}").is_none());
        assert_eq!(OutboundMessage::new("\u{feff}hi\u{3000}").unwrap().text(), "hi");
        assert_eq!(OutboundMessage::new("\u{85}").unwrap().text(), "\u{85}");
    }

    #[test]
    fn test_only_bot_messages_get_copy_control() {
        assert!(DisplayedMessage::new(Sender::Bot, "hi").copy.is_some());
        assert!(DisplayedMessage::new(Sender::User, "hi").copy.is_none());
    }

    #[test]
    fn test_reply_text_falls_back_when_missing() {
        assert_eq!(ChatReply::from_value(json!({})).text(), NO_RESPONSE_FALLBACK);
        assert_eq!(ChatReply::from_value(json!({"response": ""})).text(), NO_RESPONSE_FALLBACK);
        assert_eq!(ChatReply::from_value(json!({"response": null})).text(), NO_RESPONSE_FALLBACK);
        assert_eq!(ChatReply::from_value(json!([1, 2])).text(), NO_RESPONSE_FALLBACK);
    }

    #[test]
    fn test_reply_text_reads_response_field() {
        let reply = ChatReply::from_value(json!({"response": "hi there", "extra": 1}));
        assert_eq!(reply.text(), "hi there");
    }
}
