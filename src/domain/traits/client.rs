use async_trait::async_trait;
use serde::Serialize;

use crate::application::errors::BotError;
use crate::domain::entities::{MediaKind, MessageData, MessageKey};

/// Client trait - the external WhatsApp client library.
///
/// Sessions, encryption and sockets live behind this trait. The bot only
/// sends content and downloads media through it.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send content to a chat. Returns the client's record of the sent message.
    async fn send_message(&self, jid: &str, content: OutgoingContent, opts: SendOptions) -> Result<MessageData, BotError>;

    /// Download and decrypt the media attached to a message
    async fn download_media(&self, key: &MessageKey, message: &serde_json::Value) -> Result<Vec<u8>, BotError>;
}

/// Content accepted by `send_message`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingContent {
    Text {
        text: String,
        context: Option<ContextInfo>,
    },
    Edit {
        text: String,
        key: MessageKey,
    },
    React {
        emoji: String,
        key: MessageKey,
    },
    Delete {
        key: MessageKey,
    },
    Media {
        kind: MediaKind,
        #[serde(skip)]
        data: Vec<u8>,
        mimetype: Option<String>,
        file_name: Option<String>,
        caption: Option<String>,
        context: Option<ContextInfo>,
    },
    Forward {
        message: serde_json::Value,
        context: Option<ContextInfo>,
    },
}

impl OutgoingContent {
    pub fn text(text: impl Into<String>) -> Self {
        OutgoingContent::Text {
            text: text.into(),
            context: None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OutgoingContent::Text { .. } => "text",
            OutgoingContent::Edit { .. } => "edit",
            OutgoingContent::React { .. } => "react",
            OutgoingContent::Delete { .. } => "delete",
            OutgoingContent::Media { kind, .. } => kind.as_str(),
            OutgoingContent::Forward { .. } => "forward",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    pub mentioned_jid: Vec<String>,
    pub external_ad_reply: Option<ExternalAdReply>,
}

impl ContextInfo {
    pub fn mentions(jids: Vec<String>) -> Self {
        Self {
            mentioned_jid: jids,
            external_ad_reply: None,
        }
    }
}

/// Link preview card attached to replies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalAdReply {
    pub title: String,
    pub body: String,
    pub media_type: u8,
    pub thumbnail_url: String,
    pub source_url: String,
    pub show_ad_attribution: bool,
}

/// Per-send options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    pub quoted: Option<MessageKey>,
}
