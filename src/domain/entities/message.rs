use serde::{Deserialize, Serialize};

/// Message ids generated by bot libraries start with one of these.
const BOT_ID_PREFIXES: [&str; 2] = ["BAE5", "3EB0"];

/// Key identifying a message inside a chat
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    pub id: String,
    pub remote_jid: String,
    pub from_me: bool,
}

impl MessageKey {
    pub fn new(id: impl Into<String>, remote_jid: impl Into<String>, from_me: bool) -> Self {
        Self {
            id: id.into(),
            remote_jid: remote_jid.into(),
            from_me,
        }
    }
}

/// Media content types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Sticker,
    Document,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Image,
        MediaKind::Video,
        MediaKind::Audio,
        MediaKind::Sticker,
        MediaKind::Document,
    ];

    /// Content-type name used by the client library (`imageMessage`, ...)
    pub fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Image => "imageMessage",
            MediaKind::Video => "videoMessage",
            MediaKind::Audio => "audioMessage",
            MediaKind::Sticker => "stickerMessage",
            MediaKind::Document => "documentMessage",
        }
    }

    /// Key used when sending content of this kind (`image`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Sticker => "sticker",
            MediaKind::Document => "document",
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.content_type() == content_type)
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

pub fn is_media_message(content_type: &str) -> bool {
    MediaKind::from_content_type(content_type).is_some()
}

pub fn is_bot_id(id: &str) -> bool {
    BOT_ID_PREFIXES.iter().any(|p| id.starts_with(p))
}

/// A message quoted by the incoming message
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotedMessage {
    pub key: MessageKey,
    pub sender: String,
    pub mtype: String,
    pub body: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub message: serde_json::Value,
    pub is_status: bool,
    pub sudo: bool,
    pub isban: bool,
    pub viewonce: bool,
}

/// Incoming event as delivered by the client library
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageData {
    pub key: MessageKey,
    pub is_admin: bool,
    pub is_bot_admin: bool,
    pub is_group: bool,
    pub push_name: String,
    pub message: serde_json::Value,
    pub prefix: String,
    pub sender: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub user: serde_json::Value,
    pub sudo: bool,
    pub isban: bool,
    pub mode: String,
    pub message_timestamp: i64,
    pub body: Option<String>,
    pub mention: Option<Vec<String>>,
    pub quoted: Option<QuotedMessage>,
}

impl MessageData {
    /// Minimal text event, mostly useful for adapters and tests
    pub fn text(key: MessageKey, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            is_group: crate::domain::entities::jid::is_group_jid(&key.remote_jid),
            key,
            sender: sender.into(),
            content_type: "conversation".to_string(),
            body: Some(body.into()),
            message_timestamp: chrono::Utc::now().timestamp(),
            ..Default::default()
        }
    }

    pub fn is_media(&self) -> bool {
        is_media_message(&self.content_type)
    }
}

/// Flattened view of the quoted message used by command handlers
#[derive(Debug, Clone, Default)]
pub struct ReplyMessage {
    pub id: String,
    pub from_me: bool,
    pub sender: String,
    pub key: MessageKey,
    pub bot: bool,
    pub mtype: String,
    pub sudo: bool,
    pub isban: bool,
    pub message: serde_json::Value,
    pub text: String,
    pub status: bool,
    pub image: bool,
    pub video: bool,
    pub audio: bool,
    pub sticker: bool,
    pub document: bool,
    pub viewonce: bool,
}

impl From<&QuotedMessage> for ReplyMessage {
    fn from(quoted: &QuotedMessage) -> Self {
        let kind = MediaKind::from_content_type(&quoted.content_type);
        Self {
            id: quoted.key.id.clone(),
            from_me: quoted.key.from_me,
            sender: quoted.sender.clone(),
            key: quoted.key.clone(),
            bot: is_bot_id(&quoted.key.id),
            mtype: quoted.mtype.clone(),
            sudo: quoted.sudo,
            isban: quoted.isban,
            message: quoted.message.clone(),
            text: quoted.body.clone(),
            status: quoted.is_status,
            image: kind == Some(MediaKind::Image),
            video: kind == Some(MediaKind::Video),
            audio: kind == Some(MediaKind::Audio),
            sticker: kind == Some(MediaKind::Sticker),
            document: kind == Some(MediaKind::Document),
            viewonce: quoted.viewonce,
        }
    }
}
