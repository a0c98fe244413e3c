//! Message facade handed to command handlers
//!
//! Wraps one incoming event together with the client that delivered it and
//! turns the client's generic `send_message` into reply/edit/react/... calls.
//! Every sending method returns a new `Message` wrapping the client's record
//! of what was sent.

use std::path::Path;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::jid::to_jid;
use crate::domain::entities::message::is_bot_id;
use crate::domain::entities::{MediaKind, MessageData, MessageKey, QuotedMessage, ReplyMessage};
use crate::domain::traits::{ChatClient, ContextInfo, ExternalAdReply, OutgoingContent, SendOptions};
use crate::infrastructure::lang::lang;
use crate::infrastructure::media::{self, Downloaded};
use crate::infrastructure::http;
use crate::utils::tools::is_url;

/// File name used by `send_file` when none is given
pub const DEFAULT_FILE_NAME: &str = "χѕтяσ м∂";

/// Content for `Message::send`
#[derive(Debug, Clone, PartialEq)]
pub enum SendContent {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<&str> for SendContent {
    fn from(text: &str) -> Self {
        SendContent::Text(text.to_string())
    }
}

impl From<String> for SendContent {
    fn from(text: String) -> Self {
        SendContent::Text(text)
    }
}

impl From<Vec<u8>> for SendContent {
    fn from(bytes: Vec<u8>) -> Self {
        SendContent::Bytes(bytes)
    }
}

/// Source for `Message::send_file`
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    Bytes(Vec<u8>),
    Url(String),
}

/// Optional overrides for the sending methods
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    /// Target chat, defaults to the current chat
    pub jid: Option<String>,
    /// Media kind, detected from the content when unset
    pub kind: Option<MediaKind>,
    pub mentions: Option<Vec<String>>,
    pub quoted: Option<MessageKey>,
    pub caption: Option<String>,
    pub mimetype: Option<String>,
}

impl MessageOptions {
    pub fn to(jid: impl Into<String>) -> Self {
        Self {
            jid: Some(jid.into()),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_mentions(mut self, mentions: Vec<String>) -> Self {
        self.mentions = Some(mentions);
        self
    }

    pub fn quoting(mut self, key: MessageKey) -> Self {
        self.quoted = Some(key);
        self
    }

    fn send_options(&self) -> SendOptions {
        SendOptions {
            quoted: self.quoted.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Message {
    client: Arc<dyn ChatClient>,
    data: MessageData,
    pub key: MessageKey,
    pub id: String,
    pub jid: String,
    pub is_admin: bool,
    pub is_bot_admin: bool,
    pub is_group: bool,
    pub from_me: bool,
    pub push_name: String,
    pub message: serde_json::Value,
    pub prefix: String,
    pub sender: String,
    pub mtype: String,
    pub user: serde_json::Value,
    pub sudo: bool,
    pub isban: bool,
    pub mode: String,
    pub timestamp: i64,
    pub text: String,
    pub bot: bool,
    pub mention: Option<Vec<String>>,
    pub quoted: Option<QuotedMessage>,
    pub reply_message: Option<ReplyMessage>,
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Message")
            .field("id", &self.id)
            .field("jid", &self.jid)
            .field("sender", &self.sender)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl Message {
    pub fn new(client: Arc<dyn ChatClient>, data: MessageData) -> Self {
        Self {
            client,
            key: data.key.clone(),
            id: data.key.id.clone(),
            jid: data.key.remote_jid.clone(),
            is_admin: data.is_admin,
            is_bot_admin: data.is_bot_admin,
            is_group: data.is_group,
            from_me: data.key.from_me,
            push_name: data.push_name.clone(),
            message: data.message.clone(),
            prefix: data.prefix.clone(),
            sender: data.sender.clone(),
            mtype: data.content_type.clone(),
            user: data.user.clone(),
            sudo: data.sudo,
            isban: data.isban,
            mode: data.mode.clone(),
            timestamp: data.message_timestamp,
            text: data.body.clone().unwrap_or_default(),
            bot: is_bot_id(&data.key.id),
            mention: data.mention.clone(),
            quoted: data.quoted.clone(),
            reply_message: data.quoted.as_ref().map(ReplyMessage::from),
            data,
        }
    }

    pub fn data(&self) -> &MessageData {
        &self.data
    }

    fn wrap(&self, data: MessageData) -> Message {
        Message::new(self.client.clone(), data)
    }

    /// True when both the sender and the bot are group admins.
    /// Otherwise tells the chat which one is missing.
    pub async fn get_admin(&self) -> Result<bool, BotError> {
        if !self.is_admin {
            self.send(lang().text("ISADMIN"), MessageOptions::default()).await?;
            return Ok(false);
        }
        if !self.is_bot_admin {
            self.send(lang().text("ISBOTADMIN"), MessageOptions::default()).await?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Resolve the user a command targets: explicit number, then the quoted
    /// sender, then the first mention (groups) or the chat itself (DMs).
    pub fn get_jid(&self, matched: Option<&str>) -> Result<Option<String>, BotError> {
        if let Some(m) = matched.filter(|m| !m.trim().is_empty()) {
            return to_jid(m).map(Some);
        }
        if let Some(reply) = self.reply_message.as_ref().filter(|r| !r.sender.is_empty()) {
            return Ok(Some(reply.sender.clone()));
        }

        let fallback = if self.is_group {
            self.mention.as_ref().and_then(|m| m.first()).cloned()
        } else {
            Some(self.jid.clone())
        };
        Ok(fallback.filter(|j| !j.is_empty()))
    }

    /// Reply in a monospace block with the bot's link card attached
    pub async fn reply(&self, text: &str) -> Result<Message, BotError> {
        let lang = lang();
        let context = ContextInfo {
            mentioned_jid: Vec::new(),
            external_ad_reply: Some(ExternalAdReply {
                title: self.push_name.clone(),
                body: lang.text("BOT_NAME").to_string(),
                media_type: 1,
                thumbnail_url: lang.text("THUMBNAIL").to_string(),
                source_url: lang.text("REPO_URL").to_string(),
                show_ad_attribution: true,
            }),
        };
        let content = OutgoingContent::Text {
            text: format!("```{}```", text.trim()),
            context: Some(context),
        };

        let sent = self.client.send_message(&self.jid, content, SendOptions::default()).await?;
        Ok(self.wrap(sent))
    }

    /// Edit the quoted message, or this one when nothing is quoted
    pub async fn edit(&self, content: &str) -> Result<Message, BotError> {
        let key = self.quoted.as_ref().map(|q| q.key.clone()).unwrap_or_else(|| self.key.clone());
        let content = OutgoingContent::Edit {
            text: content.to_string(),
            key,
        };

        let sent = self.client.send_message(&self.jid, content, SendOptions::default()).await?;
        Ok(self.wrap(sent))
    }

    pub async fn react(&self, emoji: &str, key: Option<MessageKey>) -> Result<Message, BotError> {
        let content = OutgoingContent::React {
            emoji: emoji.to_string(),
            key: key.unwrap_or_else(|| self.key.clone()),
        };

        let sent = self.client.send_message(&self.jid, content, SendOptions::default()).await?;
        Ok(self.wrap(sent))
    }

    /// Delete the replied-to message, or this one when nothing is quoted
    pub async fn delete(&self) -> Result<Message, BotError> {
        let key = self
            .reply_message
            .as_ref()
            .map(|r| r.key.clone())
            .unwrap_or_else(|| self.key.clone());

        let sent = self
            .client
            .send_message(&self.jid, OutgoingContent::Delete { key }, SendOptions::default())
            .await?;
        Ok(self.wrap(sent))
    }

    /// Send text or bytes. Bytes go out as the detected media kind; text with
    /// an explicit `kind` that is a URL is fetched and sent as that kind.
    pub async fn send(&self, content: impl Into<SendContent>, opts: MessageOptions) -> Result<Message, BotError> {
        let jid = opts.jid.clone().unwrap_or_else(|| self.jid.clone());
        let mentions = opts.mentions.clone().or_else(|| self.mention.clone()).unwrap_or_default();
        let context = Some(ContextInfo::mentions(mentions));

        let content = match content.into() {
            SendContent::Text(text) if opts.kind.is_none() || !is_url(&text) => OutgoingContent::Text { text, context },
            SendContent::Text(url) => media_content(http::get_buffer(&url).await?, &opts, context),
            SendContent::Bytes(data) => media_content(data, &opts, context),
        };

        tracing::debug!("Sending {} to {}", content.kind(), jid);
        let sent = self.client.send_message(&jid, content, opts.send_options()).await?;
        Ok(self.wrap(sent))
    }

    /// Send bytes or the body of an http(s) URL as a document
    pub async fn send_file(
        &self,
        file: FileSource,
        file_name: Option<&str>,
        caption: Option<&str>,
        opts: MessageOptions,
    ) -> Result<Message, BotError> {
        self.try_send_file(file, file_name, caption, opts)
            .await
            .map_err(|e| BotError::Media(format!("Error sending file: {}", e)))
    }

    async fn try_send_file(
        &self,
        file: FileSource,
        file_name: Option<&str>,
        caption: Option<&str>,
        opts: MessageOptions,
    ) -> Result<Message, BotError> {
        let buffer = match file {
            FileSource::Bytes(bytes) => bytes,
            FileSource::Url(url) if is_url(&url) => http::get_buffer(&url).await?,
            FileSource::Url(_) => {
                return Err(BotError::InvalidInput("File must be a buffer or a valid URL".to_string()));
            }
        };
        if buffer.is_empty() {
            return Err(BotError::InvalidInput("No file provided".to_string()));
        }

        let mime = media::detect_mime(&buffer)
            .ok_or_else(|| BotError::Media("Unable to detect mime type".to_string()))?;

        let content = OutgoingContent::Media {
            kind: MediaKind::Document,
            data: buffer,
            mimetype: Some(mime.to_string()),
            file_name: Some(file_name.unwrap_or(DEFAULT_FILE_NAME).to_string()),
            caption: Some(caption.unwrap_or_default().to_string()),
            context: None,
        };

        let sent = self.client.send_message(&self.jid, content, opts.send_options()).await?;
        Ok(self.wrap(sent))
    }

    /// Fetch an http(s) URL and send it as whatever media it turns out to be
    pub async fn send_from_url(&self, url: &str, opts: MessageOptions) -> Result<Message, BotError> {
        if !is_url(url) {
            return Err(BotError::InvalidInput("Invalid URL".to_string()));
        }

        self.try_send_from_url(url, opts)
            .await
            .map_err(|e| BotError::Media(format!("Error sending message: {}", e)))
    }

    async fn try_send_from_url(&self, url: &str, opts: MessageOptions) -> Result<Message, BotError> {
        let buffer = http::get_file_and_save(url, http::DEFAULT_ATTEMPTS)
            .await
            .ok_or_else(|| BotError::Network("Failed to get buffer".to_string()))?;
        let kind = opts
            .kind
            .or_else(|| media::detect_type(&buffer))
            .ok_or_else(|| BotError::Media("Unsupported Content".to_string()))?;

        let content = OutgoingContent::Media {
            kind,
            mimetype: media::detect_mime(&buffer).map(String::from),
            data: buffer,
            file_name: None,
            caption: opts.caption.clone(),
            context: None,
        };

        let sent = self.client.send_message(&self.jid, content, opts.send_options()).await?;
        Ok(self.wrap(sent))
    }

    pub async fn forward(&self, jid: &str, message: serde_json::Value, opts: MessageOptions) -> Result<Message, BotError> {
        if jid.is_empty() || message.is_null() {
            return Err(BotError::InvalidInput("No jid or message provided".to_string()));
        }

        let context = opts.mentions.clone().map(ContextInfo::mentions);
        let content = OutgoingContent::Forward { message, context };
        let sent = self.client.send_message(jid, content, opts.send_options()).await?;
        Ok(self.wrap(sent))
    }

    /// Download the quoted media (or this message's own media).
    /// With `save_as_file` the file lands in the working directory.
    pub async fn download(&self, save_as_file: bool) -> Result<Downloaded, BotError> {
        let dir = save_as_file.then(|| Path::new("."));
        self.download_to(dir).await
    }

    pub async fn download_to(&self, dir: Option<&Path>) -> Result<Downloaded, BotError> {
        let (key, message, content_type) = match &self.quoted {
            Some(q) => (&q.key, &q.message, q.content_type.as_str()),
            None => (&self.key, &self.message, self.mtype.as_str()),
        };
        media::download_message(self.client.as_ref(), key, message, content_type, dir).await
    }
}

fn media_content(data: Vec<u8>, opts: &MessageOptions, context: Option<ContextInfo>) -> OutgoingContent {
    let kind = opts
        .kind
        .or_else(|| media::detect_type(&data))
        .unwrap_or(MediaKind::Document);
    OutgoingContent::Media {
        kind,
        mimetype: opts
            .mimetype
            .clone()
            .or_else(|| media::detect_mime(&data).map(String::from)),
        data,
        file_name: None,
        caption: opts.caption.clone(),
        context,
    }
}
