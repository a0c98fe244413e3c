//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{MessageData, MessageKey};
use crate::domain::traits::{ChatClient, OutgoingContent, SendOptions};
use crate::infrastructure::config::ConsoleConfig;

/// Console client: prints outgoing messages, turns stdin lines into events
pub struct ConsoleAdapter {
    chat_jid: String,
    sudo: bool,
}

impl ConsoleAdapter {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            chat_jid: config.jid.clone(),
            sudo: config.sudo,
        }
    }

    pub fn chat_jid(&self) -> &str {
        &self.chat_jid
    }

    /// Wrap a typed line as an incoming message from the console user
    pub fn incoming(&self, line: &str) -> MessageData {
        let id = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
        let mut data = MessageData::text(MessageKey::new(id, &self.chat_jid, false), &self.chat_jid, line);
        data.push_name = "console".to_string();
        data.sudo = self.sudo;
        data
    }
}

fn render(content: &OutgoingContent) -> String {
    match content {
        OutgoingContent::Text { text, .. } => text.clone(),
        OutgoingContent::Edit { text, key } => format!("(edit {}) {}", key.id, text),
        OutgoingContent::React { emoji, key } => format!("(react {}) {}", key.id, emoji),
        OutgoingContent::Delete { key } => format!("(delete {})", key.id),
        OutgoingContent::Media { kind, data, caption, .. } => format!(
            "[{} {}] {}",
            kind.as_str(),
            crate::utils::format_bytes(data.len() as u64, 2),
            caption.as_deref().unwrap_or("")
        ),
        OutgoingContent::Forward { message, .. } => format!("(forward) {}", message),
    }
}

#[async_trait]
impl ChatClient for ConsoleAdapter {
    async fn send_message(&self, jid: &str, content: OutgoingContent, _opts: SendOptions) -> Result<MessageData, BotError> {
        println!("[BOT -> {}] {}", jid, render(&content));
        Ok(super::echo_of(jid, &content))
    }

    async fn download_media(&self, key: &MessageKey, _message: &serde_json::Value) -> Result<Vec<u8>, BotError> {
        Err(BotError::Client(format!("Console cannot download media for {}", key.id)))
    }
}
