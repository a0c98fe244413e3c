//! In-memory client that records everything sent through it

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::{MessageData, MessageKey};
use crate::domain::traits::{ChatClient, OutgoingContent, SendOptions};

/// One `send_message` call
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub jid: String,
    pub content: OutgoingContent,
    pub opts: SendOptions,
}

#[derive(Default)]
pub struct MemoryClient {
    sent: Mutex<Vec<SentMessage>>,
    media: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `bytes` downloadable for the message with this id
    pub fn store_media(&self, id: impl Into<String>, bytes: Vec<u8>) {
        if let Ok(mut media) = self.media.lock() {
            media.insert(id.into(), bytes);
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<SentMessage> {
        self.sent.lock().ok()?.last().cloned()
    }

    /// Text of every text/edit message sent so far
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s.content {
                OutgoingContent::Text { text, .. } | OutgoingContent::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatClient for MemoryClient {
    async fn send_message(&self, jid: &str, content: OutgoingContent, opts: SendOptions) -> Result<MessageData, BotError> {
        let echo = super::echo_of(jid, &content);
        self.sent
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?
            .push(SentMessage {
                jid: jid.to_string(),
                content,
                opts,
            });
        Ok(echo)
    }

    async fn download_media(&self, key: &MessageKey, _message: &serde_json::Value) -> Result<Vec<u8>, BotError> {
        self.media
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?
            .get(&key.id)
            .cloned()
            .ok_or_else(|| BotError::Client(format!("No media stored for message {}", key.id)))
    }
}
