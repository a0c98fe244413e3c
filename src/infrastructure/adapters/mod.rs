//! Chat client adapters
//!
//! The real WhatsApp client is an external collaborator. These adapters stand
//! in for it during development (console) and in tests (memory).

pub mod console;
pub mod memory;

use crate::domain::entities::{MessageData, MessageKey};
use crate::domain::traits::OutgoingContent;

/// Build the record a client returns for a message it just sent
pub fn echo_of(jid: &str, content: &OutgoingContent) -> MessageData {
    let id = format!("3EB0{}", &uuid::Uuid::new_v4().simple().to_string()[..16]).to_uppercase();
    let body = match content {
        OutgoingContent::Text { text, .. } | OutgoingContent::Edit { text, .. } => Some(text.clone()),
        OutgoingContent::React { emoji, .. } => Some(emoji.clone()),
        OutgoingContent::Media { caption, .. } => caption.clone(),
        OutgoingContent::Delete { .. } | OutgoingContent::Forward { .. } => None,
    };
    let content_type = match content {
        OutgoingContent::Text { .. } => "extendedTextMessage".to_string(),
        OutgoingContent::Edit { .. } => "protocolMessage".to_string(),
        OutgoingContent::React { .. } => "reactionMessage".to_string(),
        OutgoingContent::Delete { .. } => "protocolMessage".to_string(),
        OutgoingContent::Media { kind, .. } => kind.content_type().to_string(),
        OutgoingContent::Forward { .. } => "extendedTextMessage".to_string(),
    };

    let mut data = MessageData::text(MessageKey::new(id, jid, true), "", body.unwrap_or_default());
    data.content_type = content_type;
    data
}
