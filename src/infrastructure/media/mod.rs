//! Media sniffing, message property edits and media downloads

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::application::errors::BotError;
use crate::domain::entities::message::is_media_message;
use crate::domain::entities::{MediaKind, MessageKey};
use crate::domain::traits::ChatClient;

/// Sniff a mime type from magic bytes
pub fn detect_mime(bytes: &[u8]) -> Option<&'static str> {
    sniff(bytes).map(|(mime, _)| mime)
}

/// File extension for the sniffed type
pub fn extension(bytes: &[u8]) -> Option<&'static str> {
    sniff(bytes).map(|(_, ext)| ext)
}

fn sniff(b: &[u8]) -> Option<(&'static str, &'static str)> {
    let at = |offset: usize, magic: &[u8]| b.len() >= offset + magic.len() && &b[offset..offset + magic.len()] == magic;

    if at(0, &[0xFF, 0xD8, 0xFF]) {
        return Some(("image/jpeg", "jpg"));
    }
    if at(0, &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(("image/png", "png"));
    }
    if at(0, b"GIF87a") || at(0, b"GIF89a") {
        return Some(("image/gif", "gif"));
    }
    if at(0, b"RIFF") && at(8, b"WEBP") {
        return Some(("image/webp", "webp"));
    }
    if at(0, b"RIFF") && at(8, b"WAVE") {
        return Some(("audio/wav", "wav"));
    }
    if at(4, b"ftyp") {
        if at(8, b"M4A ") {
            return Some(("audio/mp4", "m4a"));
        }
        return Some(("video/mp4", "mp4"));
    }
    if at(0, &[0x1A, 0x45, 0xDF, 0xA3]) {
        let head = &b[..b.len().min(64)];
        if head.windows(4).any(|w| w == b"webm") {
            return Some(("video/webm", "webm"));
        }
        return Some(("video/x-matroska", "mkv"));
    }
    if at(0, b"OggS") {
        return Some(("audio/ogg", "ogg"));
    }
    if at(0, b"ID3") || at(0, &[0xFF, 0xFB]) || at(0, &[0xFF, 0xF3]) || at(0, &[0xFF, 0xF2]) {
        return Some(("audio/mpeg", "mp3"));
    }
    if at(0, b"%PDF") {
        return Some(("application/pdf", "pdf"));
    }
    if at(0, &[b'P', b'K', 0x03, 0x04]) {
        return Some(("application/zip", "zip"));
    }
    None
}

/// Which kind of message a buffer should be sent as
pub fn detect_type(bytes: &[u8]) -> Option<MediaKind> {
    let mime = detect_mime(bytes)?;
    let kind = match mime.split('/').next() {
        Some(_) if mime == "image/webp" => MediaKind::Sticker,
        Some("image") => MediaKind::Image,
        Some("video") => MediaKind::Video,
        Some("audio") => MediaKind::Audio,
        _ => MediaKind::Document,
    };
    Some(kind)
}

/// Return a copy of `message` with the value at dot-separated `path` replaced
pub fn edit_message_property(message: &Value, path: &str, value: Value) -> Result<Value, BotError> {
    if !message.is_object() {
        return Err(BotError::InvalidInput("Message must be an object".to_string()));
    }
    if path.is_empty() {
        return Err(BotError::InvalidInput("Property path must be a string using dot notation".to_string()));
    }

    let mut result = message.clone();
    let keys: Vec<&str> = path.split('.').collect();
    let missing = || BotError::InvalidInput(format!("\"{}\" does not exist in message", path));

    if keys.iter().any(|k| *k == "__proto__" || *k == "constructor") {
        return Err(BotError::InvalidInput("Prototype pollution attempt detected".to_string()));
    }

    let (last, parents) = keys.split_last().ok_or_else(missing)?;
    let mut current = &mut result;
    for key in parents {
        current = child_mut(current, key).ok_or_else(missing)?;
    }

    match current {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
        }
        Value::Array(items) => {
            let slot = last
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get_mut(i))
                .ok_or_else(missing)?;
            *slot = value;
        }
        _ => return Err(missing()),
    }

    Ok(result)
}

fn child_mut<'a>(value: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

/// Result of a media download
#[derive(Debug, Clone, PartialEq)]
pub enum Downloaded {
    Buffer(Vec<u8>),
    Saved(PathBuf),
}

/// Download a media message, optionally writing it to `<dir>/<id>.<ext>`
pub async fn download_message(
    client: &dyn ChatClient,
    key: &MessageKey,
    message: &Value,
    content_type: &str,
    save_to: Option<&Path>,
) -> Result<Downloaded, BotError> {
    if !is_media_message(content_type) {
        return Err(BotError::Media("Message must be a media message".to_string()));
    }

    let media = client.download_media(key, message).await?;
    if media.is_empty() {
        return Err(BotError::Media("Failed to download media as buffer".to_string()));
    }
    tracing::debug!("Downloaded {} bytes for message {}", media.len(), key.id);

    let Some(dir) = save_to else {
        return Ok(Downloaded::Buffer(media));
    };

    let ext = extension(&media)
        .ok_or_else(|| BotError::Media("Could not determine file type from buffer".to_string()))?;
    let path = dir.join(format!("{}.{}", key.id, ext));
    tokio::fs::write(&path, &media).await?;
    tracing::info!("Saved media to {}", path.display());
    Ok(Downloaded::Saved(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MessageData;
    use crate::domain::traits::{OutgoingContent, SendOptions};
    use async_trait::async_trait;
    use serde_json::json;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    struct FixedMedia(Vec<u8>);

    #[async_trait]
    impl ChatClient for FixedMedia {
        async fn send_message(&self, _jid: &str, _content: OutgoingContent, _opts: SendOptions) -> Result<MessageData, BotError> {
            Ok(MessageData::default())
        }

        async fn download_media(&self, _key: &MessageKey, _message: &Value) -> Result<Vec<u8>, BotError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn sniffs_common_types() {
        assert_eq!(detect_mime(PNG), Some("image/png"));
        assert_eq!(detect_mime(b"%PDF-1.7"), Some("application/pdf"));
        assert_eq!(extension(b"\0\0\0\x18ftypmp42"), Some("mp4"));
        assert_eq!(detect_mime(b"hello"), None);
    }

    #[test]
    fn detect_type_maps_families() {
        assert_eq!(detect_type(PNG), Some(MediaKind::Image));
        assert_eq!(detect_type(b"RIFF\0\0\0\0WEBPVP8 "), Some(MediaKind::Sticker));
        assert_eq!(detect_type(b"OggS\0"), Some(MediaKind::Audio));
        assert_eq!(detect_type(b"PK\x03\x04rest"), Some(MediaKind::Document));
        assert_eq!(detect_type(b"plain text"), None);
    }

    #[test]
    fn edits_nested_property_without_touching_input() {
        let msg = json!({"key": {"id": "A", "fromMe": false}});
        let edited = edit_message_property(&msg, "key.fromMe", json!(true)).unwrap();
        assert_eq!(edited["key"]["fromMe"], json!(true));
        assert_eq!(msg["key"]["fromMe"], json!(false));
    }

    #[test]
    fn rejects_missing_paths_and_pollution() {
        let msg = json!({"key": {}});
        let err = edit_message_property(&msg, "message.text", json!("x")).unwrap_err();
        assert_eq!(err.to_string(), "\"message.text\" does not exist in message");

        let err = edit_message_property(&msg, "__proto__.x", json!(1)).unwrap_err();
        assert_eq!(err.to_string(), "Prototype pollution attempt detected");

        assert!(edit_message_property(&json!("str"), "a", json!(1)).is_err());
    }

    #[tokio::test]
    async fn download_rejects_non_media() {
        let client = FixedMedia(PNG.to_vec());
        let key = MessageKey::new("ID1", "1@s.whatsapp.net", false);
        let err = download_message(&client, &key, &json!({}), "conversation", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Message must be a media message");
    }

    #[tokio::test]
    async fn download_saves_with_sniffed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let client = FixedMedia(PNG.to_vec());
        let key = MessageKey::new("ID1", "1@s.whatsapp.net", false);

        let out = download_message(&client, &key, &json!({}), "imageMessage", Some(dir.path())).await.unwrap();
        let expected = dir.path().join("ID1.png");
        assert_eq!(out, Downloaded::Saved(expected.clone()));
        assert_eq!(std::fs::read(expected).unwrap(), PNG);
    }

    #[tokio::test]
    async fn download_unknown_type_cannot_be_saved() {
        let dir = tempfile::tempdir().unwrap();
        let client = FixedMedia(b"???".to_vec());
        let key = MessageKey::new("ID2", "1@s.whatsapp.net", false);

        let buffer = download_message(&client, &key, &json!({}), "documentMessage", None).await.unwrap();
        assert_eq!(buffer, Downloaded::Buffer(b"???".to_vec()));

        let err = download_message(&client, &key, &json!({}), "documentMessage", Some(dir.path())).await.unwrap_err();
        assert_eq!(err.to_string(), "Could not determine file type from buffer");
    }
}
