use crate::application::errors::{BotError, CommandError};
use crate::application::message::Message;
use crate::domain::entities::{CommandInput, CommandRegistry};

pub fn register(registry: &mut CommandRegistry) -> Result<(), CommandError> {
    registry.register(CommandInput::new("jid"), jid)?;
    Ok(())
}

/// Show the JID a command would act on
async fn jid(message: Message, arg: Option<String>) -> Result<(), BotError> {
    match message.get_jid(arg.as_deref())? {
        Some(jid) => message.reply(&jid).await?,
        None => message.reply("Reply to, mention or give a number").await?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MessageData, MessageKey};
    use crate::infrastructure::adapters::memory::MemoryClient;
    use std::sync::Arc;

    fn group_message(client: &Arc<MemoryClient>) -> Message {
        let data = MessageData::text(MessageKey::new("J1", "123@g.us", true), "1@s.whatsapp.net", ".jid");
        Message::new(client.clone(), data)
    }

    #[tokio::test]
    async fn resolves_explicit_number() {
        let client = Arc::new(MemoryClient::new());
        jid(group_message(&client), Some("+44 7700 900123".to_string())).await.unwrap();
        assert_eq!(client.texts(), vec!["```447700900123@s.whatsapp.net```".to_string()]);
    }

    #[tokio::test]
    async fn asks_for_target_in_groups() {
        let client = Arc::new(MemoryClient::new());
        jid(group_message(&client), None).await.unwrap();
        assert_eq!(client.texts(), vec!["```Reply to, mention or give a number```".to_string()]);
    }

    #[tokio::test]
    async fn invalid_number_is_an_error() {
        let client = Arc::new(MemoryClient::new());
        assert!(jid(group_message(&client), Some("nobody".to_string())).await.is_err());
        assert!(client.sent().is_empty());
    }
}
