use std::time::Instant;

use crate::application::errors::{BotError, CommandError};
use crate::application::message::Message;
use crate::domain::entities::{CommandInput, CommandRegistry};

pub fn register(registry: &mut CommandRegistry) -> Result<(), CommandError> {
    registry.register(CommandInput::new("ping").public(true).hidden(true), ping)?;
    Ok(())
}

/// Reply, then edit in the round-trip time
async fn ping(message: Message, _arg: Option<String>) -> Result<(), BotError> {
    let start = Instant::now();
    message.reply("Pong!").await?;
    let elapsed = start.elapsed().as_millis();
    message.edit(&format!("Pong! `{}ms`", elapsed)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MessageData, MessageKey};
    use crate::domain::traits::OutgoingContent;
    use crate::infrastructure::adapters::memory::MemoryClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn replies_then_edits_own_message() {
        let client = Arc::new(MemoryClient::new());
        let data = MessageData::text(MessageKey::new("CMD1", "1@s.whatsapp.net", true), "1@s.whatsapp.net", ".ping");
        ping(Message::new(client.clone(), data), None).await.unwrap();

        let sent = client.sent();
        assert_eq!(sent.len(), 2);
        assert!(matches!(&sent[0].content, OutgoingContent::Text { text, .. } if text == "```Pong!```"));
        match &sent[1].content {
            OutgoingContent::Edit { text, key } => {
                assert_eq!(key.id, "CMD1");
                assert!(text.starts_with("Pong! `") && text.ends_with("ms`"));
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn ping_is_public_and_hidden() {
        let mut registry = CommandRegistry::new();
        register(&mut registry).unwrap();
        let (cmd, _) = registry.find("ping").unwrap();
        assert!(cmd.public && cmd.dont_add_command_list && !cmd.is_group);
    }
}
