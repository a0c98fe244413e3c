use crate::application::errors::{BotError, CommandError};
use crate::application::message::Message;
use crate::domain::entities::{CommandInput, CommandRegistry};
use crate::infrastructure::lang::lang;
use crate::utils::runtime;

pub fn register(registry: &mut CommandRegistry) -> Result<(), CommandError> {
    registry.register(CommandInput::new("uptime|runtime"), uptime)?;
    Ok(())
}

async fn uptime(message: Message, _arg: Option<String>) -> Result<(), BotError> {
    let seconds = super::started_at().elapsed().as_secs();
    let text = match runtime(seconds) {
        s if s.is_empty() => "0 s".to_string(),
        s => s,
    };
    message.reply(&lang().format("UPTIME", &text)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MessageData, MessageKey};
    use crate::infrastructure::adapters::memory::MemoryClient;
    use std::sync::Arc;

    #[tokio::test]
    async fn replies_with_running_time() {
        let client = Arc::new(MemoryClient::new());
        let data = MessageData::text(MessageKey::new("U1", "1@s.whatsapp.net", true), "1@s.whatsapp.net", ".uptime");
        uptime(Message::new(client.clone(), data), None).await.unwrap();

        let texts = client.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("```Running for "));
    }
}
