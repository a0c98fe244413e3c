//! Message dispatcher - Routes incoming events to registered commands

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::message::{Message, MessageOptions};
use crate::domain::entities::{CommandRegistry, MessageData};
use crate::domain::traits::ChatClient;
use crate::infrastructure::config::{Config, Mode};
use crate::infrastructure::lang::lang;

/// What happened to an incoming event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No prefix, no text, or no matching command
    NoMatch,
    /// Sender is banned
    Banned,
    /// Command exists but the sender may not run it in this mode
    Denied(String),
    /// Group-only command used outside a group
    GroupOnly(String),
    Executed(String),
    /// Handler returned an error (already reported to the chat)
    Failed { command: String, error: String },
}

/// Shared, cheap to clone
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    config: Arc<Config>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, config: Config) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Strip the configured prefix; `None` when the text does not carry it
    pub fn strip_prefix<'a>(&self, text: &'a str) -> Option<&'a str> {
        let text = text.trim_start();
        let prefix = self.config.bot.prefix.as_str();
        if prefix.is_empty() {
            return Some(text);
        }
        text.strip_prefix(prefix)
    }

    pub async fn dispatch(&self, client: Arc<dyn ChatClient>, mut data: MessageData) -> Result<Dispatch, BotError> {
        if data.isban {
            tracing::debug!("Ignoring banned sender {}", data.sender);
            return Ok(Dispatch::Banned);
        }

        let Some(body) = data.body.clone() else {
            return Ok(Dispatch::NoMatch);
        };
        let Some(text) = self.strip_prefix(&body) else {
            return Ok(Dispatch::NoMatch);
        };
        let Some((command, arg)) = self.registry.find(text) else {
            tracing::debug!("No command matches '{}'", text);
            return Ok(Dispatch::NoMatch);
        };
        let name = command.name.clone();

        data.sudo = data.sudo || self.config.is_sudo(&data.sender);
        data.prefix = self.config.bot.prefix.clone();
        data.mode = self.config.bot.mode.as_str().to_string();

        let allowed = data.sudo || data.key.from_me || self.config.bot.mode == Mode::Public || command.public;
        if !allowed {
            tracing::debug!("[{}] {} may not run {}", data.key.remote_jid, data.sender, name);
            return Ok(Dispatch::Denied(name));
        }

        let message = Message::new(client, data);

        if command.is_group && !message.is_group {
            message.send(lang().text("GROUP_ONLY"), MessageOptions::default()).await?;
            return Ok(Dispatch::GroupOnly(name));
        }

        tracing::info!("[{}] {} -> {}", message.jid, message.sender, name);
        match (command.handler)(message.clone(), arg).await {
            Ok(()) => Ok(Dispatch::Executed(name)),
            Err(e) => {
                tracing::error!("Command {} failed: {}", name, e);
                let error = e.to_string();
                if let Err(report) = message.send(lang().format("ERROR", &error), MessageOptions::default()).await {
                    tracing::warn!("Could not report {} failure to {}: {}", name, message.jid, report);
                }
                Ok(Dispatch::Failed { command: name, error })
            }
        }
    }
}
