//! Built-in commands
//!
//! Each submodule registers one command. `menu` goes last so it can list the
//! commands registered before it.

pub mod jid;
pub mod menu;
pub mod ping;
pub mod uptime;

use std::time::Instant;

use once_cell::sync::Lazy;

use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::Dispatcher;
use crate::domain::entities::CommandRegistry;
use crate::infrastructure::config::Config;
use crate::infrastructure::lang;

static STARTED: Lazy<Instant> = Lazy::new(Instant::now);

/// Record process start for `uptime`
pub fn mark_started() {
    Lazy::force(&STARTED);
}

pub fn started_at() -> Instant {
    *STARTED
}

pub fn register_all(registry: &mut CommandRegistry, prefix: &str) -> Result<(), CommandError> {
    ping::register(registry)?;
    uptime::register(registry)?;
    jid::register(registry)?;
    menu::register(registry, prefix)?;
    tracing::info!("Registered {} built-in commands", registry.len());
    Ok(())
}

/// Install the string table and build a dispatcher over the built-ins
pub fn dispatcher(config: Config) -> Result<Dispatcher, BotError> {
    lang::init(config.lang.path.as_deref());

    let mut registry = CommandRegistry::new();
    register_all(&mut registry, &config.bot.prefix)?;
    Ok(Dispatcher::new(registry, config))
}
