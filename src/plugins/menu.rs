use std::sync::Arc;

use crate::application::errors::{BotError, CommandError};
use crate::application::message::Message;
use crate::domain::entities::{CommandInput, CommandRegistry};
use crate::infrastructure::lang::lang;

/// Register `menu`; lists every listed command registered so far, plus itself
pub fn register(registry: &mut CommandRegistry, prefix: &str) -> Result<(), CommandError> {
    let mut names: Vec<String> = registry.listed().map(|c| c.name.clone()).collect();
    names.push("menu".to_string());
    names.sort();

    let listing: Arc<str> = Arc::from(render(prefix, &names));
    registry.register(CommandInput::new("menu|help|list").public(true), move |message: Message, _arg| {
        let listing = listing.clone();
        async move { send_menu(message, &listing).await }
    })?;
    Ok(())
}

pub fn render(prefix: &str, names: &[String]) -> String {
    let mut text = format!("{}\n", lang().text("MENU_HEADER"));
    for name in names {
        text.push_str(&format!("{}{}\n", prefix, name));
    }
    text
}

async fn send_menu(message: Message, listing: &str) -> Result<(), BotError> {
    message.reply(listing).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{ping, uptime};

    #[test]
    fn lists_only_listed_commands() {
        let mut registry = CommandRegistry::new();
        ping::register(&mut registry).unwrap();
        uptime::register(&mut registry).unwrap();
        register(&mut registry, ".").unwrap();

        let names: Vec<String> = registry.listed().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["uptime".to_string(), "menu".to_string()]);

        let text = render(".", &["menu".to_string(), "uptime".to_string()]);
        assert!(text.contains(".menu\n.uptime"));
        assert!(!text.contains("ping"));
    }

    #[test]
    fn menu_answers_to_aliases() {
        let mut registry = CommandRegistry::new();
        register(&mut registry, "!").unwrap();
        assert!(registry.find("HELP").is_some());
        assert!(registry.find("list").is_some());
    }
}
