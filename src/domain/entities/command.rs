use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use regex_lite::Regex;

use crate::application::errors::{BotError, CommandError};
use crate::application::message::Message;

/// Boxed future returned by command handlers
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<(), BotError>> + Send>>;

/// Command handler: receives the wrapped message and the argument text, if any
pub type CommandHandler = Arc<dyn Fn(Message, Option<String>) -> HandlerFuture + Send + Sync>;

/// Registration input. Flags default to `false`.
#[derive(Debug, Clone, Default)]
pub struct CommandInput {
    pub pattern: String,
    pub public: bool,
    pub is_group: bool,
    pub dont_add_command_list: bool,
}

impl CommandInput {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn group_only(mut self, is_group: bool) -> Self {
        self.is_group = is_group;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.dont_add_command_list = hidden;
        self
    }
}

/// A registered bot command
pub struct Command {
    pub name: String,
    pub pattern: Regex,
    pub handler: CommandHandler,
    pub public: bool,
    pub is_group: bool,
    pub dont_add_command_list: bool,
}

impl Command {
    pub fn new<F, Fut>(input: CommandInput, handler: F) -> Result<Self, CommandError>
    where
        F: Fn(Message, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BotError>> + Send + 'static,
    {
        let pattern = compile_pattern(&input.pattern)?;
        let handler: CommandHandler =
            Arc::new(move |msg: Message, arg: Option<String>| -> HandlerFuture { Box::pin(handler(msg, arg)) });

        Ok(Self {
            name: display_name(&input.pattern),
            pattern,
            handler,
            public: input.public,
            is_group: input.is_group,
            dont_add_command_list: input.dont_add_command_list,
        })
    }

    /// Match text against the command. Returns the argument text on success.
    pub fn matches(&self, text: &str) -> Option<Option<String>> {
        let caps = self.pattern.captures(text)?;
        Some(caps.get(2).map(|m| m.as_str().to_string()))
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("public", &self.public)
            .field("is_group", &self.is_group)
            .field("dont_add_command_list", &self.dont_add_command_list)
            .finish()
    }
}

/// `^\s*(<pattern>)(?:\s+([\s\S]+))?$`, case-insensitive
pub fn compile_pattern(pattern: &str) -> Result<Regex, CommandError> {
    let source = format!(r"(?i)^\s*({})(?:\s+([\s\S]+))?$", pattern);
    Regex::new(&source).map_err(|e| CommandError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn display_name(pattern: &str) -> String {
    let first = pattern.split('|').next().unwrap_or(pattern);
    let name: String = first.chars().filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_').collect();
    if name.is_empty() {
        pattern.to_string()
    } else {
        name.to_lowercase()
    }
}

/// Ordered command table; the first matching entry wins
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(&mut self, input: CommandInput, handler: F) -> Result<&Command, CommandError>
    where
        F: Fn(Message, Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BotError>> + Send + 'static,
    {
        let command = Command::new(input, handler)?;
        tracing::debug!("Registered command: {}", command.name);
        self.commands.push(command);
        Ok(&self.commands[self.commands.len() - 1])
    }

    pub fn find(&self, text: &str) -> Option<(&Command, Option<String>)> {
        self.commands
            .iter()
            .find_map(|cmd| cmd.matches(text).map(|arg| (cmd, arg)))
    }

    /// Commands shown in menus
    pub fn listed(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(|c| !c.dont_add_command_list)
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop(_msg: Message, _arg: Option<String>) -> Result<(), BotError> {
        Ok(())
    }

    #[test]
    fn matches_case_insensitive_with_argument() {
        let cmd = Command::new(CommandInput::new("ping"), noop).unwrap();
        assert_eq!(cmd.matches("ping"), Some(None));
        assert_eq!(cmd.matches("  PING  hello world"), Some(Some("hello world".to_string())));
        assert_eq!(cmd.matches("pingx"), None);
    }

    #[test]
    fn argument_spans_lines() {
        let cmd = Command::new(CommandInput::new("echo"), noop).unwrap();
        assert_eq!(cmd.matches("echo a\nb"), Some(Some("a\nb".to_string())));
    }

    #[test]
    fn alternation_patterns() {
        let cmd = Command::new(CommandInput::new("menu|help"), noop).unwrap();
        assert_eq!(cmd.name, "menu");
        assert!(cmd.matches("help").is_some());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = Command::new(CommandInput::new("("), noop).unwrap_err();
        assert!(matches!(err, CommandError::InvalidPattern { .. }));
    }

    #[test]
    fn first_registered_wins_and_hidden_are_unlisted() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandInput::new("p.*").hidden(true), noop).unwrap();
        registry.register(CommandInput::new("ping"), noop).unwrap();

        let (cmd, _) = registry.find("ping").unwrap();
        assert_eq!(cmd.pattern.as_str(), r"(?i)^\s*(p.*)(?:\s+([\s\S]+))?$");
        assert_eq!(registry.listed().count(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn defaults_are_false() {
        let cmd = Command::new(CommandInput::new("x"), noop).unwrap();
        assert!(!cmd.public && !cmd.is_group && !cmd.dont_add_command_list);
    }
}
