//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("{0}")]
    Media(String),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

impl From<reqwest::Error> for BotError {
    fn from(e: reqwest::Error) -> Self {
        BotError::Network(e.to_string())
    }
}

/// Command registration errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_errors_render_bare_message() {
        let err = BotError::Media("Message must be a media message".to_string());
        assert_eq!(err.to_string(), "Message must be a media message");
    }

    #[test]
    fn command_errors_convert_into_bot_errors() {
        let err: BotError = CommandError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Command error: Invalid pattern '(': unclosed group");
    }

    #[test]
    fn config_errors_convert_into_bot_errors() {
        let err: BotError = ConfigError::InvalidValue("unknown mode 'open'".to_string()).into();
        assert!(matches!(err, BotError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: Invalid value: unknown mode 'open'");
    }
}
