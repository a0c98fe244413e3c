//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::application::errors::ConfigError;
use crate::domain::entities::jid;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub sudo: Vec<String>,
    #[serde(default)]
    pub lang: LangConfig,
    #[serde(default)]
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    #[serde(default)]
    pub mode: Mode,
}

/// Who may run commands that are not marked public
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Public,
    #[default]
    Private,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Public => "public",
            Mode::Private => "private",
        }
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Mode::Public),
            "private" => Ok(Mode::Private),
            other => Err(ConfigError::InvalidValue(format!("unknown mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LangConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
    pub jid: String,
    /// Treat the console user as a sudo number
    #[serde(default = "default_console_sudo")]
    pub sudo: bool,
}

fn default_console_sudo() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jid: "0@s.whatsapp.net".to_string(),
            sudo: default_console_sudo(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "wabot".to_string(),
                prefix: ".".to_string(),
                mode: Mode::Private,
            },
            sudo: Vec::new(),
            lang: LangConfig::default(),
            adapters: AdaptersConfig {
                console: Some(ConsoleConfig::default()),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Defaults overridden by `BOT_PREFIX`, `BOT_MODE` and `SUDO` (comma separated)
    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(prefix) = std::env::var("BOT_PREFIX") {
            config.bot.prefix = prefix;
        }

        if let Ok(mode) = std::env::var("BOT_MODE") {
            config.bot.mode = mode.parse()?;
        }

        if let Ok(sudo) = std::env::var("SUDO") {
            config.sudo = sudo
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    /// Check if a sender JID belongs to a sudo number
    pub fn is_sudo(&self, sender: &str) -> bool {
        let Ok(sender) = jid::to_jid(sender) else {
            return false;
        };
        self.sudo
            .iter()
            .filter_map(|n| jid::to_jid(n).ok())
            .any(|n| n == sender)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
