//! User-facing string table
//!
//! Strings live in a flat JSON object (`{"KEY": "text"}`). The English table is
//! compiled in; a config-provided file replaces it at startup.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::OnceCell;

use crate::application::errors::ConfigError;

const EMBEDDED_EN: &str = include_str!("en.json");

static LANG: OnceCell<Lang> = OnceCell::new();

#[derive(Debug, Clone, Default)]
pub struct Lang {
    strings: HashMap<String, String>,
}

impl Lang {
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let strings: HashMap<String, String> = serde_json::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse language file: {}", e)))?;
        Ok(Self { strings })
    }

    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_EN).unwrap_or_default()
    }

    /// Load a table from disk, falling back to the embedded one
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read {}: {}", path.display(), e)))
            .and_then(|content| Self::parse(&content));

        match loaded {
            Ok(lang) => {
                tracing::info!("Loaded {} strings from {}", lang.len(), path.display());
                lang
            }
            Err(e) => {
                tracing::error!("Error reading language file: {}", e);
                Self::embedded()
            }
        }
    }

    /// Missing and empty entries both read as `None`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings
            .get(key)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Like `get`, but yields an empty string for missing keys
    pub fn text(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Fill the first `{}` placeholder
    pub fn format(&self, key: &str, value: &str) -> String {
        self.text(key).replacen("{}", value, 1)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Install the global table. Only the first call has an effect.
pub fn init(path: Option<&Path>) -> &'static Lang {
    LANG.get_or_init(|| match path {
        Some(p) => Lang::load(p),
        None => Lang::embedded(),
    })
}

/// The global table (embedded English unless `init` ran first)
pub fn lang() -> &'static Lang {
    init(None)
}
