//! Persisted user options consumed by the theme providers.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

/// Option key holding the chat view theme identifier.
pub const OPTION_CHATVIEW_THEME: &str = "options.ui.chat.theme";

/// Option key holding the group chat view theme identifier.
pub const OPTION_GROUPCHATVIEW_THEME: &str = "options.ui.muc.theme";

/// Narrow settings-store surface the providers read and write.
pub trait OptionsStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Flat string options persisted as a JSON object, written through on every
/// `set`.
pub struct JsonFileOptions {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileOptions {
    /// Open the options file, starting empty when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("invalid options file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read options file {}", path.display()))
            }
        };
        Ok(Self { path, values })
    }

    fn save(&self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize options");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), error = %e, "failed to persist options");
        }
    }
}

impl OptionsStore for JsonFileOptions {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
        self.save();
    }
}

/// In-memory store for tests and embedders with their own persistence.
#[derive(Debug, Default)]
pub struct MemoryOptions {
    values: HashMap<String, String>,
}

impl MemoryOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionsStore for MemoryOptions {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}
