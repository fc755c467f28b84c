//! Commander configuration: loading and defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CommanderError, CommanderResult};

/// How completion suggestions are matched against the word being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Match prefixes exactly instead of ignoring case. Defaults to false.
    pub case_sensitive: bool,
}

/// Key binding flavour of the line editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    #[default]
    Emacs,
    Vi,
}

/// How the line editor presents several completion candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionType {
    /// List all candidates below the prompt.
    #[default]
    List,
    /// Cycle through candidates on each Tab press.
    Circular,
}

/// Line editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub edit_mode: EditMode,
    pub completion_type: CompletionType,
    /// In-memory history entries kept for the session. Nothing is written to disk.
    pub max_history: usize,
    /// Add every submitted non-empty line to the session history.
    pub auto_add_history: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            edit_mode: EditMode::default(),
            completion_type: CompletionType::default(),
            max_history: 100,
            auto_add_history: true,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommanderConfig {
    /// Prompt template of the root dispatcher.
    pub prompt: String,
    pub completion: CompletionConfig,
    pub editor: EditorConfig,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            prompt: ">>> ".to_string(),
            completion: CompletionConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

impl CommanderConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> CommanderResult<Self> {
        toml::from_str(content).map_err(|e| CommanderError::Config(e.to_string()))
    }
}

/// Load configuration from an explicit path.
pub fn load_config_file(path: &Path) -> CommanderResult<CommanderConfig> {
    let content = std::fs::read_to_string(path)?;
    CommanderConfig::from_toml_str(&content)
}

/// Load configuration from the two-tier hierarchy.
///
/// 1. `{working_dir}/.commander/config.toml` (project-local)
/// 2. `~/.config/commander/config.toml` (user-global)
///
/// The first file that parses wins. Without one, defaults are used.
pub fn load_config(working_dir: &Path) -> CommanderConfig {
    let project_config = working_dir.join(".commander").join("config.toml");
    if let Some(config) = try_load(&project_config) {
        return config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("commander").join("config.toml");
        if let Some(config) = try_load(&user_config) {
            return config;
        }
    }

    CommanderConfig::default()
}

fn try_load(path: &Path) -> Option<CommanderConfig> {
    if !path.is_file() {
        return None;
    }
    match load_config_file(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded commander config");
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Failed to load config {}: {}", path.display(), e);
            None
        }
    }
}
