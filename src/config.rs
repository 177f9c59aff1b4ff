use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default bound on stored history entries
pub const MAX_HISTORY_SIZE: usize = 50;

/// History commands an editor can bind to keys or toolbar buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryCommand {
    Undo,
    Redo,
}

/// A single key chord such as `ctrl+shift+z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shortcut {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub key: char,
}

impl Shortcut {
    pub fn key(key: char) -> Self {
        Self { key: key.to_ascii_lowercase(), ..Default::default() }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

impl FromStr for Shortcut {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut shortcut = Shortcut::default();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => shortcut.ctrl = true,
                "shift" => shortcut.shift = true,
                "alt" | "option" => shortcut.alt = true,
                "meta" | "cmd" | "super" => shortcut.meta = true,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return Err(ConfigError::Shortcut(s.to_string())),
                    }
                }
            }
        }

        shortcut.key = key.ok_or_else(|| ConfigError::Shortcut(s.to_string()))?;
        Ok(shortcut)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.meta {
            write!(f, "meta+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Shortcut strings as they appear in the config file
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShortcutConfig {
    #[serde(default = "default_undo_keys")]
    pub undo: Vec<String>,
    #[serde(default = "default_redo_keys")]
    pub redo: Vec<String>,
}

fn default_undo_keys() -> Vec<String> {
    vec!["ctrl+z".to_string(), "meta+z".to_string()]
}

fn default_redo_keys() -> Vec<String> {
    vec![
        "ctrl+shift+z".to_string(),
        "ctrl+y".to_string(),
        "meta+shift+z".to_string(),
    ]
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            undo: default_undo_keys(),
            redo: default_redo_keys(),
        }
    }
}

fn default_max_history_size() -> usize {
    MAX_HISTORY_SIZE
}

/// History settings, loadable from TOML:
///
/// ```toml
/// max_history_size = 100
///
/// [shortcuts]
/// undo = ["ctrl+z"]
/// redo = ["ctrl+shift+z", "ctrl+y"]
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,
    #[serde(default)]
    pub shortcuts: ShortcutConfig,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_size: MAX_HISTORY_SIZE,
            shortcuts: ShortcutConfig::default(),
        }
    }
}

impl HistoryConfig {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HistoryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_size == 0 {
            return Err(ConfigError::Invalid(
                "max_history_size must be at least 1".to_string(),
            ));
        }
        self.shortcut_table().map(|_| ())
    }

    /// Build the lookup table the editor dispatches key chords through
    pub fn shortcut_table(&self) -> Result<ShortcutTable, ConfigError> {
        let mut bindings = HashMap::new();
        for key in &self.shortcuts.undo {
            bindings.insert(key.parse()?, HistoryCommand::Undo);
        }
        for key in &self.shortcuts.redo {
            let shortcut: Shortcut = key.parse()?;
            if bindings.insert(shortcut, HistoryCommand::Redo).is_some() {
                return Err(ConfigError::Shortcut(format!(
                    "{} is bound to both undo and redo",
                    key
                )));
            }
        }
        Ok(ShortcutTable::new(bindings))
    }
}

/// Maps key chords to history commands
#[derive(Debug, Clone)]
pub struct ShortcutTable {
    bindings: HashMap<Shortcut, HistoryCommand>,
}

impl ShortcutTable {
    pub fn new(bindings: HashMap<Shortcut, HistoryCommand>) -> Self {
        Self { bindings }
    }

    pub fn get(&self, shortcut: &Shortcut) -> Option<HistoryCommand> {
        self.bindings.get(shortcut).copied()
    }

    pub fn bind(&mut self, shortcut: Shortcut, command: HistoryCommand) {
        self.bindings.insert(shortcut, command);
    }
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self {
            bindings: HashMap::from([
                (Shortcut::key('z').with_ctrl(), HistoryCommand::Undo),
                (Shortcut::key('z').with_meta(), HistoryCommand::Undo),
                (Shortcut::key('z').with_ctrl().with_shift(), HistoryCommand::Redo),
                (Shortcut::key('y').with_ctrl(), HistoryCommand::Redo),
                (Shortcut::key('z').with_meta().with_shift(), HistoryCommand::Redo),
            ]),
        }
    }
}
