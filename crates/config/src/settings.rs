// User settings (settings.json)

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use gridedit_engine::editor::EditorOptions;
use gridedit_engine::history::DEFAULT_MAX_ENTRIES;
use gridedit_engine::view::ValueKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Grid shape
    #[serde(rename = "grid.minRows")]
    pub min_rows: usize,

    #[serde(rename = "grid.minColumns")]
    pub min_columns: usize,

    // History
    #[serde(rename = "history.maxEntries")]
    pub max_history_entries: usize,

    // Sorting
    #[serde(rename = "sort.valueKind")]
    pub sort_value_kind: ValueKind,

    // File
    #[serde(rename = "file.defaultName")]
    pub default_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_rows: 20,
            min_columns: 10,
            max_history_entries: DEFAULT_MAX_ENTRIES,
            sort_value_kind: ValueKind::Text,
            default_file_name: "default".to_string(),
        }
    }
}

/// Template written by `write_default_file`
const DEFAULT_FILE: &str = r#"{
    // Grid shape on new, refresh and import
    "grid.minRows": 20,
    "grid.minColumns": 10,

    // Undo steps kept (oldest dropped first)
    "history.maxEntries": 100,

    // Header-click sorting: "number", "date" or "text"
    "sort.valueKind": "text",

    // Name used when saving without one
    "file.defaultName": "default"
}
"#;

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridedit");
        config_dir.join("settings.json")
    }

    /// Load settings from the user config dir, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file means defaults; an
    /// unreadable or invalid one logs a warning and also means defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, ignoring `//` comment lines.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Save current settings to the user config dir
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    /// Save current settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Write the commented default template to `path`
    pub fn write_default_file(path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        fs::write(path, DEFAULT_FILE).map_err(|e| e.to_string())
    }

    /// Options for a new editor
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            min_rows: self.min_rows,
            min_cols: self.min_columns,
            history_limit: self.max_history_entries,
            sort_value_kind: self.sort_value_kind,
        }
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
