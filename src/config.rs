//! Configuration handling for the survey

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the survey
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurveyConfig {
    /// Show the progress bar in the header
    pub show_progress: Option<bool>,
    /// Show the character counter under the comments field
    pub show_character_counter: Option<bool>,
    /// Field focused on start
    pub initial_focus: Option<String>,
}

impl SurveyConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "survey", "survey-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: SurveyConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn show_progress(&self) -> bool {
        self.show_progress.unwrap_or(true)
    }

    pub fn show_character_counter(&self) -> bool {
        self.show_character_counter.unwrap_or(true)
    }

    pub fn initial_focus(&self) -> &str {
        self.initial_focus.as_deref().unwrap_or("name")
    }
}
