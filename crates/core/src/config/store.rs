//! JSON-backed settings: built-in defaults, then the global file, then the
//! nearest `.ccrun.json` above the source file.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Settings, SettingsLayer};
use crate::{
    error::{Error, Result},
    interfaces::ConfigStore,
    types::Language,
};

pub const LOCAL_CONFIG_FILE: &str = ".ccrun.json";
pub const GLOBAL_CONFIG_FILE: &str = "settings.json";

#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    global_path: Option<PathBuf>,
}

impl Default for JsonConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonConfigStore {
    /// Store rooted at the platform config directory, e.g.
    /// `~/.config/ccrun/settings.json`
    pub fn new() -> Self {
        Self {
            global_path: dirs::config_dir().map(|dir| dir.join("ccrun").join(GLOBAL_CONFIG_FILE)),
        }
    }

    pub fn with_global_path(path: impl Into<PathBuf>) -> Self {
        Self {
            global_path: Some(path.into()),
        }
    }

    pub fn global_path(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Walk up from `start_path` looking for a local config file
    pub fn find_local_config(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(LOCAL_CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Files that contribute to the settings for `start_dir`, lowest
    /// precedence first
    pub fn sources(&self, start_dir: &Path) -> Vec<PathBuf> {
        let mut sources = Vec::new();
        if let Some(global) = self.global_path.as_ref().filter(|p| p.is_file()) {
            sources.push(global.clone());
        }
        if let Some(local) = Self::find_local_config(start_dir) {
            if Some(&local) != sources.first() {
                sources.push(local);
            }
        }
        sources
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self, start_dir: &Path) -> Result<Settings> {
        let mut settings = Settings::default();
        for source in self.sources(start_dir) {
            debug!("Loading settings from {}", source.display());
            settings.merge(SettingsLayer::load_from_file(&source)?);
        }
        Ok(settings)
    }

    fn persist_compiler_path(&self, language: Language, path: &str) -> Result<()> {
        let global = self.global_path.as_ref().ok_or_else(|| {
            Error::ConfigError("No global configuration directory available".to_string())
        })?;

        // Keep whatever else is in the file
        let mut document = if global.is_file() {
            serde_json::from_str::<serde_json::Value>(&std::fs::read_to_string(global)?)?
        } else {
            serde_json::json!({})
        };
        let object = document.as_object_mut().ok_or_else(|| {
            Error::ConfigError(format!("{} is not a JSON object", global.display()))
        })?;
        object.insert(
            language.compiler_key().to_string(),
            serde_json::Value::String(path.to_string()),
        );

        if let Some(parent) = global.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(global, serde_json::to_string_pretty(&document)?)?;
        debug!("Saved {} = {} to {}", language.compiler_key(), path, global.display());
        Ok(())
    }
}
