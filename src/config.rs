// Tool configuration
// Read from config.toml; every key is optional

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::allocation::{AllocationError, Category, CategoryRange, RangePolicy};
use crate::presets;
use crate::state::storage::{self, StorageError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Invalid {category} range: {source}")]
    Range {
        category: Category,
        source: AllocationError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one folder per project
    pub project_root: PathBuf,

    /// Store location relative to a project folder
    pub database_file: PathBuf,

    /// Only project folders containing one of these are listed
    pub project_prefixes: Vec<String>,

    pub character: CategoryRange,
    pub prop: CategoryRange,
}

impl Default for Config {
    fn default() -> Self {
        let policy = RangePolicy::default();
        Config {
            project_root: storage::default_project_root(),
            database_file: PathBuf::from(".local").join("vrayMatteID.db"),
            project_prefixes: vec!["Lego_".to_string(), "TVC_".to_string()],
            character: policy.character,
            prop: policy.prop,
        }
    }
}

impl Config {
    /// Load `path`, or the default config location when `path` is `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => storage::default_config_path()?,
        };

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        log::debug!("Loading config {}", path.display());
        let text = fs::read_to_string(&path)?;
        Config::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in [Category::Character, Category::Prop] {
            self.range(category)
                .validate()
                .map_err(|source| ConfigError::Range { category, source })?;
        }

        if !presets::offsets_fit_step(&presets::preset_table(Category::Character), self.character.step) {
            log::warn!(
                "Character presets do not fit a step of {}; matte IDs may spill into the next object",
                self.character.step
            );
        }

        Ok(())
    }

    pub fn range(&self, category: Category) -> &CategoryRange {
        match category {
            Category::Character => &self.character,
            Category::Prop => &self.prop,
        }
    }

    pub fn policy(&self) -> RangePolicy {
        RangePolicy {
            character: self.character,
            prop: self.prop,
        }
    }

    pub fn database_path(&self, project: &str) -> PathBuf {
        storage::database_path(&self.project_root, project, &self.database_file)
    }
}
