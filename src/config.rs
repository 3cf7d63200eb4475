use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::HuntError;
use crate::position::DEFAULT_MOVE_STEP;
use crate::proximity::DEFAULT_PROXIMITY_THRESHOLD;
use crate::session::DEFAULT_SESSION_SIZE;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Stations drawn for each visit
    pub session_size: usize,
    /// Distance under which a station is nearby
    pub proximity_threshold: f32,
    /// Distance moved by one manual nudge
    pub move_step: f32,
    /// Directory of the hunt store; the data directory when unset
    pub store_path: Option<PathBuf>,
    /// JSON station catalog; the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_size: DEFAULT_SESSION_SIZE,
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            move_step: DEFAULT_MOVE_STEP,
            store_path: None,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Result<PathBuf, HuntError> {
        Ok(dirs::config_dir()
            .ok_or(HuntError::NoConfigDir)?
            .join("roots_hunt")
            .join(CONFIG_FILE_NAME))
    }

    /// Config from the user's config directory, `None` when absent or unreadable
    pub fn from_local_file() -> Option<Self> {
        let config_path = Self::config_path().ok()?;
        Self::from_path(&config_path)
    }

    pub fn from_path(config_path: &Path) -> Option<Self> {
        if !config_path.exists() {
            debug!("No config file at {:?}", config_path);
            return None;
        }

        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not open config file {:?}: {}", config_path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Could not parse config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    pub fn save(&self) -> Result<(), HuntError> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), HuntError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| HuntError::ConfigIOError { source: e })?;
        }

        let file =
            fs::File::create(config_path).map_err(|e| HuntError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| HuntError::ConfigSerializeError { source: e })
    }
}
