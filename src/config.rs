use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::GameMode;
use crate::vocab::Difficulty;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_difficulty")]
    pub default_difficulty: String,
    #[serde(default = "default_mode")]
    pub default_mode: String,
}

fn default_difficulty() -> String {
    "easy".to_string()
}
fn default_mode() -> String {
    "spelling".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_difficulty: default_difficulty(),
            default_mode: default_mode(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spellwell")
            .join("config.toml")
    }

    /// Reset unrecognized values to defaults. Call after deserialization to
    /// handle stale keys from old or hand-edited configs.
    pub fn normalize(&mut self) {
        if Difficulty::parse(&self.default_difficulty).is_none() {
            self.default_difficulty = default_difficulty();
        }
        if GameMode::parse(&self.default_mode).is_none() {
            self.default_mode = default_mode();
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::parse(&self.default_difficulty).unwrap_or(Difficulty::Easy)
    }

    pub fn mode(&self) -> GameMode {
        GameMode::parse(&self.default_mode).unwrap_or(GameMode::Spelling)
    }
}
