use crate::common::types::{FaultPolicy, OutputFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub evaluator: EvaluatorConfig,
    pub output: OutputConfig,
    pub repl: ReplConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub fault_policy: FaultPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
    /// Relative to the home directory.
    pub history_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: "opcalc> ".to_string(),
            history_file: ".opcalc-history".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {:?}", path.as_ref()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path.as_ref()))?;

        log::debug!("loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load config from default locations
    pub fn load_default() -> Result<Self> {
        if Path::new("opcalc.toml").exists() {
            return Self::load("opcalc.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("opcalc").join("config.toml");
            if config_path.exists() {
                return Self::load(config_path);
            }
        }

        Ok(Self::default())
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize config")?;

        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config to {:?}", path.as_ref()))?;

        Ok(())
    }
}
