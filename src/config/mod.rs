use crate::models::LintConfig;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Default settings file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "lintgate.yaml";

/// Configuration manager for loading and saving the YAML settings file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the given settings file.
    ///
    /// The file does not need to exist; [`load`](Self::load) falls back to defaults.
    pub fn new<P: AsRef<Utf8Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded LintConfig, or default if file doesn't exist
    pub fn load(&self) -> Result<LintConfig> {
        if !self.config_path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
            return Ok(LintConfig::default());
        }

        let file_contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: LintConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the settings file, replacing any existing content.
    pub fn save(&self, config: &LintConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create config directory: {}", parent))?;
            }
        }

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Write a default settings file. Refuses to overwrite an existing one.
    pub fn init_default(&self) -> Result<LintConfig> {
        if self.config_path.exists() {
            bail!("Config file already exists: {}", self.config_path);
        }

        let config = LintConfig::default();
        self.save(&config)?;
        Ok(config)
    }

    /// Get the settings file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
