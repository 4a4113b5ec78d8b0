/// Application configuration.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::quadrant::DEFAULT_DAYS_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Days-from-today boundary the matrix starts with.
    #[serde(default = "default_days_threshold")]
    pub days_threshold: u32,
    /// Override for the task data file. Defaults to tasks.json in the data
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_days_threshold() -> u32 {
    DEFAULT_DAYS_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            days_threshold: DEFAULT_DAYS_THRESHOLD,
            data_file: None,
        }
    }
}

/// Get the data directory.
/// All platforms: ~/.eisenban
pub fn get_data_dir() -> PathBuf {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .expect("Failed to get home directory");
    PathBuf::from(home_dir).join(".eisenban")
}

/// Config file path (~/.eisenban/config.toml).
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Log file path (~/.eisenban/eisenban.log).
pub fn get_log_path() -> PathBuf {
    get_data_dir().join("eisenban.log")
}

/// Task data file path, honoring the config override.
pub fn data_file_path(config: &Config) -> PathBuf {
    config
        .data_file
        .clone()
        .unwrap_or_else(|| get_data_dir().join("tasks.json"))
}

/// Load the configuration, falling back to defaults when no file exists.
pub fn load_config() -> Result<Config> {
    let config_path = get_config_path();

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;

    Ok(config)
}

/// Save the configuration.
pub fn save_config(config: &Config) -> Result<()> {
    let config_path = get_config_path();

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(config_path, content)?;

    Ok(())
}

/// Update the default urgency threshold.
pub fn set_days_threshold(days: u32) -> Result<()> {
    let mut config = load_config()?;
    config.days_threshold = days;
    save_config(&config)?;
    println!("✓ Urgency threshold set to {} day(s)", config.days_threshold);
    Ok(())
}

/// Show the current configuration.
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("Current configuration:");
    println!("  urgency threshold: {} day(s)", config.days_threshold);
    println!("  task file:         {}", data_file_path(&config).display());
    println!();
    println!("Config file: {}", get_config_path().display());
    Ok(())
}
