//! User configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{DocumentFamily, ParseOptions, ReadOptions};

/// User configuration stored at `<config_dir>/section-parse/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ParserConfig {
    /// Family used when neither the command line nor the document type picks one.
    pub default_family: Option<DocumentFamily>,
    /// Read column-major tables in their logical order.
    pub fix_table_order: bool,
    /// Prefix Word auto-numbered paragraphs with their list markers.
    pub restore_list_numbers: bool,
    /// Extra running-header/footer regexes. Invalid ones are ignored.
    pub extra_noise_patterns: Vec<String>,
}

impl ParserConfig {
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::get_config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(ParserConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        if let Some(config_path) = Self::get_config_path() {
            self.save_to(&config_path)?;
        }

        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }

    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("section-parse").join("config.toml"))
    }

    pub fn init_default() -> Result<()> {
        let config = ParserConfig::default();
        config.save()?;
        Ok(())
    }

    /// Parse options for one run; `family` is an explicit override.
    pub fn parse_options(&self, family: Option<DocumentFamily>) -> ParseOptions {
        ParseOptions {
            family,
            default_family: self.default_family,
            read: ReadOptions {
                should_fix_order: self.fix_table_order,
                restore_list_numbers: self.restore_list_numbers,
            },
            extra_noise_patterns: self.extra_noise_patterns.clone(),
        }
    }
}
