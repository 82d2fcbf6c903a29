use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::params::ParamValue;
use crate::scenes::Variant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Earth".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Viewer settings. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub variant: Variant,
    pub textures_dir: PathBuf,
    pub show_ui: bool,
    /// Initial parameter values, applied through the control panel
    pub params: BTreeMap<String, ParamValue>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            variant: Variant::Full,
            textures_dir: PathBuf::from("textures"),
            show_ui: true,
            params: BTreeMap::new(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse viewer config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Command-line flags win over file values
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if let Some(dir) = &cli.textures {
            self.textures_dir = dir.clone();
        }
        if let Some(width) = cli.width {
            self.window.width = width;
        }
        if let Some(height) = cli.height {
            self.window.height = height;
        }
        if cli.no_ui {
            self.show_ui = false;
        }
        self
    }

    /// Defaults, then the optional config file, then flags
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_cli(cli))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn partial_window_keeps_other_defaults() {
        let config = ViewerConfig::from_json(r#"{ "window": { "width": 1024 } }"#).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn bad_variant_is_an_error() {
        assert!(ViewerConfig::from_json(r#"{ "variant": "moon" }"#).is_err());
    }
}
