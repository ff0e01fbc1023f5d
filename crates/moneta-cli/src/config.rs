//! CLI configuration
//!
//! Loaded from `~/.config/moneta/config.toml` (or a `--config` override).
//! A missing file is not an error; every section has defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Agent backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Backend endpoint; when unset the shell runs with agents offline
    pub endpoint: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: default_model(),
        }
    }
}

/// Appearance defaults for interactive menus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_border")]
    pub border: bool,
    /// Cap on visible menu rows before the list scrolls
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            border: default_border(),
            max_visible: default_max_visible(),
        }
    }
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_border() -> bool {
    true
}

fn default_max_visible() -> usize {
    8
}

impl CliConfig {
    /// Load configuration, falling back to defaults when no file exists
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path.or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("moneta").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_a_file() {
        let config = CliConfig::load(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert!(config.agent.endpoint.is_none());
        assert_eq!(config.agent.model, "llama3.1:8b");
        assert!(config.ui.border);
        assert_eq!(config.ui.max_visible, 8);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nendpoint = \"http://localhost:11434\"").unwrap();

        let config = CliConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.agent.endpoint.as_deref(),
            Some("http://localhost:11434")
        );
        assert_eq!(config.agent.model, "llama3.1:8b");
        assert_eq!(config.ui.max_visible, 8);
    }

    #[test]
    fn test_ui_section_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\nborder = false\nmax_visible = 4").unwrap();

        let config = CliConfig::load_from(file.path()).unwrap();
        assert!(!config.ui.border);
        assert_eq!(config.ui.max_visible, 4);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [[[").unwrap();

        let err = CliConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing config file"));
    }
}
