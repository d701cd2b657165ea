use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{UsineError, UsineResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationSetting {
    #[default]
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSizeSetting {
    #[default]
    A4,
    Letter,
}

/// `[export]` table of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default)]
    pub orientation: Option<OrientationSetting>,
    #[serde(default)]
    pub page_size: Option<PageSizeSetting>,
    #[serde(default)]
    pub max_cell_lines: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub export: ExportSettings,
}

impl AppConfig {
    pub const DEFAULT_MAX_CELL_LINES: usize = 4;

    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/usine/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("usine/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("usine\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = Self::from_toml(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Reads an explicit config file. Unlike [`AppConfig::load`], a missing
    /// or malformed file is an error.
    pub fn load_from(path: &Path) -> UsineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| {
            UsineError::Validation(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn effective_output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn effective_orientation(&self) -> OrientationSetting {
        self.export.orientation.unwrap_or_default()
    }

    pub fn effective_page_size(&self) -> PageSizeSetting {
        self.export.page_size.unwrap_or_default()
    }

    /// Zero is treated as unset so a cell always shows at least one line.
    pub fn effective_max_cell_lines(&self) -> usize {
        self.export
            .max_cell_lines
            .filter(|lines| *lines > 0)
            .unwrap_or(Self::DEFAULT_MAX_CELL_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.effective_output_dir(), PathBuf::from("."));
        assert_eq!(config.effective_orientation(), OrientationSetting::Portrait);
        assert_eq!(config.effective_page_size(), PageSizeSetting::A4);
        assert_eq!(config.effective_max_cell_lines(), 4);
    }

    #[test]
    fn test_export_table_parsed() {
        let config = AppConfig::from_toml(
            r#"
            [export]
            output_dir = "/tmp/rapports"
            author = "Direction HSE"
            orientation = "landscape"
            page_size = "letter"
            max_cell_lines = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.effective_output_dir(), PathBuf::from("/tmp/rapports"));
        assert_eq!(config.export.author.as_deref(), Some("Direction HSE"));
        assert_eq!(config.effective_orientation(), OrientationSetting::Landscape);
        assert_eq!(config.effective_page_size(), PageSizeSetting::Letter);
        assert_eq!(config.effective_max_cell_lines(), 2);
    }

    #[test]
    fn test_zero_max_lines_falls_back() {
        let config = AppConfig::from_toml("[export]\nmax_cell_lines = 0\n").unwrap();
        assert_eq!(config.effective_max_cell_lines(), 4);
    }

    #[test]
    fn test_load_from_reports_problems() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(AppConfig::load_from(&path), Err(UsineError::Io(_))));

        std::fs::write(&path, "[export]\nmax_cell_lines = \"beaucoup\"\n").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(UsineError::Validation(_))));

        std::fs::write(&path, "[export]\nfooter_text = \"Confidentiel\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.export.footer_text.as_deref(), Some("Confidentiel"));
    }
}
