use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const CONFIG_FILE_NAME: &str = "cadence.config.toml";
pub const CONFIG_PATH_ENV: &str = "CADENCE_CONFIG_PATH";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CadenceConfig {
    pub diagnostics: DiagnosticsConfig,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub rust_log_filter: String,
    pub trace_file_prefix: String,
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    pub sampling_step: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub root_font_size: f64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            rust_log_filter: "info,cadence_core=debug".to_string(),
            trace_file_prefix: "cadence".to_string(),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            sampling_step: 0.25,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            root_font_size: 16.0,
        }
    }
}

impl CadenceConfig {
    pub fn load() -> Result<Self> {
        let config_path = discover_config_path().with_context(|| {
            format!("failed to locate {CONFIG_FILE_NAME}; looked in cwd and parent directory")
        })?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("failed to parse config TOML from {}", path.display()))
    }

    #[must_use]
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|error| {
            warn!(?error, "using default configuration");
            Self::default()
        })
    }
}

fn discover_config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Ok(path);
        }
    }

    let cwd = env::current_dir().context("failed to resolve current directory")?;
    let candidates = [
        cwd.join(CONFIG_FILE_NAME),
        cwd.join("..").join(CONFIG_FILE_NAME),
    ];

    candidates
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| anyhow::anyhow!("{CONFIG_FILE_NAME} not found"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_files_keep_defaults_for_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().expect("temp config should be created");
        writeln!(file, "[preview]\nsampling_step = 0.125").expect("config should be written");

        let config = CadenceConfig::load_from(file.path()).expect("config should parse");
        assert!((config.preview.sampling_step - 0.125).abs() < f64::EPSILON);
        assert!((config.preview.viewport_width - 1920.0).abs() < f64::EPSILON);
        assert_eq!(config.diagnostics, DiagnosticsConfig::default());
    }

    #[test]
    fn malformed_files_are_reported() {
        let mut file = tempfile::NamedTempFile::new().expect("temp config should be created");
        writeln!(file, "[preview\nsampling_step = ").expect("config should be written");
        let error = CadenceConfig::load_from(file.path()).expect_err("broken TOML");
        assert!(error.to_string().contains("failed to parse config TOML"));
    }
}
