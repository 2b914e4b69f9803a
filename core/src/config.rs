//! Configuration: `~/.sage/config.toml` wins, then `./config.toml`, then
//! built-in defaults. Every section and field is optional in the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model passed to the runner when `--model` is not given.
    #[serde(default = "default_model")]
    pub default: String,
}

fn default_model() -> String {
    "llama3.2:1b".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Model-runner executable, resolved against PATH.
    #[serde(default = "default_program")]
    pub program: String,
}

fn default_program() -> String {
    "ollama".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// Directive for the tracing filter when RUST_LOG is unset.
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default = "default_logging_console")]
    pub console: bool,

    #[serde(default)]
    pub file: bool,

    /// Log directory when file logging is on; defaults to the system temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

fn default_logging_console() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            level: default_logging_level(),
            console: default_logging_console(),
            file: false,
            directory: None,
        }
    }
}

/// The sage data directory: `~/.sage`.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".sage"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.sage/config.toml (highest)
    let home_config = data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let cfg: AppConfig = if home_config.exists() {
        let s = std::fs::read_to_string(&home_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_usable_without_a_file() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.model.default, "llama3.2:1b");
        assert_eq!(cfg.runner.program, "ollama");
        assert!(cfg.logging.enabled);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [model]
            default = "codellama:7b"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.model.default, "codellama:7b");
        assert_eq!(cfg.runner.program, "ollama");
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.console);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.model.default, AppConfig::default().model.default);
    }
}
