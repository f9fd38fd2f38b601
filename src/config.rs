use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::FwctlError;
use crate::hostlist::PrintConfig;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
}

/// Defaults for `fwctl query` and `fwctl update`; command-line flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    /// Print one block per host instead of grouping hosts by result.
    #[serde(default)]
    pub verbose: bool,
    /// Keep `:port` suffixes in host strings.
    #[serde(default)]
    pub show_host_ports: bool,
}

impl ReportConfig {
    pub fn print_config(&self) -> PrintConfig {
        PrintConfig {
            show_host_ports: self.show_host_ports,
        }
    }
}

/// Returns the config directory: ~/.config/fwctl/ on Linux, %APPDATA%\fwctl\ on Windows.
/// Override with FWCTL_CONFIG_DIR env var (used by test harness).
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FWCTL_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let proj = directories::ProjectDirs::from("", "", "fwctl")
        .context("could not determine config directory")?;
    Ok(proj.config_dir().to_path_buf())
}

/// Returns the full path to config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the user's config, falling back to defaults when there is no file.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Parse the `[report]` defaults from `path`. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

/// Write a default config file. Refuses to overwrite an existing one unless `force`.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = config_path()?;
    init_config_at(&path, force)?;
    Ok(path)
}

/// Write `Config::default()` to `path`, creating parent directories.
pub fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(FwctlError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let contents =
        toml::to_string_pretty(&Config::default()).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_roundtrip() {
        let config = Config {
            report: ReportConfig {
                verbose: true,
                show_host_ports: false,
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert!(deserialized.report.verbose);
        assert!(!deserialized.report.show_host_ports);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_partial_report_table() {
        let toml_str = r#"
[report]
show_host_ports = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.report.verbose);
        assert!(config.report.show_host_ports);
        assert!(config.report.print_config().show_host_ports);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_init_creates_dirs_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config_at(&path, false).unwrap();
        assert_eq!(
            load_config_from(&path).unwrap().report,
            ReportConfig::default()
        );

        std::fs::write(&path, "[report]\nverbose = true\n").unwrap();
        let err = init_config_at(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(load_config_from(&path).unwrap().report.verbose);

        init_config_at(&path, true).unwrap();
        assert!(!load_config_from(&path).unwrap().report.verbose);
    }

    #[test]
    fn test_unknown_type_is_error() {
        let toml_str = r#"
[report]
verbose = "yes"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }
}
