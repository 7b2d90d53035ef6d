mod file_config;

pub use file_config::FileConfig;

use crate::catalog::expand_home;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// CLI arguments that take part in config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub files: Vec<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub export_dir: PathBuf,
    pub history_file: Option<PathBuf>,
    pub log_level: String,
    pub preload: Vec<PathBuf>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present. Preload lists are
    /// concatenated, command line first.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let export_dir = match file
            .export_dir
            .map(|s| to_path(&s))
            .or_else(|| cli.export_dir.clone())
        {
            Some(dir) => dir,
            None => std::env::current_dir().context("Could not read the working directory")?,
        };
        if !export_dir.exists() {
            bail!("Export directory does not exist: {:?}", export_dir);
        }
        if !export_dir.is_dir() {
            bail!("export_dir is not a directory: {:?}", export_dir);
        }

        let history_file = file
            .history_file
            .map(|s| to_path(&s))
            .or_else(|| cli.history_file.clone());

        let log_level = file
            .log_level
            .or_else(|| cli.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        if EnvFilter::try_new(&log_level).is_err() {
            bail!("Invalid log level: {}", log_level);
        }

        let preload = cli
            .files
            .iter()
            .cloned()
            .chain(file.preload.unwrap_or_default().into_iter().map(|s| to_path(&s)))
            .collect();

        Ok(Self {
            export_dir,
            history_file,
            log_level,
            preload,
        })
    }
}

fn to_path(raw: &str) -> PathBuf {
    expand_home(raw).unwrap_or_else(|| PathBuf::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_cli_only() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            files: vec![PathBuf::from("a.json")],
            export_dir: Some(temp_dir.path().to_path_buf()),
            history_file: Some(PathBuf::from("/tmp/history")),
            log_level: Some("debug".to_string()),
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.export_dir, temp_dir.path());
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/history")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.preload, vec![PathBuf::from("a.json")]);
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            files: vec![PathBuf::from("cli.json")],
            export_dir: Some(PathBuf::from("/should/be/overridden")),
            history_file: Some(PathBuf::from("/cli/history")),
            log_level: Some("warn".to_string()),
        };

        let file_config = FileConfig {
            export_dir: Some(temp_dir.path().to_string_lossy().to_string()),
            log_level: Some("trace".to_string()),
            preload: Some(vec!["toml.json".to_string()]),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.export_dir, temp_dir.path());
        assert_eq!(config.log_level, "trace");
        // CLI value used when TOML doesn't specify
        assert_eq!(config.history_file, Some(PathBuf::from("/cli/history")));
        assert_eq!(
            config.preload,
            vec![PathBuf::from("cli.json"), PathBuf::from("toml.json")]
        );
    }

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), None).unwrap();
        assert_eq!(config.export_dir, std::env::current_dir().unwrap());
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.history_file.is_none());
        assert!(config.preload.is_empty());
    }

    #[test]
    fn test_resolve_nonexistent_export_dir_error() {
        let cli = CliConfig {
            export_dir: Some(PathBuf::from("/nonexistent/path/that/should/not/exist")),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_export_dir_not_directory_error() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let cli = CliConfig {
            export_dir: Some(temp_file.path().to_path_buf()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }

    #[test]
    fn test_resolve_invalid_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            export_dir: Some(temp_dir.path().to_path_buf()),
            log_level: Some("media_catalog=loud".to_string()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }
}
