use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

const APP_DIR: &str = "process-palette";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EnvDirs {
    pub xdg_config_home: Option<PathBuf>,
    pub xdg_data_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl EnvDirs {
    pub fn from_env() -> Self {
        Self {
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            xdg_data_home: std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
            home: std::env::var_os("HOME").map(PathBuf::from),
        }
    }
}

pub fn load_app_config() -> AppConfig {
    load_app_config_with(&EnvDirs::from_env())
}

fn load_app_config_with(dirs: &EnvDirs) -> AppConfig {
    let path = match app_config_path(dirs) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

fn app_config_path(dirs: &EnvDirs) -> ConfigResult<PathBuf> {
    let mut path = xdg_root(dirs.xdg_config_home.as_deref(), dirs.home.as_deref(), ".config")?;
    path.push(APP_DIR);
    path.push(APP_CONFIG_FILE);
    Ok(path)
}

/// Directory holding persisted records; an explicit `data_dir` wins.
pub fn data_dir(config: &AppConfig, dirs: &EnvDirs) -> ConfigResult<PathBuf> {
    if let Some(dir) = config
        .data_dir
        .as_ref()
        .filter(|path| !path.as_os_str().is_empty())
    {
        return Ok(dir.clone());
    }
    let mut path = xdg_root(
        dirs.xdg_data_home.as_deref(),
        dirs.home.as_deref(),
        ".local/share",
    )?;
    path.push(APP_DIR);
    Ok(path)
}

fn xdg_root(xdg: Option<&Path>, home: Option<&Path>, home_suffix: &str) -> ConfigResult<PathBuf> {
    if let Some(xdg) = xdg.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigError::MissingHomeDirectory)?;
    Ok(home.join(home_suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(xdg_config: Option<&str>, xdg_data: Option<&str>, home: Option<&str>) -> EnvDirs {
        EnvDirs {
            xdg_config_home: xdg_config.map(PathBuf::from),
            xdg_data_home: xdg_data.map(PathBuf::from),
            home: home.map(PathBuf::from),
        }
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(&dirs(Some("/tmp/config-root"), None, Some("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/process-palette/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(&dirs(None, None, Some("/tmp/home"))).expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/process-palette/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path(&dirs(None, None, None)).unwrap_err();
        assert_eq!(error, ConfigError::MissingHomeDirectory);
    }

    #[test]
    fn data_dir_prefers_configured_directory() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/srv/palette")),
            log_filter: None,
        };
        let dir = data_dir(&config, &dirs(None, Some("/tmp/data"), None)).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/palette"));
    }

    #[test]
    fn data_dir_uses_xdg_data_home_then_home() {
        let config = AppConfig::default();
        assert_eq!(
            data_dir(&config, &dirs(None, Some("/tmp/data"), Some("/tmp/home"))).unwrap(),
            PathBuf::from("/tmp/data/process-palette")
        );
        assert_eq!(
            data_dir(&config, &dirs(None, None, Some("/tmp/home"))).unwrap(),
            PathBuf::from("/tmp/home/.local/share/process-palette")
        );
    }

    #[test]
    fn load_app_config_reads_file_and_tolerates_garbage() {
        let root = tempfile::tempdir().unwrap();
        let env = dirs(root.path().to_str(), None, None);
        let path = app_config_path(&env).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        std::fs::write(&path, r#"{ "data_dir": "/srv/x", "log_filter": "debug" }"#).unwrap();
        let config = load_app_config_with(&env);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/x")));
        assert_eq!(config.log_filter.as_deref(), Some("debug"));

        std::fs::write(&path, "{ invalid ").unwrap();
        let config = load_app_config_with(&env);
        assert!(config.data_dir.is_none());
        assert!(config.log_filter.is_none());
    }
}
