use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::config::Config;

/// Environment variable overriding the task file directory
pub const DIR_ENV: &str = "TSK_DIR";

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("tsk").join("config.toml")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config from a specific path.
/// A missing file yields defaults; an unreadable or corrupt one is
/// reported and also yields defaults.
pub fn read_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not parse config, using defaults");
                Config::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config, using defaults");
            Config::default()
        }
    }
}

/// Read the config from the default location.
pub fn read_config() -> Config {
    read_config_from(&config_path())
}

/// Pick the task file directory: explicit flag, then `TSK_DIR`, then the
/// config file, then `$HOME/.tsk`.
pub fn resolve_store_dir(flag: Option<&Path>, config: &Config) -> PathBuf {
    resolve_store_dir_with(flag, std::env::var_os(DIR_ENV).map(PathBuf::from), config)
}

fn resolve_store_dir_with(flag: Option<&Path>, env: Option<PathBuf>, config: &Config) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = env.filter(|d| !d.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(dir) = &config.storage.dir {
        return dir.clone();
    }
    dirs_home().join(".tsk")
}
