//! Configuration management

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Environment variable prefix (`DARK_MODE_PORT`, `DARK_MODE_ASSETS_DIR`, ...).
const ENV_PREFIX: &str = "DARK_MODE";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the wasm-bindgen output, served under `/pkg`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    #[serde(default = "default_title")]
    pub title: String,

    /// URL of the JS glue that loads the WASM module.
    #[serde(default = "default_bundle")]
    pub bundle: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("pkg")
}

fn default_title() -> String {
    "Theme demo".to_string()
}

fn default_bundle() -> String {
    "/pkg/dark_mode.js".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
            title: default_title(),
            bundle: default_bundle(),
        }
    }
}

/// Platform config directory, falling back to the working directory.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "open-horizon-labs", "dark-mode")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_dir())
}

/// Loads `config.*` from `dir` (optional), then environment overrides.
pub fn load_config_from(dir: &Path) -> Result<Config> {
    let config = ::config::Config::builder()
        // Start with defaults
        .set_default("port", i64::from(default_port()))?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&dir.join("config").to_string_lossy()).required(false),
        )
        // Override with environment variables (DARK_MODE_PORT, DARK_MODE_TITLE, etc.)
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path()).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.assets_dir, PathBuf::from("pkg"));
        assert_eq!(config.bundle, "/pkg/dark_mode.js");
    }

    #[test]
    #[serial]
    fn test_file_values_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "port = 8088\ntitle = \"Night shift\"\nassets_dir = \"/srv/pkg\"\n",
        )
        .unwrap();

        let config = load_config_from(dir.path()).unwrap();

        assert_eq!(config.port, 8088);
        assert_eq!(config.title, "Night shift");
        assert_eq!(config.assets_dir, PathBuf::from("/srv/pkg"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "port = 8088\n").unwrap();

        std::env::set_var("DARK_MODE_PORT", "9191");
        let result = load_config_from(dir.path());
        std::env::remove_var("DARK_MODE_PORT");

        assert_eq!(result.unwrap().port, 9191);
    }
}
