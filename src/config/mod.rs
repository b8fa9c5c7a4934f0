use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::shapes::DEFAULT_NAME_PREFIX;

fn default_name_prefix() -> String {
    DEFAULT_NAME_PREFIX.to_string()
}
fn default_verbose() -> bool {
    false
}
fn default_json() -> bool {
    false
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct FileConfig {
    /// Prefix of generated shape names ("{prefix} N")
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
    /// Directory exported files are written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Print listings as JSON
    #[serde(default = "default_json")]
    pub json: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            output_dir: None,
            verbose: default_verbose(),
            json: default_json(),
        }
    }
}

impl FileConfig {
    /// First readable config file from the search path, if any
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file, which must exist
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("areamap.toml"));
    paths.push(PathBuf::from(".areamap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("areamap").join("config.toml"));
        paths.push(config_dir.join("areamap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".areamap.toml"));
    }

    paths
}
