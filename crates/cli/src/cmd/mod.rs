pub mod check;
pub mod scan;

use std::{fs::File, io::BufReader};

use anyhow::{Context, Result};
use runwatch_core::config::Config;
use typed_path::{Utf8NativePath, Utf8NativePathBuf};

const DEFAULT_CONFIG: &str = "config.yml";

/// Loads the config file. Without an explicit path, a missing `config.yml` yields defaults.
pub fn load_config(path: Option<&Utf8NativePathBuf>) -> Result<Config> {
    load_config_or_default(path.map(|p| p.as_path()), Utf8NativePath::new(DEFAULT_CONFIG))
}

fn load_config_or_default(
    path: Option<&Utf8NativePath>,
    default_path: &Utf8NativePath,
) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None => {
            if !std::fs::exists(default_path.with_platform_encoding()).unwrap_or(false) {
                tracing::debug!("No {} found, using defaults", default_path);
                return Ok(Config::default());
            }
            default_path
        }
    };
    let file = File::open(path.with_platform_encoding())
        .with_context(|| format!("Failed to open config file '{}'", path))?;
    serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config file '{}'", path))
}
