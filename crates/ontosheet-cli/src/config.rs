//! Configuration file loading for the ontosheet CLI.
//!
//! An explicit `--config` path must exist and parse. Without one, the
//! per-user configuration directory is consulted and silently skipped
//! when no file is present.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use log::debug;
use ontosheet::{OntosheetError, config::AppConfig};

/// Loads the application configuration.
///
/// `path` is the value of `--config` when the user passed one. The
/// default location is `config.toml` under the platform configuration
/// directory for `ontosheet`.
pub(crate) fn load_config(path: Option<&str>) -> Result<AppConfig, OntosheetError> {
    let path = match path {
        Some(explicit) => PathBuf::from(explicit),
        None => match default_config_path() {
            Some(default) if default.is_file() => default,
            _ => {
                debug!("No configuration file found; using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    let text = fs::read_to_string(&path)?;
    let config = toml::from_str(&text).map_err(|err| {
        OntosheetError::Config(format!("invalid config file {}: {err}", path.display()))
    })?;
    debug!(config_file:? = path; "Configuration loaded");
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ontosheet").map(|dirs| dirs.config_dir().join("config.toml"))
}
