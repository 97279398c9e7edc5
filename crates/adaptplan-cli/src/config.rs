use std::path::{Path, PathBuf};

use adaptplan_narrative::ServiceConfig;
use serde::{Deserialize, Serialize};

use crate::CliError;

pub const DEFAULT_CONFIG_FILE: &str = "adaptplan.toml";
pub const DEFAULT_RULES_PATH: &str = "rules/rules.yaml";

/// Settings read from `adaptplan.toml`, overlaid with `OPENAI_*` variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules_path: PathBuf,
    pub narrative: ServiceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
            narrative: ServiceConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Load configuration.
///
/// An explicit path must exist. Without one, `adaptplan.toml` in the working
/// directory is used when present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    };

    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            AppConfig::from_toml_str(&content)
                .map_err(|source| CliError::Config { path, source })?
        }
        None => AppConfig::default(),
    };

    config.narrative = config.narrative.with_process_env();
    Ok(config)
}
