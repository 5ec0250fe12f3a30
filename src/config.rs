//! Layered application configuration.
//!
//! Built-in defaults, then an optional YAML file, then environment variables
//! of the form `DIAMOND_DIGEST__<SECTION>__<KEY>`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config as Layers, Environment, File, FileFormat};
use digest_outbound::{ChatSummaryConfig, NotifyConfig};
use game_timeline::TimelinePolicyView;
use serde::{Deserialize, Serialize};
use stats_api::StatsApiConfig;

pub const ENV_PREFIX: &str = "DIAMOND_DIGEST";
const APP_DIR: &str = "diamond-digest";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub stats: StatsApiConfig,
    pub timeline: TimelinePolicyView,
    pub summary: ChatSummaryConfig,
    pub notify: NotifyConfig,
}

pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: PathBuf,
}

/// Explicit path, else `./config/config.yaml`, else the user config dir.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let local_config = PathBuf::from("config/config.yaml");
    if local_config.exists() {
        return Ok(local_config);
    }
    let mut path = dirs::config_dir().context("Failed to get config directory")?;
    path.push(APP_DIR);
    path.push("config.yaml");
    Ok(path)
}

pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = resolve_config_path(explicit)?;
    let config = load_layers(&path)?;
    Ok(LoadedConfig { config, path })
}

pub fn load_layers(path: &Path) -> Result<AppConfig> {
    let defaults =
        Layers::try_from(&AppConfig::default()).context("Failed to encode default config")?;
    let layers = Layers::builder()
        .add_source(defaults)
        .add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Yaml)
                .required(false),
        )
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    layers
        .try_deserialize()
        .with_context(|| format!("Failed to parse configuration from {}", path.display()))
}

/// Parses a YAML file on its own, without defaults or environment.
pub fn validate_file(path: &Path) -> Result<AppConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
