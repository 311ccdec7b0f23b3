//! On-disk frontend configuration: window scale, key bindings, and the
//! optional serial-link peer, loaded from `dirs::config_dir()` and
//! overridable by CLI flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scale: u32,
    pub audio_sample_rate: u32,
    pub serial: Option<SerialConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self { scale: 3, audio_sample_rate: 44_100, serial: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Listen on this port for an incoming link-cable peer.
    pub listen_port: Option<u16>,
    /// Connect to `host:port` as a link-cable peer.
    pub connect: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gb-frontend").join("config.toml"))
}

pub fn load() -> Config {
    let Some(path) = config_path() else { return Config::default() };
    match std::fs::read_to_string(&path) {
        Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
            log::warn!("failed to parse {}: {e}; using defaults", path.display());
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
