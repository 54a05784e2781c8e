//! Layered configuration: built-in defaults, a TOML file under the
//! user config directory, and `ZIGLY_*` environment variables. CLI
//! flags are merged on top by `main`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

/// TUI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path to the state snapshot file the data bridge polls.
    pub snapshot: Option<PathBuf>,

    /// Poll interval for snapshot re-reads, in milliseconds.
    pub poll_interval_ms: u64,

    /// Bridge frontend base URL, used for device detail links.
    pub frontend_url: Option<Url>,

    /// Log file path.
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: None,
            poll_interval_ms: 2_000,
            frontend_url: None,
            log_file: PathBuf::from("/tmp/zigly.log"),
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Default config file path: `<config dir>/zigly/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "zigly").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration: defaults < config file < environment.
pub fn load_config() -> Result<Config, figment::Error> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = config_path() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed("ZIGLY_")).extract()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_usable_without_any_file() {
        let config = Config::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(2_000));
        assert!(config.snapshot.is_none());
    }

    #[test]
    fn toml_layer_overrides_defaults() {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                snapshot = "/var/lib/zigly/state.json"
                poll_interval_ms = 500
                frontend_url = "http://bridge.local:8080/"
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(
            config.snapshot.as_deref(),
            Some(std::path::Path::new("/var/lib/zigly/state.json"))
        );
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(
            config.frontend_url.unwrap().as_str(),
            "http://bridge.local:8080/"
        );
    }
}
