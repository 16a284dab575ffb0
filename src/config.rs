use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sink::PactlClient;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pactl: PactlConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PactlConfig {
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Ceiling on any single pactl invocation; a hung audio server becomes an
    /// error instead of a stalled caller.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for PactlConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_binary() -> String {
    "pactl".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_translation_domain")]
    pub translation_domain: String,
    #[serde(default = "default_icon_name")]
    pub icon_name: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            translation_domain: default_translation_domain(),
            icon_name: default_icon_name(),
        }
    }
}

fn default_title() -> String {
    "Advanced volume control".to_string()
}

fn default_translation_domain() -> String {
    "sinkdial".to_string()
}

fn default_icon_name() -> String {
    "audio-speakers-symbolic".to_string()
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        let dirs = ProjectDirs::from("com", "sinkdial", "sinkdial")
            .expect("Failed to determine project directories");

        let config_path = dirs.config_dir().join("config.toml");

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("SINKDIAL_").split("_"));

        let config: Config = figment.extract()?;

        Ok(config)
    }

    pub fn load_from_path(path: PathBuf) -> Result<Self, figment::Error> {
        let figment = Figment::new().merge(Toml::file(path));

        let config: Config = figment.extract()?;

        Ok(config)
    }

    pub fn client(&self) -> PactlClient {
        PactlClient::new(self.pactl.binary.clone(), self.pactl.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.pactl.binary, "pactl");
        assert_eq!(config.pactl.timeout_ms, 3000);
        assert_eq!(config.indicator.title, "Advanced volume control");
        assert_eq!(config.indicator.translation_domain, "sinkdial");
        assert_eq!(config.indicator.icon_name, "audio-speakers-symbolic");
    }

    #[test]
    fn test_load_from_path() {
        let dir = std::env::temp_dir().join(format!("sinkdial-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[pactl]\nbinary = \"/usr/local/bin/pactl\"\ntimeout_ms = 500\n\n[indicator]\ntitle = \"Volumes\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(path).unwrap();
        assert_eq!(config.pactl.binary, "/usr/local/bin/pactl");
        assert_eq!(config.pactl.timeout_ms, 500);
        assert_eq!(config.indicator.title, "Volumes");
        // untouched sections keep their defaults
        assert_eq!(config.indicator.translation_domain, "sinkdial");
    }

    #[test]
    fn test_load_from_missing_path_falls_back_to_defaults() {
        let config =
            Config::load_from_path(PathBuf::from("/nonexistent/sinkdial/config.toml")).unwrap();
        assert_eq!(config.pactl.binary, "pactl");
    }
}
