use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::engagement::{BenchmarkTable, QualityClassifier};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    pub benchmarks: BenchmarkTable,
    pub server: ServerConfig,
}

impl EngagementConfig {
    pub fn load(path: Option<PathBuf>) -> AppResult<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading engagement config");
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            Some(path) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                EngagementConfig::default()
            }
            None => EngagementConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| {
                    AppError::Config(format!("failed to create config dir: {}", err))
                })?;
            }
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn classifier(&self) -> QualityClassifier {
        QualityClassifier::new(self.benchmarks.clone())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = env::var("ENGAGEMENT_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = env::var("ENGAGEMENT_PORT") {
            match port.parse::<u16>() {
                Ok(value) => self.server.port = value,
                Err(err) => warn!("ignoring invalid ENGAGEMENT_PORT {:?}: {}", port, err),
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ENGAGEMENT_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engagement.toml")))
}
