use crate::client::ConnectionConfig;
use crate::protocol::DEFAULT_PORT;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub controller: ControllerSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ControllerSettings {
    pub port: u16,
    pub discovery_wait_secs: f32,
    pub timeout_secs: f32,
    pub max_retries: u32,
    pub retry_delay_secs: f32,
    pub gather_info: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            controller: ControllerSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            discovery_wait_secs: 2.0,
            timeout_secs: 2.0,
            max_retries: 3,
            retry_delay_secs: 1.0,
            gather_info: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ControllerSettings {
    /// How long discovery listens for a controller reply.
    pub fn discovery_wait(&self) -> Duration {
        Duration::from_secs_f32(self.discovery_wait_secs)
    }

    /// Connection parameters for [`crate::Sc010Client`].
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            timeout: Duration::from_secs_f32(self.timeout_secs),
            max_retries: self.max_retries,
            retry_delay: Duration::from_secs_f32(self.retry_delay_secs),
            gather_info: self.gather_info,
        }
    }
}

/// Load configuration from file with layered fallbacks
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

    if let Some(path) = config_path {
        if path.exists() {
            builder = builder.add_source(File::from(path));
        } else {
            return Err(ConfigError::Message(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
    } else {
        // Try common config file locations
        let possible_paths = ["sc010.toml", "config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
                break;
            }
        }
    }

    // Add environment variable overrides with prefix "SC010_"
    builder = builder.add_source(
        Environment::with_prefix("SC010")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize::<AppConfig>()
}

/// Load configuration with better error handling and defaults
pub fn load_config_or_default(config_path: Option<&Path>) -> AppConfig {
    match load_config(config_path) {
        Ok(config) => {
            log::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            log::warn!("Failed to load config ({}), using defaults", e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_connection_matches_controller_defaults() {
        let connection = ControllerSettings::default().connection();
        assert_eq!(connection.timeout, Duration::from_secs(2));
        assert_eq!(connection.max_retries, 3);
        assert_eq!(connection.retry_delay, Duration::from_secs(1));
        assert!(connection.gather_info);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/sc010.toml")));
        assert!(result.is_err());
    }
}
