use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_contact::SessionLimits;
use serde::Deserialize;
use std::{env, time::Duration};
use strum::{AsRefStr, Display, EnumString};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Display mode handed to the root view at startup.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    System,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SiteConfig {
    #[serde(default)]
    pub theme: Theme,
    /// TOML file with the portfolio content, the built-in content when unset
    #[serde(default)]
    pub content_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_revert_after_secs")]
    pub revert_after_secs: u64,
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            revert_after_secs: default_revert_after_secs(),
            simulated_latency_ms: default_simulated_latency_ms(),
            session_idle_secs: default_session_idle_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            max_sessions: default_max_sessions(),
            cookie_secure: false,
        }
    }
}

impl ContactConfig {
    pub fn revert_after(&self) -> Duration {
        Duration::from_secs(self.revert_after_secs)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn session_limits(&self) -> SessionLimits {
        SessionLimits {
            revert_after: self.revert_after(),
            idle_ttl: Duration::from_secs(self.session_idle_secs),
            max_sessions: self.max_sessions,
        }
    }
}

fn default_revert_after_secs() -> u64 {
    5
}

fn default_simulated_latency_ms() -> u64 {
    600
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_max_sessions() -> usize {
    10_000
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (FOLIO__SERVER__PORT, FOLIO__SITE__THEME, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.contact.revert_after_secs == 0 {
            return Err("Contact revert_after_secs must be at least 1".to_string());
        }
        if self.contact.max_sessions == 0 {
            return Err("Contact max_sessions must be at least 1".to_string());
        }
        if self.contact.sweep_interval_secs == 0 {
            return Err("Contact sweep_interval_secs must be at least 1".to_string());
        }
        if self.contact.session_idle_secs <= self.contact.revert_after_secs {
            return Err(
                "Contact session_idle_secs must be greater than revert_after_secs".to_string(),
            );
        }
        Ok(())
    }
}
