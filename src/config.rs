//! # Configuration Management
//!
//! Centralized configuration for a game-server client connection.
//!
//! This module provides structured configuration for the target server, the
//! account session, the dispatch loop cadence, chat signing, and logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Environment variables prefixed with `BLOCKWIRE_` via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Notes
//! - The default cadence (50 ms) matches the server tick
//! - Durations are serialized as integer milliseconds

use crate::error::{ProtocolError, Result};
use crate::protocol::version::{MAX_SUPPORTED_VERSION, MIN_SUPPORTED_VERSION};
use crate::utils::timeout;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Default game server port
pub const DEFAULT_PORT: u16 = 25565;

/// Protocol version used when none is configured (1.19.2)
pub const DEFAULT_PROTOCOL_VERSION: i32 = MAX_SUPPORTED_VERSION;

/// Login packets read before giving up on a server that never finishes login
pub const DEFAULT_LOGIN_PACKET_LIMIT: u32 = 65_535;

/// Bounded queue between the reader task and the processing task
pub const DEFAULT_QUEUE_CAPACITY: usize = 4096;

/// Main client configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ClientConfig {
    /// Target server
    #[serde(default)]
    pub server: ServerConfig,

    /// Account and session-proof caching
    #[serde(default)]
    pub session: SessionConfig,

    /// Reader/processor loop tuning
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Chat signing
    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("BLOCKWIRE_SERVER_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("BLOCKWIRE_SERVER_PORT") {
            config.server.port = port.parse::<u16>().map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid BLOCKWIRE_SERVER_PORT: {e}"))
            })?;
        }

        if let Ok(version) = std::env::var("BLOCKWIRE_PROTOCOL_VERSION") {
            config.server.protocol_version = version.parse::<i32>().map_err(|e| {
                ProtocolError::ConfigError(format!("Invalid BLOCKWIRE_PROTOCOL_VERSION: {e}"))
            })?;
        }

        if let Ok(forge) = std::env::var("BLOCKWIRE_FORGE") {
            config.server.forge = matches!(forge.as_str(), "1" | "true" | "yes");
        }

        if let Ok(timeout) = std::env::var("BLOCKWIRE_CONNECT_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.server.connect_timeout = Duration::from_millis(val);
            }
        }

        if let Ok(timeout) = std::env::var("BLOCKWIRE_READ_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.server.read_timeout = Duration::from_millis(val);
            }
        }

        if let Ok(username) = std::env::var("BLOCKWIRE_USERNAME") {
            config.session.username = username;
        }

        if let Ok(tick) = std::env::var("BLOCKWIRE_TICK_INTERVAL_MS") {
            if let Ok(val) = tick.parse::<u64>() {
                config.dispatch.tick_interval = Duration::from_millis(val);
            }
        }

        if let Ok(level) = std::env::var("BLOCKWIRE_LOG_LEVEL") {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                ProtocolError::ConfigError(format!("Invalid BLOCKWIRE_LOG_LEVEL: {level}"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.server.validate());
        errors.extend(self.session.validate());
        errors.extend(self.dispatch.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Target server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host name or IP literal, sent verbatim in the handshake
    pub host: String,

    pub port: u16,

    /// Protocol number the connection speaks (757..=760)
    pub protocol_version: i32,

    /// Whether the server runs the Forge mod loader
    pub forge: bool,

    /// Timeout for the TCP connect
    #[serde(with = "duration_serde")]
    pub connect_timeout: Duration,

    /// Timeout for each read during login
    #[serde(with = "duration_serde")]
    pub read_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: DEFAULT_PORT,
            protocol_version: DEFAULT_PROTOCOL_VERSION,
            forge: false,
            connect_timeout: timeout::DEFAULT_TIMEOUT,
            read_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.host.trim().is_empty() {
            errors.push("Server host cannot be empty".to_string());
        } else if self.host.len() > 255 {
            errors.push(format!(
                "Server host too long: {} characters (maximum: 255)",
                self.host.len()
            ));
        }

        if self.port == 0 {
            errors.push("Server port must be greater than 0".to_string());
        }

        if !(MIN_SUPPORTED_VERSION..=MAX_SUPPORTED_VERSION).contains(&self.protocol_version) {
            errors.push(format!(
                "Unsupported protocol version: {} (supported: {}-{})",
                self.protocol_version, MIN_SUPPORTED_VERSION, MAX_SUPPORTED_VERSION
            ));
        }

        if self.connect_timeout.as_millis() < 100 {
            errors.push("Connect timeout too short (minimum: 100ms)".to_string());
        } else if self.connect_timeout.as_secs() > 300 {
            errors.push("Connect timeout too long (maximum: 300s)".to_string());
        }

        if self.read_timeout.as_millis() < 100 {
            errors.push("Read timeout too short (minimum: 100ms)".to_string());
        } else if self.read_timeout.as_secs() > 600 {
            errors.push("Read timeout too long (maximum: 600s)".to_string());
        }

        errors
    }
}

/// Account and session-proof cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Account name for offline login through `ConnectionBuilder::from_config`
    pub username: String,

    /// How long a validated server stays trusted
    #[serde(with = "duration_serde")]
    pub cache_ttl: Duration,

    /// Maximum number of validated servers remembered
    pub cache_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: String::from("OfflinePlayer"),
            cache_ttl: Duration::from_secs(30 * 60),
            cache_capacity: 64,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.username.is_empty() {
            errors.push("Username cannot be empty".to_string());
        } else if self.username.len() > 16 {
            errors.push(format!(
                "Username too long: {} characters (maximum: 16)",
                self.username.len()
            ));
        } else if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            errors.push(format!(
                "Invalid username '{}' (allowed: letters, digits, underscore)",
                self.username
            ));
        }

        if self.cache_capacity == 0 {
            errors.push("Session cache capacity must be greater than 0".to_string());
        }

        if self.cache_ttl.as_secs() < 1 {
            errors.push("Session cache TTL too short (minimum: 1s)".to_string());
        }

        errors
    }
}

/// Dispatch loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Processing loop cadence
    #[serde(with = "duration_serde")]
    pub tick_interval: Duration,

    /// Frames buffered between reader and processor before the reader waits
    pub queue_capacity: usize,

    /// Login packets accepted before the attempt is abandoned
    pub login_packet_limit: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tick_interval: timeout::TICK_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            login_packet_limit: DEFAULT_LOGIN_PACKET_LIMIT,
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.tick_interval.is_zero() {
            errors.push("Tick interval must be greater than 0".to_string());
        } else if self.tick_interval.as_secs() > 1 {
            errors.push("Tick interval too long (maximum: 1s)".to_string());
        }

        if self.queue_capacity == 0 {
            errors.push("Queue capacity must be greater than 0".to_string());
        } else if self.queue_capacity > 1_000_000 {
            errors.push(format!(
                "Queue capacity too large: {} (max recommended: 1,000,000)",
                self.queue_capacity
            ));
        }

        if self.login_packet_limit == 0 {
            errors.push("Login packet limit must be greater than 0".to_string());
        }

        errors
    }
}

/// Chat signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    /// Sign outbound chat when key material is available
    pub sign_chat: bool,

    /// Sign free-text arguments of outbound commands
    pub sign_commands: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            sign_chat: true,
            sign_commands: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("blockwire"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for Duration serialization/deserialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis() as u64;
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
