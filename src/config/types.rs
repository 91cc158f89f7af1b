// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub app: AppConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common, or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// File fully overwritten with the last submitted message
    #[serde(default = "default_message_file")]
    pub message_file: String,
    /// Names served on the user list page
    #[serde(default = "default_users")]
    pub users: Vec<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_message_file() -> String {
    "message.txt".to_string()
}

fn default_users() -> Vec<String> {
    vec![
        "Michelle".to_string(),
        "David".to_string(),
        "Lisa".to_string(),
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            message_file: default_message_file(),
            users: default_users(),
        }
    }
}
