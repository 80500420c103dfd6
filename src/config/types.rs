// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio runtime worker threads.
    ///
    /// These run blocking file I/O and timers. Connections are served with
    /// `spawn_local` on the `LocalSet` of the accept loop, so request handling
    /// itself stays on a single thread whatever this is set to.
    pub workers: Option<usize>,
}

/// How the SPA fallback is applied
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServeMode {
    /// The responder loads and answers with resource bytes itself
    Standalone,
    /// Routes are forwarded to the entry document ahead of a plain static handler
    Interceptor,
}

impl fmt::Display for ServeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standalone => f.write_str("standalone"),
            Self::Interceptor => f.write_str("interceptor"),
        }
    }
}

/// Site configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Web root directory
    pub root: String,
    /// Entry document served for client-side routes
    pub fallback: String,
    pub mode: ServeMode,
    /// Welcome files tried, in order, for paths ending in `/`
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
}

fn default_index_files() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

impl SiteConfig {
    /// First welcome file, appended to directory paths in standalone mode
    pub fn index_file(&self) -> &str {
        self.index_files
            .first()
            .map_or("index.html", String::as_str)
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
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
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_section_defaults() {
        let site: SiteConfig = toml::from_str(
            r#"
            root = "dist"
            fallback = "/index.html"
            mode = "interceptor"
            "#,
        )
        .unwrap();
        assert_eq!(site.mode, ServeMode::Interceptor);
        assert_eq!(site.index_files, vec!["index.html", "index.htm"]);
        assert_eq!(site.index_file(), "index.html");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            root = "dist"
            fallback = "/index.html"
            mode = "proxy"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_index_files_fall_back_to_index_html() {
        let site: SiteConfig = toml::from_str(
            r#"
            root = "dist"
            fallback = "/app.html"
            mode = "standalone"
            index_files = []
            "#,
        )
        .unwrap();
        assert_eq!(site.index_file(), "index.html");
    }

    #[test]
    fn test_health_defaults() {
        let health: HealthConfig = toml::from_str("enabled = false").unwrap();
        assert!(!health.enabled);
        assert_eq!(health.liveness_path, "/healthz");
    }
}
