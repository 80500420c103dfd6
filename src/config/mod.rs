// Configuration module entry point
// Loads application configuration and builds the runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::spa::RequestPath;

// Re-export public types
pub use state::{AppState, Site};
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServeMode, ServerConfig,
    SiteConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    ///
    /// Environment variables prefixed with `SPA` override file values,
    /// e.g. `SPA__SERVER__PORT=9000` or `SPA__SITE__MODE=interceptor`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SPA").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("site.root", "public")?
            .set_default("site.fallback", "/index.html")?
            .set_default("site.mode", "standalone")?
            .set_default("site.index_files", vec!["index.html", "index.htm"])?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "spa-responder")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.site.root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "site.root must not be empty".to_string(),
            ));
        }
        if self.fallback_path().ends_with_slash() {
            return Err(config::ConfigError::Message(format!(
                "site.fallback must name a document, got '{}'",
                self.site.fallback
            )));
        }
        Ok(())
    }

    /// Normalized entry document path
    pub fn fallback_path(&self) -> RequestPath {
        RequestPath::from_uri_path(&self.site.fallback)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("/nonexistent/spa_responder/config").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.site.root, "public");
        assert_eq!(cfg.site.mode, ServeMode::Standalone);
        assert_eq!(cfg.fallback_path(), RequestPath::from_uri_path("/index.html"));
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.health.enabled);
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
            [server]
            port = 9090

            [site]
            root = "dist"
            fallback = "app.html"
            mode = "interceptor"

            [logging]
            level = "debug"
            access_log_format = "json"
            "#,
        );
        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.site.root, "dist");
        assert_eq!(cfg.site.mode, ServeMode::Interceptor);
        // Missing leading slash is normalized
        assert_eq!(cfg.fallback_path(), RequestPath::from_uri_path("/app.html"));
        assert_eq!(cfg.logging.access_log_format, "json");
    }

    #[test]
    fn test_directory_fallback_is_rejected() {
        let file = write_config(
            r#"
            [site]
            fallback = "/app/"
            "#,
        );
        assert!(Config::load_from(file.path().to_str().unwrap()).is_err());
    }
}
