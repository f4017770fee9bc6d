use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use launchkit_utils::error::ConfigError;

use super::{ArchiveConfig, Config, ConfigSource, GatewayConfig, LoggingConfig, PreviewConfig};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// ```rust
    /// use launchkit_config::Config;
    /// use std::time::Duration;
    ///
    /// let config = Config::builder()
    ///     .gateway_url("http://127.0.0.1:8000")
    ///     .gateway_timeout(Duration::from_secs(30))
    ///     .state_dir("/tmp/launchkit")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.gateway_url(), "http://127.0.0.1:8000");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builds a [`Config`] without touching the environment or the filesystem.
///
/// Values set here are attributed to `ConfigSource::Programmatic`; the rest
/// keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    gateway_url: Option<String>,
    gateway_timeout: Option<Duration>,
    preview_url: Option<String>,
    preview_timeout: Option<Duration>,
    state_dir: Option<PathBuf>,
    archive_latency_ms: Option<u64>,
    verbose: Option<bool>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = Some(url.into());
        self
    }

    /// Per-request timeout for remote stage calls (whole seconds, 5..=3600).
    #[must_use]
    pub fn gateway_timeout(mut self, timeout: Duration) -> Self {
        self.gateway_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn preview_timeout(mut self, timeout: Duration) -> Self {
        self.preview_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn state_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn archive_latency_ms(mut self, ms: u64) -> Self {
        self.archive_latency_ms = Some(ms);
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Resolve and validate.
    pub fn build(self) -> Result<Config, ConfigError> {
        let mut source_attribution = HashMap::new();
        let mut gateway = GatewayConfig::default();
        let mut preview = PreviewConfig::default();
        let mut archive = ArchiveConfig::default();
        let mut logging = LoggingConfig::default();

        let mut set = |key: &str, present: bool| {
            let source = if present {
                ConfigSource::Programmatic
            } else {
                ConfigSource::Default
            };
            source_attribution.insert(key.to_string(), source);
        };

        set("gateway.base_url", self.gateway_url.is_some());
        if let Some(url) = self.gateway_url {
            gateway.base_url = Some(url);
        }
        set("gateway.timeout_secs", self.gateway_timeout.is_some());
        if let Some(timeout) = self.gateway_timeout {
            gateway.timeout_secs = Some(timeout.as_secs());
        }
        set("preview.base_url", self.preview_url.is_some());
        if let Some(url) = self.preview_url {
            preview.base_url = Some(url);
        }
        set("preview.timeout_secs", self.preview_timeout.is_some());
        if let Some(timeout) = self.preview_timeout {
            preview.timeout_secs = Some(timeout.as_secs());
        }
        set("archive.state_dir", self.state_dir.is_some());
        archive.state_dir = self.state_dir;
        set("archive.latency_ms", self.archive_latency_ms.is_some());
        archive.latency_ms = self.archive_latency_ms;
        set("logging.verbose", self.verbose.is_some());
        if let Some(verbose) = self.verbose {
            logging.verbose = Some(verbose);
        }

        let config = Config {
            gateway,
            preview,
            archive,
            logging,
            source_attribution,
        };
        config.validate()?;
        Ok(config)
    }
}
