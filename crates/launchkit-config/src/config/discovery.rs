use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use launchkit_utils::error::ConfigError;
use tracing::debug;

use super::{
    ArchiveConfig, CONFIG_ENV, CliArgs, Config, ConfigSource, GatewayConfig, LoggingConfig,
    PreviewConfig,
};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    gateway: Option<TomlGateway>,
    preview: Option<TomlPreview>,
    archive: Option<ArchiveConfig>,
    logging: Option<TomlLogging>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlGateway {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPreview {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLogging {
    verbose: Option<bool>,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults.
    ///
    /// The file is, in order: `cli_args.config_path`, `$LAUNCHKIT_CONFIG`, or
    /// the nearest `.launchkit/config.toml` above the current directory.
    pub fn discover(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir().map_err(|e| ConfigError::DiscoveryFailed {
            reason: format!("cannot read current directory: {e}"),
        })?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from `start_dir`.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut source_attribution = HashMap::new();
        for key in [
            "gateway.base_url",
            "gateway.timeout_secs",
            "preview.base_url",
            "preview.timeout_secs",
            "archive.state_dir",
            "archive.latency_ms",
            "logging.verbose",
        ] {
            source_attribution.insert(key.to_string(), ConfigSource::Default);
        }

        let mut gateway = GatewayConfig::default();
        let mut preview = PreviewConfig::default();
        let mut archive = ArchiveConfig::default();
        let mut logging = LoggingConfig::default();

        let explicit_path = cli_args.config_path.clone().or_else(|| {
            std::env::var_os(CONFIG_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        let file_config = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.display().to_string(),
                    });
                }
                Some(Self::load_config_file(&path)?)
            }
            None => match Self::discover_config_file_from(start_dir) {
                Some(path) => Some(Self::load_config_file(&path)?),
                None => None,
            },
        };

        let file_config = file_config.unwrap_or_default();
        let from_file = ConfigSource::Config;

        if let Some(file_gateway) = file_config.gateway {
            if file_gateway.base_url.is_some() {
                gateway.base_url = file_gateway.base_url;
                source_attribution.insert("gateway.base_url".to_string(), from_file);
            }
            if file_gateway.timeout_secs.is_some() {
                gateway.timeout_secs = file_gateway.timeout_secs;
                source_attribution.insert("gateway.timeout_secs".to_string(), from_file);
            }
        }
        if let Some(file_preview) = file_config.preview {
            if file_preview.base_url.is_some() {
                preview.base_url = file_preview.base_url;
                source_attribution.insert("preview.base_url".to_string(), from_file);
            }
            if file_preview.timeout_secs.is_some() {
                preview.timeout_secs = file_preview.timeout_secs;
                source_attribution.insert("preview.timeout_secs".to_string(), from_file);
            }
        }
        if let Some(file_archive) = file_config.archive {
            if file_archive.state_dir.is_some() {
                archive.state_dir = file_archive.state_dir;
                source_attribution.insert("archive.state_dir".to_string(), from_file);
            }
            if file_archive.latency_ms.is_some() {
                archive.latency_ms = file_archive.latency_ms;
                source_attribution.insert("archive.latency_ms".to_string(), from_file);
            }
        }
        if let Some(file_logging) = file_config.logging
            && file_logging.verbose.is_some()
        {
            logging.verbose = file_logging.verbose;
            source_attribution.insert("logging.verbose".to_string(), from_file);
        }

        // CLI overrides
        if let Some(url) = &cli_args.gateway_url {
            gateway.base_url = Some(url.clone());
            source_attribution.insert("gateway.base_url".to_string(), ConfigSource::Cli);
        }
        if let Some(secs) = cli_args.gateway_timeout_secs {
            gateway.timeout_secs = Some(secs);
            source_attribution.insert("gateway.timeout_secs".to_string(), ConfigSource::Cli);
        }
        if let Some(url) = &cli_args.preview_url {
            preview.base_url = Some(url.clone());
            source_attribution.insert("preview.base_url".to_string(), ConfigSource::Cli);
        }
        if let Some(dir) = &cli_args.state_dir {
            archive.state_dir = Some(dir.clone());
            source_attribution.insert("archive.state_dir".to_string(), ConfigSource::Cli);
        }
        if let Some(ms) = cli_args.archive_latency_ms {
            archive.latency_ms = Some(ms);
            source_attribution.insert("archive.latency_ms".to_string(), ConfigSource::Cli);
        }
        if let Some(verbose) = cli_args.verbose {
            logging.verbose = Some(verbose);
            source_attribution.insert("logging.verbose".to_string(), ConfigSource::Cli);
        }

        let config = Self {
            gateway,
            preview,
            archive,
            logging,
            source_attribution,
        };
        config.validate()?;

        Ok(config)
    }

    /// Search upward from `start_dir` for `.launchkit/config.toml`, stopping
    /// at a repository root (.git, .hg, .svn) or the filesystem root.
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = Some(start_dir);

        while let Some(dir) = current_dir {
            let config_path = dir.join(".launchkit").join("config.toml");
            if config_path.is_file() {
                debug!(path = %config_path.display(), "Found config file");
                return Some(config_path);
            }

            if dir.join(".git").exists() || dir.join(".hg").exists() || dir.join(".svn").exists()
            {
                break;
            }

            current_dir = dir.parent();
        }

        None
    }

    fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::InvalidFile(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {e}", path.display())))
    }
}
