use launchkit_utils::error::ConfigError;

use super::Config;

const MIN_TIMEOUT_SECS: u64 = 5;
const MAX_TIMEOUT_SECS: u64 = 3600;
const MAX_LATENCY_MS: u64 = 10_000;

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.gateway.base_url {
            validate_url("gateway.base_url", url)?;
        }
        if let Some(url) = &self.preview.base_url {
            validate_url("preview.base_url", url)?;
        }
        if let Some(secs) = self.gateway.timeout_secs {
            validate_timeout("gateway.timeout_secs", secs)?;
        }
        if let Some(secs) = self.preview.timeout_secs {
            validate_timeout("preview.timeout_secs", secs)?;
        }
        if let Some(ms) = self.archive.latency_ms
            && ms > MAX_LATENCY_MS
        {
            return Err(ConfigError::InvalidValue {
                key: "archive.latency_ms".to_string(),
                value: format!("{ms} exceeds maximum of {MAX_LATENCY_MS} ms"),
            });
        }
        if let Some(dir) = &self.archive.state_dir
            && dir.as_os_str().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                key: "archive.state_dir".to_string(),
                value: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_url(key: &str, url: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') && !url.contains(char::is_whitespace) => {
            Ok(())
        }
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: format!("'{url}' is not an absolute http(s) URL"),
        }),
    }
}

fn validate_timeout(key: &str, secs: u64) -> Result<(), ConfigError> {
    if (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: format!("{secs} is outside {MIN_TIMEOUT_SECS}..={MAX_TIMEOUT_SECS} seconds"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(validate_url("k", "http://localhost:8000").is_ok());
        assert!(validate_url("k", "https://image.pollinations.ai").is_ok());
        assert!(validate_url("k", "localhost:8000").is_err());
        assert!(validate_url("k", "ftp://host").is_err());
        assert!(validate_url("k", "http://").is_err());
        assert!(validate_url("k", "http://bad host").is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(validate_timeout("k", 5).is_ok());
        assert!(validate_timeout("k", 3600).is_ok());
        assert!(validate_timeout("k", 4).is_err());
        assert!(validate_timeout("k", 3601).is_err());
    }

    #[test]
    fn test_validate_reports_key() {
        let config = Config::builder().archive_latency_ms(20_000).build();
        match config {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "archive.latency_ms"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }
}
