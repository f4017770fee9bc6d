use std::collections::BTreeMap;

use super::{Config, ConfigSource};

impl Config {
    /// Effective configuration as `key -> (value, source)`, sorted by key.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let entries = [
            ("gateway.base_url", self.gateway_url().to_string()),
            (
                "gateway.timeout_secs",
                self.gateway_timeout().as_secs().to_string(),
            ),
            ("preview.base_url", self.preview_url().to_string()),
            (
                "preview.timeout_secs",
                self.preview_timeout().as_secs().to_string(),
            ),
            ("archive.state_dir", self.state_dir().display().to_string()),
            (
                "archive.latency_ms",
                self.archive_latency().as_millis().to_string(),
            ),
            ("logging.verbose", self.verbose().to_string()),
        ];

        entries
            .into_iter()
            .map(|(key, value)| {
                let source = self
                    .source_attribution
                    .get(key)
                    .copied()
                    .unwrap_or(ConfigSource::Default);
                (key.to_string(), (value, source.to_string()))
            })
            .collect()
    }
}
