use std::path::PathBuf;

/// Configuration overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub gateway_url: Option<String>,
    pub gateway_timeout_secs: Option<u64>,
    pub preview_url: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub archive_latency_ms: Option<u64>,
    pub verbose: Option<bool>,
}
