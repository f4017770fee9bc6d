//! Structured logging for launchkit.
//!
//! Every transition, remote call, stale discard and archive write emits a
//! `tracing` event with `stage` and `generation` fields so that a single run
//! can be followed through the log.

use tracing::{Level, info, span, warn};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::types::Stage;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise verbose mode logs launchkit at debug
/// and closes spans with their timing; the default logs launchkit at info.
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("launchkit=debug,info")
            } else {
                EnvFilter::try_new("launchkit=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false);

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.with_span_events(FmtSpan::CLOSE).compact())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.compact())
            .try_init()?;
    }

    Ok(())
}

/// Span covering one remote stage call.
#[must_use]
pub fn stage_span(stage: Stage, generation: u64) -> tracing::Span {
    span!(
        Level::INFO,
        "remote_stage",
        stage = %stage,
        generation = generation,
    )
}

pub fn log_stage_start(stage: Stage, generation: u64) {
    info!(stage = %stage, generation, "{}", stage.description());
}

pub fn log_stage_complete(stage: Stage, generation: u64, duration_ms: u128) {
    info!(stage = %stage, generation, duration_ms, "Remote stage completed");
}

pub fn log_stage_error(stage: Stage, generation: u64, error: &str, duration_ms: u128) {
    warn!(
        stage = %stage,
        generation,
        duration_ms,
        error = %error,
        "Remote stage failed"
    );
}
