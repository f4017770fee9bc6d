//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface using clap derive: the
//! top-level `Cli` struct, its global flags, and the subcommand enums.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// launchkit - human-in-the-loop launch kits from a product brief
#[derive(Parser, Debug)]
#[command(name = "launchkit")]
#[command(about = "Drive a product brief through market analysis, creative strategy and campaign planning")]
#[command(long_about = r#"
launchkit takes a product brief through three remote stages. After market
analysis you pick a target persona, after creative strategy you pick one
creative draft and narrow it to one caption and image per platform plus one
email template, and campaign planning produces the launch plan. Finished runs
are saved per user as launch kits.

EXAMPLES:
  # Run the pipeline with the first candidate everywhere
  launchkit run --brief brief.toml

  # Pick persona #1, draft #2, the second TikTok caption, and save the kit
  launchkit run --brief brief.json --persona 1 --variant 2 --pick TikTok=1:0 --save

  # List and inspect saved kits
  launchkit kits list --user alice
  launchkit kits show --user alice 2026-10-18T12:00:00.000Z

  # Render one image preview
  launchkit preview "Bottle glowing at dusk" --out preview.png

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  The config file is --config, else $LAUNCHKIT_CONFIG, else the nearest
  .launchkit/config.toml above the current directory.
  Kits are stored under the state directory ($LAUNCHKIT_HOME by default).
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the remote stage service
    #[arg(long, global = true)]
    pub gateway_url: Option<String>,

    /// Per-stage timeout in seconds
    #[arg(long, global = true)]
    pub gateway_timeout: Option<u64>,

    /// Base URL of the image preview service
    #[arg(long, global = true)]
    pub preview_url: Option<String>,

    /// Directory holding saved kits
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Artificial delay added to every archive operation
    #[arg(long, global = true, hide = true)]
    pub archive_latency_ms: Option<u64>,

    /// Enable verbose output with timing and stage spans
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline for a brief, non-interactively
    Run {
        /// Brief file (.toml, otherwise JSON)
        #[arg(long)]
        brief: PathBuf,

        /// User the kit is saved for
        #[arg(long, default_value = "local")]
        user: String,

        /// Persona to build the strategy for
        #[arg(long, default_value_t = 0)]
        persona: usize,

        /// Creative draft to refine
        #[arg(long, default_value_t = 0)]
        variant: usize,

        /// Caption and image pick for one platform (repeatable)
        #[arg(long = "pick", value_name = "PLATFORM=CAPTION:IMAGE", value_parser = parse_pick)]
        picks: Vec<PickArg>,

        /// Email template pick
        #[arg(long)]
        email: Option<usize>,

        /// Save the finished run as a kit
        #[arg(long)]
        save: bool,

        /// Also write the finished run state to this JSON file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Browse saved launch kits
    #[command(subcommand)]
    Kits(KitsCommands),

    /// Render one image preview and write it to a file
    Preview {
        /// Image description to render
        description: String,

        /// Output file
        #[arg(long)]
        out: PathBuf,
    },

    /// Print the effective configuration and where each value came from
    Config,
}

impl Commands {
    /// Operation name used in error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Run { .. } => "run",
            Self::Kits(KitsCommands::List { .. }) => "kits list",
            Self::Kits(KitsCommands::Show { .. }) => "kits show",
            Self::Preview { .. } => "preview",
            Self::Config => "config",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum KitsCommands {
    /// List a user's kits, oldest first
    List {
        #[arg(long)]
        user: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one kit as JSON
    Show {
        #[arg(long)]
        user: String,

        kit_id: String,
    },
}

/// `--pick PLATFORM=CAPTION:IMAGE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickArg {
    pub platform: String,
    pub caption_index: usize,
    pub image_index: usize,
}

/// Parse `PLATFORM=CAPTION:IMAGE`. `IMAGE` may be omitted and defaults to 0.
pub fn parse_pick(raw: &str) -> Result<PickArg, String> {
    let (platform, indexes) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PLATFORM=CAPTION:IMAGE, got '{raw}'"))?;
    let platform = platform.trim();
    if platform.is_empty() {
        return Err(format!("missing platform in '{raw}'"));
    }

    let (caption, image) = match indexes.split_once(':') {
        Some((caption, image)) => (caption, Some(image)),
        None => (indexes, None),
    };
    let caption_index = caption
        .trim()
        .parse()
        .map_err(|_| format!("caption index '{caption}' is not a number"))?;
    let image_index = match image {
        Some(image) => image
            .trim()
            .parse()
            .map_err(|_| format!("image index '{image}' is not a number"))?,
        None => 0,
    };

    Ok(PickArg {
        platform: platform.to_string(),
        caption_index,
        image_index,
    })
}
