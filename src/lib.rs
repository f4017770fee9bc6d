//! launchkit - human-in-the-loop orchestration for product launch kits
//!
//! A launch-kit run takes a product brief through three remote AI stages:
//! market analysis, SEO and creative strategy, and campaign planning. Between
//! stages a person picks a persona, picks one creative draft and narrows it to
//! one caption and image per platform plus one email template. Finished runs
//! are archived per user as launch kits.
//!
//! launchkit can be used in two ways:
//! - **CLI**: the `launchkit` binary drives a run non-interactively from a
//!   brief file and a set of picks
//! - **Library**: embed [`WorkflowSession`] and supply your own
//!   [`StageGateway`] and [`KitArchive`]
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Show where every setting comes from
//! launchkit config
//!
//! # Run the whole pipeline, picking persona #1 and the second TikTok caption
//! launchkit run --brief brief.toml --persona 1 --pick TikTok=1:0 --save
//!
//! # Browse saved kits
//! launchkit kits list --user alice
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use launchkit::{
//!     Config, FileKitArchive, HttpStageGateway, RefinementPicks, UserBrief, WorkflowSession,
//! };
//!
//! # async fn demo(brief: UserBrief) -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::builder().gateway_url("http://localhost:8000").build()?;
//! let gateway = Arc::new(HttpStageGateway::from_config(&config)?);
//! let archive = Arc::new(FileKitArchive::from_config(&config)?);
//! let mut session = WorkflowSession::new("alice", gateway, archive);
//!
//! let rt = session.runtime_mut();
//! rt.start(brief).await?;
//! rt.select_persona(0).await?;
//! rt.select_variant(0)?;
//! if let Some(draft) = rt.snapshot().chosen_creative_variant.clone() {
//!     rt.submit_refinement(RefinementPicks::first_of_each(&draft)).await?;
//! }
//!
//! session.save_kit().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Internal error |
//! | 2 | Invalid arguments or configuration |
//! | 3 | Validation failure (brief, index, picks) |
//! | 4 | Event not allowed in the current stage |
//! | 9 | Kit archive locked by another writer |
//! | 10 | Remote stage timed out |
//! | 70 | Remote stage or preview failure |
//! | 74 | Kit archive failure |

pub mod cli;

// ============================================================================
// Stable Public API
// ============================================================================

pub use launchkit_archive::{FileKitArchive, InMemoryKitArchive, KitArchive};
pub use launchkit_config::{CliArgs, Config};
pub use launchkit_engine::{PreviewBoard, PreviewSlot, WorkflowRuntime, WorkflowSession};
pub use launchkit_gateway::{
    HttpPreviewRenderer, HttpStageGateway, PreviewImage, PreviewRenderer, StageGateway,
};
pub use launchkit_model::{LaunchKit, UserBrief, WorkflowSnapshot};
pub use launchkit_refine::RefinementPicks;
pub use launchkit_utils::error::{LaunchKitError, UserFriendlyError};
pub use launchkit_utils::exit_codes::ExitCode;
pub use launchkit_utils::types::Stage;

/// Lower-level building blocks, re-exported for embedding and tests.
pub mod engine {
    pub use launchkit_engine::machine::*;
}
