//! CLI command implementations (facade).
//!
//! Handlers take their collaborators (gateway, archive, renderer) and an
//! output writer from `run.rs`, which keeps them testable without a network
//! or a terminal.

mod brief;
mod config;
mod kits;
mod pipeline;
mod preview;

pub use brief::load_brief;
pub use config::execute_config_command;
pub use kits::{execute_kits_list_command, execute_kits_show_command};
pub use pipeline::{RunOptions, execute_run_command};
pub use preview::execute_preview_command;
