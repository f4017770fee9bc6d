//! Orchestration for a launch-kit run.
//!
//! [`machine`] holds the pure state machine. [`WorkflowRuntime`] executes the
//! remote stages it asks for and applies their results, [`WorkflowSession`]
//! pairs a runtime with a user's kit archive, and [`PreviewBoard`] renders
//! per-platform image previews during refinement.

pub mod machine;
mod preview_board;
mod runtime;
mod session;

pub use machine::{Command, Event, Ticket, Transition, WorkflowState, transition};
pub use preview_board::{PreviewBoard, PreviewSlot};
pub use runtime::WorkflowRuntime;
pub use session::WorkflowSession;
