//! CLI tests module (manifest).
//!
//! Split by concern under `src/cli/tests/*`.

mod args;
mod errors;
mod support;
