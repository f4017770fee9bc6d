//! Configuration for launchkit.
//!
//! Values come from, in order of precedence: CLI arguments, a TOML file
//! discovered at `.launchkit/config.toml`, and built-in defaults. Every
//! resolved value remembers where it came from.

mod config;

pub use config::*;
