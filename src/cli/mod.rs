//! Command-line interface for launchkit
//!
//! `args` holds the clap definitions, `run` parses them, loads configuration
//! and dispatches, and `commands` holds one handler per subcommand.

pub mod args;
mod commands;
mod run;

pub use run::run;

#[cfg(test)]
mod tests;
