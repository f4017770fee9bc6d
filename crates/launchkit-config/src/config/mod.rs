mod builder;
mod cli_args;
mod discovery;
mod model;
mod sources;
mod validation;

pub use builder::ConfigBuilder;
pub use cli_args::CliArgs;
pub use model::*;
pub use launchkit_utils::types::ConfigSource;
