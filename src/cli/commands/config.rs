//! `launchkit config`: print the effective configuration.

use anyhow::Result;
use std::io::Write;

use crate::Config;

/// Execute the config command
pub fn execute_config_command(config: &Config, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Effective configuration:")?;
    for (key, (value, source)) in config.effective_config() {
        writeln!(out, "  {key} = {value} ({source})")?;
    }
    Ok(())
}
