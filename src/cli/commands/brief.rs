//! Brief file loading for `launchkit run`.

use anyhow::Result;
use std::fs;
use std::path::Path;

use launchkit_model::UserBrief;
use launchkit_utils::error::{ConfigError, LaunchKitError};

/// Read and validate a brief. `.toml` files are parsed as TOML, anything else
/// as JSON. Both use the camelCase field names (`productName`, `usp`, ...).
///
/// # Errors
///
/// `Config(InvalidValue)` when the file cannot be read or parsed, and
/// `Validation` when a required field is blank.
pub fn load_brief(path: &Path) -> Result<UserBrief> {
    let raw = fs::read_to_string(path).map_err(|e| invalid_brief(path, e))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let brief: UserBrief = if is_toml {
        toml::from_str(&raw).map_err(|e| invalid_brief(path, e))?
    } else {
        serde_json::from_str(&raw).map_err(|e| invalid_brief(path, e))?
    };

    brief.validate().map_err(LaunchKitError::from)?;
    Ok(brief)
}

fn invalid_brief(path: &Path, err: impl std::fmt::Display) -> LaunchKitError {
    LaunchKitError::Config(ConfigError::InvalidValue {
        key: "brief".to_string(),
        value: format!("{}: {err}", path.display()),
    })
}
