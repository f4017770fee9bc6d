//! `launchkit kits list` and `launchkit kits show`.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use launchkit_archive::KitArchive;
use launchkit_model::LaunchKit;
use launchkit_utils::error::LaunchKitError;
use launchkit_utils::types::Stage;

/// One row of `kits list --json`.
#[derive(Debug, Serialize)]
struct KitSummary<'a> {
    id: &'a str,
    product_name: &'a str,
    created_at: String,
    stage: Stage,
}

impl<'a> From<&'a LaunchKit> for KitSummary<'a> {
    fn from(kit: &'a LaunchKit) -> Self {
        Self {
            id: &kit.id,
            product_name: &kit.product_name,
            created_at: kit.created_at.to_rfc3339(),
            stage: kit.snapshot.stage,
        }
    }
}

/// Execute the kits list command
pub async fn execute_kits_list_command(
    user: &str,
    json: bool,
    archive: &dyn KitArchive,
    out: &mut impl Write,
) -> Result<()> {
    let kits = archive.list(user).await.map_err(LaunchKitError::from)?;

    if json {
        let rows: Vec<KitSummary<'_>> = kits.iter().map(KitSummary::from).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if kits.is_empty() {
        writeln!(out, "No saved kits for {user}")?;
        return Ok(());
    }

    writeln!(out, "Kits for {user} ({}):", kits.len())?;
    for kit in &kits {
        writeln!(
            out,
            "  {}  {}  [{}]",
            kit.id,
            kit.product_name,
            kit.snapshot.stage.title()
        )?;
    }
    Ok(())
}

/// Execute the kits show command
pub async fn execute_kits_show_command(
    user: &str,
    kit_id: &str,
    archive: &dyn KitArchive,
    out: &mut impl Write,
) -> Result<()> {
    let kit = archive.find(user, kit_id).await.map_err(LaunchKitError::from)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&kit)?)?;
    Ok(())
}
