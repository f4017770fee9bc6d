use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::WorkflowSnapshot;

/// Product name recorded for kits saved without a brief.
pub const UNTITLED_KIT: &str = "Untitled Kit";

/// An archived launch kit. Created by the archive, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchKit {
    /// Unique within one user's collection; derived from `created_at`.
    pub id: String,
    pub product_name: String,
    pub created_at: DateTime<Utc>,
    pub snapshot: WorkflowSnapshot,
}

impl LaunchKit {
    /// Build the record for `snapshot` saved at `created_at`.
    ///
    /// The id is the RFC 3339 timestamp with millisecond precision, suffixed
    /// with `-N` when `taken` already contains it.
    pub fn new(
        snapshot: &WorkflowSnapshot,
        created_at: DateTime<Utc>,
        taken: &[LaunchKit],
    ) -> Self {
        let base = created_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut id = base.clone();
        let mut suffix = 1;
        while taken.iter().any(|kit| kit.id == id) {
            suffix += 1;
            id = format!("{base}-{suffix}");
        }

        Self {
            id,
            product_name: snapshot.product_name().unwrap_or(UNTITLED_KIT).to_string(),
            created_at,
            snapshot: snapshot.for_archive(),
        }
    }
}
