use std::sync::Arc;

use launchkit_archive::KitArchive;
use launchkit_gateway::StageGateway;
use launchkit_model::LaunchKit;
use launchkit_utils::error::{LaunchKitError, WorkflowError};
use tracing::info;

use crate::runtime::WorkflowRuntime;

/// One user's working session: the live run plus their saved kits.
pub struct WorkflowSession {
    user: String,
    runtime: WorkflowRuntime,
    archive: Arc<dyn KitArchive>,
    kits: Vec<LaunchKit>,
}

impl WorkflowSession {
    pub fn new(
        user: impl Into<String>,
        gateway: Arc<dyn StageGateway>,
        archive: Arc<dyn KitArchive>,
    ) -> Self {
        Self {
            user: user.into(),
            runtime: WorkflowRuntime::new(gateway),
            archive,
            kits: Vec::new(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn runtime(&self) -> &WorkflowRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut WorkflowRuntime {
        &mut self.runtime
    }

    /// Kits as of the last load or save.
    pub fn kits(&self) -> &[LaunchKit] {
        &self.kits
    }

    pub async fn load_kits(&mut self) -> Result<&[LaunchKit], LaunchKitError> {
        self.kits = self.archive.list(&self.user).await?;
        Ok(&self.kits)
    }

    /// Archive a copy of the current snapshot.
    ///
    /// # Errors
    ///
    /// `Workflow(Busy)` while a remote stage is running, or any archive error.
    pub async fn save_kit(&mut self) -> Result<&LaunchKit, LaunchKitError> {
        if self.runtime.is_busy() {
            return Err(WorkflowError::Busy {
                stage: self.runtime.stage(),
            }
            .into());
        }
        self.kits = self
            .archive
            .save(&self.user, self.runtime.snapshot())
            .await?;
        let kit = self.kits.last().ok_or_else(|| {
            LaunchKitError::Io(std::io::Error::other("archive returned no kits after save"))
        })?;
        info!(kit_id = %kit.id, product = %kit.product_name, "Launch kit saved");
        Ok(kit)
    }
}
