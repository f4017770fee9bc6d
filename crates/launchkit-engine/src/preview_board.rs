//! Per-platform image previews during refinement.
//!
//! Each platform has at most one preview task. Platforms are independent:
//! one failing or being re-requested never touches another, and none of
//! them affect the workflow.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use launchkit_gateway::{PreviewImage, PreviewRenderer};
use launchkit_utils::error::PreviewError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewSlot {
    #[default]
    Idle,
    Generating,
    Ready(PreviewImage),
    Failed(PreviewError),
}

static IDLE: PreviewSlot = PreviewSlot::Idle;

pub struct PreviewBoard {
    renderer: Arc<dyn PreviewRenderer>,
    slots: BTreeMap<String, PreviewSlot>,
    tasks: HashMap<String, JoinHandle<Result<PreviewImage, PreviewError>>>,
}

impl PreviewBoard {
    pub fn new(renderer: Arc<dyn PreviewRenderer>) -> Self {
        Self {
            renderer,
            slots: BTreeMap::new(),
            tasks: HashMap::new(),
        }
    }

    /// Start rendering `description` for `platform`, aborting any preview
    /// already in flight for that platform.
    pub fn request(&mut self, platform: &str, description: &str) {
        if let Some(previous) = self.tasks.remove(platform) {
            debug!(platform, "Aborting previous preview");
            previous.abort();
        }

        let renderer = Arc::clone(&self.renderer);
        let description = description.to_string();
        let handle =
            tokio::spawn(async move { renderer.generate_preview(&description).await });

        self.tasks.insert(platform.to_string(), handle);
        self.slots
            .insert(platform.to_string(), PreviewSlot::Generating);
    }

    /// Abort the preview for `platform` and return it to `Idle`.
    pub fn cancel(&mut self, platform: &str) {
        if let Some(task) = self.tasks.remove(platform) {
            task.abort();
        }
        self.slots.remove(platform);
    }

    pub fn slot(&self, platform: &str) -> &PreviewSlot {
        self.slots.get(platform).unwrap_or(&IDLE)
    }

    /// Platforms with a non-idle slot, in name order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &PreviewSlot)> {
        self.slots.iter().map(|(platform, slot)| (platform.as_str(), slot))
    }

    /// Wait for the preview of `platform` to finish.
    pub async fn settle(&mut self, platform: &str) -> &PreviewSlot {
        if let Some(task) = self.tasks.remove(platform) {
            let slot = match task.await {
                Ok(Ok(image)) => PreviewSlot::Ready(image),
                Ok(Err(err)) => {
                    warn!(platform, error = %err, "Preview failed");
                    PreviewSlot::Failed(err)
                }
                Err(join_err) if join_err.is_cancelled() => {
                    PreviewSlot::Failed(PreviewError::Cancelled)
                }
                Err(join_err) => {
                    PreviewSlot::Failed(PreviewError::Transport(join_err.to_string()))
                }
            };
            self.slots.insert(platform.to_string(), slot);
        }
        self.slot(platform)
    }

    /// Wait for every in-flight preview.
    pub async fn settle_all(&mut self) {
        let platforms: Vec<String> = self.tasks.keys().cloned().collect();
        for platform in platforms {
            self.settle(&platform).await;
        }
    }
}

impl Drop for PreviewBoard {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
