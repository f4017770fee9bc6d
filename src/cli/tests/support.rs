//! Test support utilities for CLI tests

use async_trait::async_trait;
use launchkit_gateway::{AnalysisResponse, StageGateway};
use launchkit_model::{CampaignPlan, CreativeDraft, Persona, StrategyOutput, UserBrief, fixtures};
use launchkit_utils::error::GatewayError;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Answers every stage from fixtures and remembers the refined draft.
#[derive(Default)]
pub struct FixtureGateway {
    pub fail_plan: bool,
    pub refined: Mutex<Option<CreativeDraft>>,
}

#[async_trait]
impl StageGateway for FixtureGateway {
    async fn run_analysis(&self, _brief: &UserBrief) -> Result<AnalysisResponse, GatewayError> {
        Ok(AnalysisResponse {
            token: fixtures::SAMPLE_TOKEN.to_string(),
            analysis: fixtures::sample_analysis(),
        })
    }

    async fn run_strategy(
        &self,
        _token: &str,
        _persona: &Persona,
    ) -> Result<StrategyOutput, GatewayError> {
        Ok(fixtures::sample_strategy())
    }

    async fn run_plan(
        &self,
        _token: &str,
        draft: &CreativeDraft,
    ) -> Result<CampaignPlan, GatewayError> {
        *self.refined.lock().unwrap() = Some(draft.clone());
        if self.fail_plan {
            return Err(GatewayError::ProviderOutage("503 Service Unavailable".into()));
        }
        Ok(fixtures::sample_plan())
    }
}

/// Write the sample brief as JSON into a fresh temp dir.
pub fn brief_file() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("brief.json");
    std::fs::write(&path, serde_json::to_vec(&fixtures::sample_brief()).unwrap()).unwrap();
    (dir, path)
}
