use async_trait::async_trait;
use launchkit_model::{CampaignPlan, CreativeDraft, MarketAnalysis, Persona, StrategyOutput, UserBrief};
use launchkit_utils::error::GatewayError;

/// Result of the analysis stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    /// Correlation token required by every later stage of the same run.
    pub token: String,
    pub analysis: MarketAnalysis,
}

/// Contract for the three remote stages.
///
/// Implementations validate responses before returning them: a returned
/// `Ok` always carries at least one persona, or at least one creative variant
/// with non-empty candidate lists.
#[async_trait]
pub trait StageGateway: Send + Sync {
    async fn run_analysis(&self, brief: &UserBrief) -> Result<AnalysisResponse, GatewayError>;

    async fn run_strategy(
        &self,
        token: &str,
        persona: &Persona,
    ) -> Result<StrategyOutput, GatewayError>;

    async fn run_plan(
        &self,
        token: &str,
        draft: &CreativeDraft,
    ) -> Result<CampaignPlan, GatewayError>;

    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str {
        "stage-service"
    }
}
