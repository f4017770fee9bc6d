use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output of the launch plan stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignPlan {
    pub launch_campaign_strategy: LaunchStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchStrategy {
    pub overall_objective: String,
    pub key_metrics_for_success: Vec<String>,
    pub recommended_channels: Vec<RecommendedChannel>,
    /// Keyed by phase label ("Week 1", "Phase 2: Launch", ...).
    pub high_level_launch_plan_30_days: BTreeMap<String, LaunchPlanPhase>,
    pub resource_considerations: String,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedChannel {
    pub channel_name: String,
    pub reasoning: String,
    pub primary_role_in_funnel: String,
    pub estimated_budget_allocation: String,
    pub key_actionables: Vec<String>,
    pub expected_kpis: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlanPhase {
    pub focus: String,
    pub tasks: Vec<String>,
}
