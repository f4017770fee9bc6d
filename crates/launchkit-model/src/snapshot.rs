use launchkit_utils::types::Stage;
use serde::{Deserialize, Serialize};

use crate::analysis::{MarketAnalysis, Persona};
use crate::brief::UserBrief;
use crate::creative::CreativeDraft;
use crate::plan::CampaignPlan;
use crate::seo::StrategyOutput;

/// Everything known about one run.
///
/// Stage outputs are written once by the transition that produces them and
/// cleared only by reset or by the failure rollback of a later stage.
/// `is_busy`, `status_message` and `last_error` are transient and are not
/// meaningful once archived.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSnapshot {
    /// Remote thread id, assigned when analysis completes.
    pub correlation_token: Option<String>,
    pub stage: Stage,
    pub input_brief: Option<UserBrief>,
    pub analysis_output: Option<MarketAnalysis>,
    pub selected_persona: Option<Persona>,
    pub strategy_output: Option<StrategyOutput>,
    pub chosen_creative_variant: Option<CreativeDraft>,
    pub refined_creative_variant: Option<CreativeDraft>,
    pub final_plan_output: Option<CampaignPlan>,
    #[serde(default)]
    pub is_busy: bool,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub last_error: Option<String>,
}

impl WorkflowSnapshot {
    /// Copy of the snapshot with transient fields cleared, suitable for storage.
    #[must_use]
    pub fn for_archive(&self) -> Self {
        Self {
            is_busy: false,
            status_message: String::new(),
            last_error: None,
            ..self.clone()
        }
    }

    pub fn product_name(&self) -> Option<&str> {
        self.input_brief
            .as_ref()
            .map(|brief| brief.product_name.trim())
            .filter(|name| !name.is_empty())
    }

    pub fn personas(&self) -> &[Persona] {
        self.analysis_output
            .as_ref()
            .map(|analysis| analysis.target_audience_personas.as_slice())
            .unwrap_or_default()
    }

    pub fn creative_variants(&self) -> &[CreativeDraft] {
        self.strategy_output
            .as_ref()
            .map(|strategy| strategy.creative_variants.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_default_snapshot_is_empty() {
        let snapshot = WorkflowSnapshot::default();
        assert_eq!(snapshot.stage, Stage::AwaitingStart);
        assert!(snapshot.correlation_token.is_none());
        assert!(snapshot.personas().is_empty());
        assert!(snapshot.creative_variants().is_empty());
        assert_eq!(snapshot.product_name(), None);
    }

    #[test]
    fn test_for_archive_clears_transients_only() {
        let mut snapshot = fixtures::completed_snapshot();
        snapshot.is_busy = true;
        snapshot.status_message = "Synthesizing".to_string();
        snapshot.last_error = Some("boom".to_string());

        let archived = snapshot.for_archive();

        assert!(!archived.is_busy);
        assert!(archived.status_message.is_empty());
        assert!(archived.last_error.is_none());
        assert_eq!(archived.final_plan_output, snapshot.final_plan_output);
        assert_eq!(archived.correlation_token, snapshot.correlation_token);
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snapshot = fixtures::completed_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"correlationToken\""));
        assert!(json.contains("\"stage\":\"COMPLETE\""));
        let back: WorkflowSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_blank_product_name_is_absent() {
        let mut snapshot = fixtures::completed_snapshot();
        if let Some(brief) = snapshot.input_brief.as_mut() {
            brief.product_name = "   ".to_string();
        }
        assert_eq!(snapshot.product_name(), None);
    }
}
