//! Response-shape validation for the three stage endpoints.
//!
//! The service may answer 200 with a partial or empty payload when a stage
//! agent fails. Nothing reaches the workflow until it has been checked here.

use launchkit_model::{CampaignPlan, CreativeDraft, MarketAnalysis, SeoOutput, StrategyOutput};
use launchkit_utils::error::GatewayError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::AnalysisResponse;

#[derive(Deserialize)]
struct AnalysisBody {
    #[serde(default)]
    thread_id: Option<String>,
    #[serde(default)]
    market_maven_output: Option<Value>,
}

#[derive(Deserialize)]
struct StrategyBody {
    #[serde(default)]
    seo_sage_output: Option<Value>,
    #[serde(default)]
    creative_drafts: Option<Value>,
}

#[derive(Deserialize)]
struct PlanBody {
    #[serde(default)]
    campaign_architect_output: Option<Value>,
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8], endpoint: &str) -> Result<T, GatewayError> {
    serde_json::from_slice(bytes).map_err(|e| {
        GatewayError::Transport(format!("{endpoint} returned malformed JSON: {e}"))
    })
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, GatewayError> {
    serde_json::from_value(value)
        .map_err(|e| GatewayError::Transport(format!("{what} has an unexpected shape: {e}")))
}

/// Present and not JSON null.
fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

pub(crate) fn analysis(bytes: &[u8]) -> Result<AnalysisResponse, GatewayError> {
    let body: AnalysisBody = parse_body(bytes, "/start")?;

    let Some(raw) = present(body.market_maven_output) else {
        return Err(GatewayError::EmptyResult(
            "market analysis produced no output".to_string(),
        ));
    };
    let analysis: MarketAnalysis = decode(raw, "market analysis")?;
    if analysis.target_audience_personas.is_empty() {
        return Err(GatewayError::EmptyResult(
            "market analysis produced no personas".to_string(),
        ));
    }

    let token = body
        .thread_id
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            GatewayError::Transport("/start response carried no thread_id".to_string())
        })?;

    Ok(AnalysisResponse { token, analysis })
}

pub(crate) fn strategy(bytes: &[u8]) -> Result<StrategyOutput, GatewayError> {
    let body: StrategyBody = parse_body(bytes, "/feedback/persona")?;

    let seo_raw = present(body.seo_sage_output).ok_or_else(|| {
        GatewayError::Transport("strategy response carried no seo_sage_output".to_string())
    })?;
    let drafts_raw = present(body.creative_drafts).ok_or_else(|| {
        GatewayError::Transport("strategy response carried no creative_drafts".to_string())
    })?;

    let seo: SeoOutput = decode(seo_raw, "SEO output")?;
    let creative_variants: Vec<CreativeDraft> = decode(drafts_raw, "creative drafts")?;

    if creative_variants.is_empty() {
        return Err(GatewayError::EmptyResult(
            "strategy produced no creative variants".to_string(),
        ));
    }
    for (index, variant) in creative_variants.iter().enumerate() {
        if let Some(slot) = variant.first_empty_candidate_list() {
            return Err(GatewayError::Transport(format!(
                "creative variant {index} ({}) has no {slot}",
                variant.style
            )));
        }
    }

    Ok(StrategyOutput {
        seo,
        creative_variants,
    })
}

pub(crate) fn plan(bytes: &[u8]) -> Result<CampaignPlan, GatewayError> {
    let body: PlanBody = parse_body(bytes, "/feedback/creative")?;
    let raw = present(body.campaign_architect_output).ok_or_else(|| {
        GatewayError::Transport(
            "plan response carried no campaign_architect_output".to_string(),
        )
    })?;
    decode(raw, "campaign plan")
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchkit_model::fixtures;
    use serde_json::json;

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_analysis_accepts_valid_body() {
        let body = json!({
            "thread_id": " thread-1 ",
            "market_maven_output": fixtures::sample_analysis(),
            "current_step": "FEEDBACK_1"
        });
        let response = analysis(&bytes(body)).unwrap();
        assert_eq!(response.token, "thread-1");
        assert_eq!(response.analysis.target_audience_personas.len(), 3);
    }

    #[test]
    fn test_analysis_null_output_is_empty_result() {
        let body = json!({"thread_id": "t", "market_maven_output": null});
        assert!(matches!(
            analysis(&bytes(body)),
            Err(GatewayError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_analysis_without_personas_is_empty_result() {
        let mut output = fixtures::sample_analysis();
        output.target_audience_personas.clear();
        let body = json!({"thread_id": "t", "market_maven_output": output});
        assert!(matches!(
            analysis(&bytes(body)),
            Err(GatewayError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_analysis_blank_token_is_transport() {
        let body = json!({"thread_id": "  ", "market_maven_output": fixtures::sample_analysis()});
        assert!(matches!(
            analysis(&bytes(body)),
            Err(GatewayError::Transport(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_transport() {
        match analysis(b"<html>Bad Gateway</html>") {
            Err(GatewayError::Transport(msg)) => assert!(msg.contains("/start")),
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn test_strategy_accepts_valid_body() {
        let strategy_out = fixtures::sample_strategy();
        let body = json!({
            "seo_sage_output": strategy_out.seo,
            "creative_drafts": strategy_out.creative_variants,
            "current_step": "FEEDBACK_2"
        });
        assert_eq!(strategy(&bytes(body)).unwrap(), fixtures::sample_strategy());
    }

    #[test]
    fn test_strategy_without_drafts_is_transport() {
        let body = json!({"seo_sage_output": fixtures::sample_seo()});
        assert!(matches!(
            strategy(&bytes(body)),
            Err(GatewayError::Transport(_))
        ));
    }

    #[test]
    fn test_strategy_empty_drafts_is_empty_result() {
        let body = json!({"seo_sage_output": fixtures::sample_seo(), "creative_drafts": []});
        assert!(matches!(
            strategy(&bytes(body)),
            Err(GatewayError::EmptyResult(_))
        ));
    }

    #[test]
    fn test_strategy_variant_with_empty_captions_is_rejected() {
        let mut draft = fixtures::sample_creative_draft("Bold & Modern");
        draft.wordsmith.content_generation.social_media_posts[0]
            .captions
            .clear();
        let body = json!({"seo_sage_output": fixtures::sample_seo(), "creative_drafts": [draft]});
        match strategy(&bytes(body)) {
            Err(GatewayError::Transport(msg)) => {
                assert!(msg.contains("captions for Instagram"), "{msg}");
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_accepts_valid_body() {
        let body = json!({"campaign_architect_output": fixtures::sample_plan()});
        assert_eq!(plan(&bytes(body)).unwrap(), fixtures::sample_plan());
    }

    #[test]
    fn test_plan_missing_output_is_transport() {
        let body = json!({"current_step": "FINAL_OUTPUT"});
        assert!(matches!(plan(&bytes(body)), Err(GatewayError::Transport(_))));
    }
}
