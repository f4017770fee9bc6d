use async_trait::async_trait;
use launchkit_config::Config;
use launchkit_model::{CampaignPlan, CreativeDraft, Persona, StrategyOutput, UserBrief};
use launchkit_utils::error::GatewayError;
use launchkit_utils::types::Stage;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::http_client::HttpClient;
use crate::types::{AnalysisResponse, StageGateway};
use crate::validate;

const SERVICE_NAME: &str = "stage-service";

#[derive(Serialize)]
struct StartRequest<'a> {
    user_input: &'a UserBrief,
}

#[derive(Serialize)]
struct FeedbackRequest<'a, T: Serialize> {
    thread_id: &'a str,
    selected_data: &'a T,
}

/// [`StageGateway`] over the stage service's HTTP API.
///
/// | Stage    | Request                                              |
/// |----------|------------------------------------------------------|
/// | analysis | `POST /start {user_input}`                           |
/// | strategy | `POST /feedback/persona {thread_id, selected_data}`  |
/// | plan     | `POST /feedback/creative {thread_id, selected_data}` |
///
/// Each stage call is issued exactly once. The service advances its thread
/// on every accepted POST, so a retried call could run a stage twice; any
/// retry budget on the supplied [`HttpClient`] is cleared.
#[derive(Clone)]
pub struct HttpStageGateway {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
}

impl HttpStageGateway {
    /// # Errors
    ///
    /// Returns `GatewayError::Misconfiguration` when `base_url` is not an
    /// absolute http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        Self::with_client(base_url, timeout, HttpClient::new()?)
    }

    pub fn with_client(
        base_url: &str,
        timeout: Duration,
        http: HttpClient,
    ) -> Result<Self, GatewayError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            http: http.with_max_retries(0),
            base_url,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        Self::new(config.gateway_url(), config.gateway_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                GatewayError::Misconfiguration(format!(
                    "base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Vec<u8>, GatewayError> {
        let url = self.endpoint(segments)?;
        debug!(service = SERVICE_NAME, url = %url, "Posting stage request");

        let request = self.http.inner().post(url).json(body);
        let response = self
            .http
            .execute_with_retry(request, self.timeout, SERVICE_NAME)
            .await?;

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout {
                    duration: self.timeout,
                }
            } else {
                GatewayError::Transport(format!("failed to read {SERVICE_NAME} response: {e}"))
            }
        })?;
        Ok(bytes.to_vec())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, GatewayError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| GatewayError::Misconfiguration(format!("invalid base URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayError::Misconfiguration(format!(
            "base URL must use http or https: {raw}"
        )));
    }
    if url.cannot_be_a_base() {
        return Err(GatewayError::Misconfiguration(format!(
            "base URL cannot carry a path: {raw}"
        )));
    }
    Ok(url)
}

fn require_token(token: &str, stage: Stage) -> Result<&str, GatewayError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(GatewayError::MissingToken { stage });
    }
    Ok(token)
}

#[async_trait]
impl StageGateway for HttpStageGateway {
    async fn run_analysis(&self, brief: &UserBrief) -> Result<AnalysisResponse, GatewayError> {
        let body = self
            .post(&["start"], &StartRequest { user_input: brief })
            .await?;
        let response = validate::analysis(&body)?;
        info!(
            personas = response.analysis.target_audience_personas.len(),
            "Market analysis received"
        );
        Ok(response)
    }

    async fn run_strategy(
        &self,
        token: &str,
        persona: &Persona,
    ) -> Result<StrategyOutput, GatewayError> {
        let token = require_token(token, Stage::StrategyRunning)?;
        let request = FeedbackRequest {
            thread_id: token,
            selected_data: persona,
        };
        let body = self.post(&["feedback", "persona"], &request).await?;
        let output = validate::strategy(&body)?;
        info!(
            variants = output.creative_variants.len(),
            "Strategy received"
        );
        Ok(output)
    }

    async fn run_plan(
        &self,
        token: &str,
        draft: &CreativeDraft,
    ) -> Result<CampaignPlan, GatewayError> {
        let token = require_token(token, Stage::PlanRunning)?;
        let request = FeedbackRequest {
            thread_id: token,
            selected_data: draft,
        };
        let body = self.post(&["feedback", "creative"], &request).await?;
        let plan = validate::plan(&body)?;
        info!(
            channels = plan.launch_campaign_strategy.recommended_channels.len(),
            "Launch plan received"
        );
        Ok(plan)
    }

    fn name(&self) -> &'static str {
        SERVICE_NAME
    }
}
