//! Shared helpers for workspace integration tests.

#![allow(dead_code)]

use launchkit_model::fixtures;
use serde_json::json;
use std::path::{Path, PathBuf};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const THREAD_ID: &str = "thread-e2e";

/// Mount all three stage endpoints, answering from fixtures.
pub async fn mount_stage_service(server: &MockServer) {
    let strategy = fixtures::sample_strategy();

    Mock::given(method("POST"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "thread_id": THREAD_ID,
            "market_maven_output": fixtures::sample_analysis(),
            "current_step": "FEEDBACK_1"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/feedback/persona"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "seo_sage_output": strategy.seo,
            "creative_drafts": strategy.creative_variants,
            "current_step": "FEEDBACK_2"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/feedback/creative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaign_architect_output": fixtures::sample_plan(),
            "current_step": "FINAL_OUTPUT"
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub fn write_brief(dir: &Path) -> PathBuf {
    let path = dir.join("brief.json");
    std::fs::write(&path, serde_json::to_vec(&fixtures::sample_brief()).unwrap()).unwrap();
    path
}
