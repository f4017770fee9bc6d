use std::time::Duration;

use launchkit_gateway::{
    HttpClient, HttpPreviewRenderer, HttpStageGateway, PreviewRenderer, StageGateway,
};
use launchkit_model::fixtures;
use launchkit_utils::error::{GatewayError, PreviewError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client() -> HttpClient {
    HttpClient::new()
        .unwrap()
        .with_retry_backoff(Duration::from_millis(10))
}

fn gateway(server: &MockServer) -> HttpStageGateway {
    HttpStageGateway::with_client(&server.uri(), Duration::from_secs(5), fast_client()).unwrap()
}

#[tokio::test]
async fn full_run_posts_each_stage_with_the_token() {
    let server = MockServer::start().await;
    let brief = fixtures::sample_brief();
    let persona = fixtures::sample_persona("Fitness Felix");
    let strategy = fixtures::sample_strategy();
    let draft = strategy.creative_variants[1].clone();

    Mock::given(method("POST"))
        .and(path("/start"))
        .and(body_json(json!({ "user_input": brief })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "thread_id": fixtures::SAMPLE_TOKEN,
            "market_maven_output": fixtures::sample_analysis(),
            "current_step": "FEEDBACK_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/feedback/persona"))
        .and(body_json(json!({
            "thread_id": fixtures::SAMPLE_TOKEN,
            "selected_data": persona
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "seo_sage_output": strategy.seo,
            "creative_drafts": strategy.creative_variants,
            "current_step": "FEEDBACK_2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/feedback/creative"))
        .and(body_json(json!({
            "thread_id": fixtures::SAMPLE_TOKEN,
            "selected_data": draft
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaign_architect_output": fixtures::sample_plan(),
            "current_step": "FINAL_OUTPUT"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway(&server);

    let analysis = gw.run_analysis(&brief).await.unwrap();
    assert_eq!(analysis.token, fixtures::SAMPLE_TOKEN);
    assert_eq!(analysis.analysis, fixtures::sample_analysis());

    let strategy_out = gw.run_strategy(&analysis.token, &persona).await.unwrap();
    assert_eq!(strategy_out.creative_variants.len(), 3);

    let plan = gw.run_plan(&analysis.token, &draft).await.unwrap();
    assert_eq!(plan, fixtures::sample_plan());

    server.verify().await;
}

#[tokio::test]
async fn empty_persona_list_is_empty_result() {
    let server = MockServer::start().await;
    let mut analysis = fixtures::sample_analysis();
    analysis.target_audience_personas.clear();

    Mock::given(method("POST"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "thread_id": "t-1",
            "market_maven_output": analysis
        })))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .run_analysis(&fixtures::sample_brief())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::EmptyResult(_)), "{err:?}");
}

#[tokio::test]
async fn malformed_body_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback/creative"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Internal hiccup"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .run_plan("t-1", &fixtures::sample_creative_draft("Bold & Modern"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = gateway(&server)
        .run_analysis(&fixtures::sample_brief())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::ProviderAuth(_)), "{err:?}");
    server.verify().await;
}

#[tokio::test]
async fn server_errors_are_reported_as_outage_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback/persona"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = gateway(&server)
        .run_strategy("t-1", &fixtures::sample_persona("Fitness Felix"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::ProviderOutage(_)), "{err:?}");
    server.verify().await;
}

#[tokio::test]
async fn transient_failure_does_not_start_a_second_thread() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "thread_id": fixtures::SAMPLE_TOKEN,
            "market_maven_output": fixtures::sample_analysis(),
            "current_step": "FEEDBACK_1"
        })))
        .expect(0)
        .mount(&server)
        .await;

    let err = gateway(&server)
        .run_analysis(&fixtures::sample_brief())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::ProviderOutage(_)), "{err:?}");
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    server.verify().await;
}

#[tokio::test]
async fn preview_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50]))
        .expect(1)
        .mount(&server)
        .await;

    let renderer =
        HttpPreviewRenderer::with_client(&server.uri(), Duration::from_secs(5), fast_client())
            .unwrap();
    let image = renderer.generate_preview("anything").await.unwrap();
    assert_eq!(image.bytes, vec![0x89, 0x50]);
    server.verify().await;
}

#[tokio::test]
async fn blank_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = gateway(&server)
        .run_strategy("", &fixtures::sample_persona("Fitness Felix"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::MissingToken { .. }));
    server.verify().await;
}

#[tokio::test]
async fn preview_fetches_encoded_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Bottle%20glowing%20at%20dusk"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let renderer =
        HttpPreviewRenderer::with_client(&server.uri(), Duration::from_secs(5), fast_client())
            .unwrap();
    let image = renderer
        .generate_preview("Bottle glowing at dusk")
        .await
        .unwrap();

    assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
    assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));
    assert!(image.url.ends_with("/Bottle%20glowing%20at%20dusk"));
    server.verify().await;
}

#[tokio::test]
async fn empty_preview_body_is_empty_image() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let renderer =
        HttpPreviewRenderer::with_client(&server.uri(), Duration::from_secs(5), fast_client())
            .unwrap();
    assert_eq!(
        renderer.generate_preview("anything").await,
        Err(PreviewError::EmptyImage)
    );
}

#[tokio::test]
async fn preview_client_error_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let renderer =
        HttpPreviewRenderer::with_client(&server.uri(), Duration::from_secs(5), fast_client())
            .unwrap();
    assert!(matches!(
        renderer.generate_preview("anything").await,
        Err(PreviewError::Transport(_))
    ));
}
