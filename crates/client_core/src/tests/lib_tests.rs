use super::*;
use axum::{extract::State, http::StatusCode as HttpStatus, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::{
    domain::{District, SoilType},
    error::RequestErrorKind,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct ServerState {
    status: HttpStatus,
    body: Value,
    delay: Duration,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn handle_recommend(
    State(state): State<ServerState>,
    Json(payload): Json<Value>,
) -> (HttpStatus, Json<Value>) {
    state.received.lock().await.push(payload);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, Json(state.body.clone()))
}

async fn spawn_service(
    status: HttpStatus,
    body: Value,
    delay: Duration,
) -> anyhow::Result<(String, Arc<Mutex<Vec<Value>>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status,
        body,
        delay,
        received: Arc::clone(&received),
    };
    let app = Router::new()
        .route("/api/recommend", post(handle_recommend))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api/recommend"), received))
}

fn recommendation_body() -> Value {
    json!({
        "inputs": {"district": "Madurai", "soil": {"N": 90, "P": 42, "K": 43, "pH": 6.5}},
        "weather_context": {"temperature": 28.46, "humidity": 71, "rainfall": 812.3},
        "top_recommendations": [
            {"crop": "Rice", "confidence": 88.1, "market_price": 2200, "price_trend": "up", "market_score": 80, "final_score": 0.91},
            {"crop": "Maize", "confidence": 70.4, "market_price": 1800, "price_trend": "down", "market_score": 60, "final_score": 0.77}
        ],
        "best_crop": "Rice",
        "fertilizer_plan": {
            "inputs": [{"fertilizer": "Urea", "quantity": 65.22, "unit": "kg/acre", "reason": "To supply Nitrogen"}],
            "schedule": ["Basal dose at sowing", "Top dress at 30 days"]
        },
        "analysis": "Based on Madurai's weather, Rice is the best option."
    })
}

fn request() -> RecommendationRequest {
    RecommendationRequest {
        district: District::from_name("Madurai").expect("district"),
        n: 90.0,
        p: 42.0,
        k: 43.0,
        ph: 6.5,
        soil_type: SoilType::Black,
    }
}

fn client(endpoint: &str) -> AdvisoryClient {
    AdvisoryClient::new(endpoint, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn posts_form_payload_and_parses_recommendation() {
    let (endpoint, received) =
        spawn_service(HttpStatus::OK, recommendation_body(), Duration::ZERO)
            .await
            .expect("spawn service");

    let result = client(&endpoint).recommend(&request()).await.expect("recommend");
    assert_eq!(result.best_crop, "Rice");
    assert_eq!(result.top_recommendations.len(), 2);
    assert_eq!(result.fertilizer_plan.schedule[1], "Top dress at 30 days");

    let received = received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0],
        json!({"district": "Madurai", "n": 90.0, "p": 42.0, "k": 43.0, "ph": 6.5, "soil_type": "Black"})
    );
}

#[tokio::test]
async fn error_body_with_success_status_is_a_service_failure() {
    let (endpoint, _) = spawn_service(
        HttpStatus::OK,
        json!({"error": "Model not loaded"}),
        Duration::ZERO,
    )
    .await
    .expect("spawn service");

    let err = client(&endpoint)
        .recommend(&request())
        .await
        .expect_err("service failure");
    assert_eq!(err.kind(), RequestErrorKind::Service);
    assert_eq!(err.message(), "Model not loaded");
}

#[tokio::test]
async fn non_success_status_reports_status_code() {
    let (endpoint, _) = spawn_service(
        HttpStatus::INTERNAL_SERVER_ERROR,
        json!({"detail": "boom"}),
        Duration::ZERO,
    )
    .await
    .expect("spawn service");

    let err = client(&endpoint)
        .recommend(&request())
        .await
        .expect_err("status failure");
    assert_eq!(err.kind(), RequestErrorKind::Service);
    assert_eq!(err.message(), "Request failed with status code 500");
}

#[tokio::test]
async fn body_missing_required_sections_is_malformed() {
    let (endpoint, _) = spawn_service(
        HttpStatus::OK,
        json!({"best_crop": "Rice"}),
        Duration::ZERO,
    )
    .await
    .expect("spawn service");

    let err = client(&endpoint)
        .recommend(&request())
        .await
        .expect_err("malformed");
    assert_eq!(err.kind(), RequestErrorKind::MalformedResponse);
    assert!(err.message().starts_with("malformed recommendation response"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}/api/recommend"))
        .recommend(&request())
        .await
        .expect_err("connection refused");
    assert_eq!(err.kind(), RequestErrorKind::Transport);
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn timeout_is_treated_as_transport_failure() {
    let (endpoint, _) = spawn_service(
        HttpStatus::OK,
        recommendation_body(),
        Duration::from_secs(3),
    )
    .await
    .expect("spawn service");

    let client = AdvisoryClient::new(&endpoint, Duration::from_millis(200)).expect("client");
    let err = client
        .recommend(&request())
        .await
        .expect_err("timeout");
    assert_eq!(err.kind(), RequestErrorKind::Transport);
}

#[tokio::test]
async fn controller_resolves_through_http_client() {
    let (endpoint, received) =
        spawn_service(HttpStatus::OK, recommendation_body(), Duration::ZERO)
            .await
            .expect("spawn service");
    let service = client(&endpoint);

    let mut controller = SubmissionController::new();
    controller.set_field(FormField::N, "90").expect("n");
    controller.set_field(FormField::P, "42").expect("p");
    controller.set_field(FormField::K, "43").expect("k");

    let decision = controller.submit_with(&service).await;
    assert!(matches!(decision, SubmitDecision::Dispatched(_)));
    assert_eq!(controller.phase(), RequestPhase::Resolved);
    let snapshot = controller.snapshot();
    assert_eq!(
        snapshot.result().map(|r| r.best_crop.as_str()),
        Some("Rice")
    );
    assert!(snapshot.error().is_none());
    assert_eq!(received.lock().await.len(), 1);
}

#[test]
fn rejects_non_http_endpoint() {
    assert!(AdvisoryClient::new("file:///tmp/advisor", Duration::from_secs(1)).is_err());

    let settings = Settings {
        endpoint: "file:///tmp/advisor".into(),
        ..Settings::default()
    };
    assert!(AdvisoryClient::from_settings(&settings).is_err());
}

#[test]
fn interpret_prefers_service_error_text_over_status() {
    let err = interpret_response(StatusCode::BAD_REQUEST, br#"{"error": "unknown district"}"#)
        .expect_err("service error");
    assert_eq!(err.message(), "unknown district");

    let err = interpret_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>")
        .expect_err("status error");
    assert_eq!(err.message(), "Request failed with status code 502");
}
