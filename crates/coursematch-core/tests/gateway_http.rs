//! Gateway tests against a mocked classification service.
//!
//! Each test starts its own mockito server and points an `HttpGateway` at
//! `<server>/api/`, the same layout the real service uses.

use coursematch_core::gateway::{Classifier, ClassifyRequest, HealthStatus, HttpGateway};
use coursematch_core::{GatewayError, Profile};
use mockito::Matcher;
use serde_json::json;

// ============================================================================
// Test Helpers
// ============================================================================

fn gateway_for(server: &mockito::ServerGuard) -> HttpGateway {
    HttpGateway::new(&format!("{}/api", server.url()), "classify/", "health/").unwrap()
}

fn request() -> ClassifyRequest {
    let mut profile = Profile::new();
    profile.add_subject("Mathematics");
    profile.add_hobby("chess");
    ClassifyRequest::from_profile(&profile)
}

/// A URL nothing is listening on.
fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/")
}

// ============================================================================
// classify
// ============================================================================

#[tokio::test]
async fn classify_posts_profile_and_parses_recommendations() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/classify/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "subjects": ["Mathematics"],
            "grades": {"Mathematics": "B"},
            "hobbies": ["chess"],
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": 7,
                "recommendations": [
                    {
                        "name": "Computer Science",
                        "description": "Algorithms and systems",
                        "fit_reason": "Strong in mathematics",
                        "career_paths": "Software Engineer, Data Scientist, "
                    },
                    {
                        "name": "Statistics",
                        "description": "",
                        "fit_reason": "",
                        "career_paths": ["Analyst"]
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let recs = gateway_for(&server).classify(&request()).await.unwrap();
    mock.assert_async().await;

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].name, "Computer Science");
    assert_eq!(recs[0].career_paths, vec!["Software Engineer", "Data Scientist"]);
    assert_eq!(recs[1].career_paths, vec!["Analyst"]);
}

#[tokio::test]
async fn classify_success_without_recommendations_is_empty_list() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(200)
        .with_body(r#"{"recommendations": []}"#)
        .create_async()
        .await;

    let recs = gateway_for(&server).classify(&request()).await.unwrap();
    assert!(recs.is_empty());
}

#[tokio::test]
async fn classify_success_with_nulls_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(201)
        .with_body(r#"{"id": 4, "recommendations": null}"#)
        .create_async()
        .await;
    let recs = gateway_for(&server).classify(&request()).await.unwrap();
    assert!(recs.is_empty());

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(201)
        .with_body(r#"{"recommendations": [{"name": "History", "description": null, "fit_reason": null}]}"#)
        .create_async()
        .await;
    let recs = gateway_for(&server).classify(&request()).await.unwrap();
    assert_eq!(recs[0].name, "History");
    assert_eq!(recs[0].description, "");
    assert!(recs[0].career_paths.is_empty());
}

#[tokio::test]
async fn server_error_message_comes_from_error_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(500)
        .with_body(r#"{"error": "model unavailable"}"#)
        .create_async()
        .await;

    let err = gateway_for(&server).classify(&request()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "model unavailable");
}

#[tokio::test]
async fn validation_mapping_is_flattened() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(400)
        .with_body(r#"{"subjects": ["This list may not be empty."]}"#)
        .create_async()
        .await;

    let err = gateway_for(&server).classify(&request()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation errors: subjects: This list may not be empty."
    );
}

#[tokio::test]
async fn error_list_body_is_flattened_by_index() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(400)
        .with_body(r#"["Profile must include subjects"]"#)
        .create_async()
        .await;

    let err = gateway_for(&server).classify(&request()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation errors: 0: Profile must include subjects"
    );
}

#[tokio::test]
async fn empty_failure_body_names_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(502)
        .with_body("")
        .create_async()
        .await;

    let err = gateway_for(&server).classify(&request()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Server returned empty response (502). Check if the classification service is running."
    );
}

#[tokio::test]
async fn html_failure_body_is_quoted() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(500)
        .with_body("<html><body>Internal Server Error</body></html>")
        .create_async()
        .await;

    let err = gateway_for(&server).classify(&request()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Server error (500): <html><body>Internal Server Error</body></html>"
    );
}

#[tokio::test]
async fn garbage_success_body_is_invalid_format() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/classify/")
        .with_status(200)
        .with_body("recommendations: none")
        .create_async()
        .await;

    let err = gateway_for(&server).classify(&request()).await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidFormat(_)));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let url = dead_url();
    let gateway = HttpGateway::new(&url, "classify/", "health/").unwrap();
    let err = gateway.classify(&request()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));
    assert!(err.to_string().starts_with("Cannot connect to the classification service at"));
}

// ============================================================================
// health
// ============================================================================

#[tokio::test]
async fn health_reports_model_configuration() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/health/")
        .with_status(200)
        .with_body(r#"{"status": "ok", "openai_configured": true}"#)
        .create_async()
        .await;

    let status = gateway_for(&server).health().await;
    assert_eq!(status, HealthStatus::Connected { model_configured: true });
}

#[tokio::test]
async fn health_non_success_is_not_responding() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/health/")
        .with_status(503)
        .create_async()
        .await;

    let status = gateway_for(&server).health().await;
    assert_eq!(status, HealthStatus::NotResponding { code: 503 });
}

#[tokio::test]
async fn health_unreachable() {
    let url = dead_url();
    let gateway = HttpGateway::new(&url, "classify/", "health/").unwrap();
    assert!(matches!(gateway.health().await, HealthStatus::Unreachable { .. }));
}
