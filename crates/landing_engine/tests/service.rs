use std::time::Duration;

use landing_engine::{
    FailureKind, GenerateBody, GeneratedLanding, LandingService, ReqwestLandingService,
    ServiceSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ServiceSettings {
    let base = server.uri();
    ServiceSettings::new(
        Url::parse(&format!("{base}/generate")).unwrap(),
        Url::parse(&format!("{base}/landing")).unwrap(),
    )
}

fn service_for(server: &MockServer) -> ReqwestLandingService {
    ReqwestLandingService::new(settings_for(server)).unwrap()
}

fn pizza_body() -> GenerateBody {
    GenerateBody {
        theme: "Пицца".to_string(),
        geo: "Москва".to_string(),
        domain: "pizza-moscow.ru".to_string(),
    }
}

#[tokio::test]
async fn generate_posts_json_and_parses_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_json(json!({
            "theme": "Пицца",
            "geo": "Москва",
            "domain": "pizza-moscow.ru"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domain": "pizza-moscow.ru",
            "landing_id": "abc123",
            "preview_url": "https://abc123.example/",
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let landing = service_for(&server).generate(&pizza_body()).await.unwrap();

    assert_eq!(
        landing,
        GeneratedLanding {
            domain: "pizza-moscow.ru".to_string(),
            landing_id: "abc123".to_string(),
            preview_url: "https://abc123.example/".to_string(),
        }
    );
}

#[tokio::test]
async fn generate_surfaces_service_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "quota exceeded" })))
        .mount(&server)
        .await;

    let err = service_for(&server).generate(&pizza_body()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, "quota exceeded");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn generate_without_error_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = service_for(&server).generate(&pizza_body()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.message, "Generation failed");
}

#[tokio::test]
async fn generate_rejects_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "domain": "pizza-moscow.ru" })))
        .mount(&server)
        .await;

    let err = service_for(&server).generate(&pizza_body()).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Malformed);
    assert!(err.is_transport());
}

#[tokio::test]
async fn generate_times_out_on_slow_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        generate_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let service = ReqwestLandingService::new(settings).unwrap();

    let err = service.generate(&pizza_body()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.message, "request timed out");
}

#[tokio::test]
async fn generate_reports_unreachable_service_as_network_error() {
    let settings = ServiceSettings::new(
        Url::parse("http://127.0.0.1:9/generate").unwrap(),
        Url::parse("http://127.0.0.1:9/landing").unwrap(),
    );
    let service = ReqwestLandingService::new(settings).unwrap();

    let err = service.generate(&pizza_body()).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn retrieve_passes_domain_query_and_returns_markup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .and(query_param("domain", "pizza-moscow.ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "domain": "pizza-moscow.ru",
            "html_content": "<html>...</html>",
            "created_at": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let document = service_for(&server).retrieve("pizza-moscow.ru").await.unwrap();

    assert_eq!(document.html_content, "<html>...</html>");
}

#[tokio::test]
async fn retrieve_treats_missing_markup_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = service_for(&server).retrieve("pizza-moscow.ru").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::ContentMissing);
    assert_eq!(err.message, "landing page markup is missing");
}

#[tokio::test]
async fn retrieve_surfaces_not_found_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Landing not found" })))
        .mount(&server)
        .await;

    let err = service_for(&server).retrieve("nowhere.ru").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(err.message, "Landing not found");
}

#[tokio::test]
async fn retrieve_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string(r#"{"html_content":"0123456789"}"#),
        )
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let service = ReqwestLandingService::new(settings).unwrap();

    let err = service.retrieve("pizza-moscow.ru").await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}
