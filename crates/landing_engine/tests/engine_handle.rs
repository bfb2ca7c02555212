use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use landing_engine::{
    EngineEvent, EngineHandle, FailureKind, GenerateBody, GeneratedLanding, LandingDocument,
    LandingService, ServiceError,
};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeService {
    generated: AtomicUsize,
}

#[async_trait::async_trait]
impl LandingService for FakeService {
    async fn generate(&self, body: &GenerateBody) -> Result<GeneratedLanding, ServiceError> {
        let n = self.generated.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GeneratedLanding {
            domain: body.domain.clone(),
            landing_id: n.to_string(),
            preview_url: format!("/preview/{}", body.domain),
        })
    }

    async fn retrieve(&self, domain: &str) -> Result<LandingDocument, ServiceError> {
        if domain == "missing.ru" {
            return Err(ServiceError {
                kind: FailureKind::ContentMissing,
                message: "landing page markup is missing".to_string(),
            });
        }
        Ok(LandingDocument {
            html_content: format!("<html>{domain}</html>"),
        })
    }
}

#[test]
fn generate_command_produces_completion_event() {
    let service = Arc::new(FakeService::default());
    let engine = EngineHandle::with_service(service.clone()).unwrap();

    engine.generate(GenerateBody {
        theme: "Pizza".to_string(),
        geo: "Moscow".to_string(),
        domain: "pizza-moscow.ru".to_string(),
    })
    .unwrap();

    match engine.recv_timeout(WAIT) {
        Ok(Some(EngineEvent::GenerationCompleted(Ok(landing)))) => {
            assert_eq!(landing.domain, "pizza-moscow.ru");
            assert_eq!(landing.landing_id, "1");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(service.generated.load(Ordering::SeqCst), 1);
}

#[test]
fn retrieve_command_reports_domain_with_result() {
    let engine = EngineHandle::with_service(Arc::new(FakeService::default())).unwrap();

    engine.retrieve("missing.ru").unwrap();

    match engine.recv_timeout(WAIT) {
        Ok(Some(EngineEvent::PreviewCompleted { domain, result })) => {
            assert_eq!(domain, "missing.ru");
            assert_eq!(result.unwrap_err().kind, FailureKind::ContentMissing);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(engine.try_recv(), Ok(None));
}

struct PanickingService;

#[async_trait::async_trait]
impl LandingService for PanickingService {
    async fn generate(&self, _body: &GenerateBody) -> Result<GeneratedLanding, ServiceError> {
        panic!("generation backend crashed");
    }

    async fn retrieve(&self, _domain: &str) -> Result<LandingDocument, ServiceError> {
        panic!("retrieval backend crashed");
    }
}

#[test]
fn panicking_generation_still_reports_a_failure() {
    let engine = EngineHandle::with_service(Arc::new(PanickingService)).unwrap();

    engine
        .generate(GenerateBody {
            theme: "Pizza".to_string(),
            geo: "Moscow".to_string(),
            domain: "pizza-moscow.ru".to_string(),
        })
        .unwrap();

    match engine.recv_timeout(WAIT) {
        Ok(Some(EngineEvent::GenerationCompleted(Err(err)))) => {
            assert_eq!(err.kind, FailureKind::Internal);
            assert_eq!(err.message, "request failed unexpectedly");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn panicking_retrieval_reports_failure_for_its_domain() {
    let engine = EngineHandle::with_service(Arc::new(PanickingService)).unwrap();

    engine.retrieve("pizza-moscow.ru").unwrap();

    match engine.recv_timeout(WAIT) {
        Ok(Some(EngineEvent::PreviewCompleted { domain, result })) => {
            assert_eq!(domain, "pizza-moscow.ru");
            assert_eq!(result.unwrap_err().kind, FailureKind::Internal);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn engine_keeps_serving_after_a_panicking_request() {
    let engine = EngineHandle::with_service(Arc::new(PanickingService)).unwrap();

    engine.retrieve("first.ru").unwrap();
    engine.retrieve("second.ru").unwrap();

    let mut domains = Vec::new();
    for _ in 0..2 {
        match engine.recv_timeout(WAIT) {
            Ok(Some(EngineEvent::PreviewCompleted { domain, .. })) => domains.push(domain),
            other => panic!("unexpected event {other:?}"),
        }
    }
    domains.sort();
    assert_eq!(domains, vec!["first.ru".to_string(), "second.ru".to_string()]);
}
