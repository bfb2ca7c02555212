use std::sync::Once;

use landing_core::{update, AppState, Effect, LifecycleState, Msg, Notice, Severity};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn fill(theme: &str, geo: &str, domain: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::ThemeChanged(theme.to_string()));
    let (state, _) = update(state, Msg::GeoChanged(geo.to_string()));
    let (state, _) = update(state, Msg::DomainChanged(domain.to_string()));
    state
}

fn is_submission(effect: &Effect) -> bool {
    matches!(effect, Effect::SubmitGeneration(_))
}

#[test]
fn any_empty_field_blocks_submission_with_one_notice() {
    init_logging();
    let cases = [
        ("", "Moscow", "pizza-moscow.ru"),
        ("Pizza", "", "pizza-moscow.ru"),
        ("Pizza", "Moscow", ""),
        ("", "", ""),
    ];

    for (theme, geo, domain) in cases {
        let (next, effects) = update(fill(theme, geo, domain), Msg::GenerateClicked);

        assert!(!effects.iter().any(is_submission), "case {theme:?}/{geo:?}/{domain:?}");
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::error("Error", "Fill in all fields"))]
        );
        assert_eq!(next.lifecycle(), &LifecycleState::Idle);
    }
}

#[test]
fn whitespace_only_counts_as_empty() {
    init_logging();
    let (next, effects) = update(fill("Pizza", "   ", "pizza-moscow.ru"), Msg::GenerateClicked);

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::Notify(notice) => assert_eq!(notice.severity, Severity::Error),
        other => panic!("unexpected effect {other:?}"),
    }
    assert!(!next.is_generating());
}

#[test]
fn valid_fields_submit_trimmed_request() {
    init_logging();
    let (next, effects) = update(
        fill(" Пицца ", "Москва", " pizza-moscow.ru\n"),
        Msg::GenerateClicked,
    );

    assert_eq!(next.lifecycle(), &LifecycleState::Generating);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitGeneration(request) => {
            assert_eq!(request.theme(), "Пицца");
            assert_eq!(request.geo(), "Москва");
            assert_eq!(request.domain(), "pizza-moscow.ru");
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn validation_failure_keeps_previous_result() {
    init_logging();
    let state = fill("Pizza", "Moscow", "pizza-moscow.ru");
    let (state, _) = update(state, Msg::GenerateClicked);
    let result = landing_core::GenerationResult {
        domain: "pizza-moscow.ru".to_string(),
        landing_id: "abc123".to_string(),
        preview_url: "https://abc123.example/".to_string(),
    };
    let (state, _) = update(state, Msg::GenerationFinished(Ok(result.clone())));
    let (state, _) = update(state, Msg::ThemeChanged(String::new()));

    let (next, effects) = update(state, Msg::GenerateClicked);

    assert!(!effects.iter().any(is_submission));
    assert_eq!(next.result(), Some(&result));
}
