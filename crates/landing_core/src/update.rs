use crate::{AppState, Effect, Field, Msg, Notice};

/// Used when the service fails without an explanation of its own.
pub const GENERIC_GENERATION_FAILURE: &str = "Generation failed";

const ERROR_TITLE: &str = "Error";
const PREVIEW_ERROR_TITLE: &str = "Preview failed";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ThemeChanged(text) => edit(&mut state, Field::Theme, text),
        Msg::GeoChanged(text) => edit(&mut state, Field::Geo, text),
        Msg::DomainChanged(text) => edit(&mut state, Field::Domain, text),
        Msg::GenerateClicked => {
            // Single-flight: a second submission while one is outstanding is dropped.
            if state.is_generating() {
                return (state, Vec::new());
            }
            match state.form().to_request() {
                Ok(request) => {
                    state.begin_generation();
                    vec![Effect::SubmitGeneration(request)]
                }
                Err(_) => vec![Effect::Notify(Notice::error(
                    ERROR_TITLE,
                    "Fill in all fields",
                ))],
            }
        }
        Msg::GenerationFinished(outcome) => {
            // A completion with nothing outstanding is stale; ignore it.
            if !state.is_generating() {
                return (state, Vec::new());
            }
            match outcome {
                Ok(result) => {
                    state.complete_generation(result);
                    vec![Effect::Notify(Notice::info(
                        "Done",
                        "Landing page created",
                    ))]
                }
                Err(message) => {
                    let message = non_empty_or(message, GENERIC_GENERATION_FAILURE);
                    state.fail_generation(message.clone());
                    vec![Effect::Notify(Notice::error(ERROR_TITLE, message))]
                }
            }
        }
        Msg::PreviewClicked => match state.result() {
            Some(result) => vec![Effect::FetchPreview {
                domain: result.domain.clone(),
            }],
            None => Vec::new(),
        },
        Msg::PreviewFetched { domain, result } => match result {
            Ok(artifact) => vec![Effect::RenderPreview {
                domain,
                html: artifact.html_content,
            }],
            Err(message) => vec![Effect::Notify(Notice::error(
                PREVIEW_ERROR_TITLE,
                non_empty_or(message, "Preview could not be loaded"),
            ))],
        },
        Msg::PreviewRenderFailed(message) => vec![Effect::Notify(Notice::error(
            PREVIEW_ERROR_TITLE,
            format!("Preview could not be opened: {message}"),
        ))],
    };

    (state, effects)
}

fn edit(state: &mut AppState, field: Field, text: String) -> Vec<Effect> {
    state.edit_field(field, text);
    Vec::new()
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
