use std::collections::VecDeque;
use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn};
use landing_core::{Effect, GenerationRequest, GenerationResult, Msg, PreviewArtifact};
use landing_engine::{EngineEvent, EngineHandle, EngineStopped, GenerateBody, GeneratedLanding};

use crate::notify::Notifier;
use crate::render::{PreviewRenderer, RenderedPreview};

/// Executes core effects against the engine, the notifier and the renderer.
pub struct EffectRunner {
    engine: EngineHandle,
    notifier: Box<dyn Notifier>,
    renderer: Box<dyn PreviewRenderer>,
    pending: VecDeque<Pending>,
    last_preview: Option<RenderedPreview>,
}

/// An engine request that has been accepted but not answered.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Generation,
    Preview { domain: String },
}

impl Pending {
    /// The message that resolves this request when the engine cannot answer it.
    fn into_failure(self, err: EngineStopped) -> Msg {
        match self {
            Pending::Generation => Msg::GenerationFinished(Err(err.to_string())),
            Pending::Preview { domain } => Msg::PreviewFetched {
                domain,
                result: Err(err.to_string()),
            },
        }
    }

    fn answered_by(&self, event: &EngineEvent) -> bool {
        match (self, event) {
            (Pending::Generation, EngineEvent::GenerationCompleted(_)) => true,
            (Pending::Preview { domain }, EngineEvent::PreviewCompleted { domain: got, .. }) => {
                domain == got
            }
            _ => false,
        }
    }
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        notifier: Box<dyn Notifier>,
        renderer: Box<dyn PreviewRenderer>,
    ) -> Self {
        Self {
            engine,
            notifier,
            renderer,
            pending: VecDeque::new(),
            last_preview: None,
        }
    }

    /// Runs `effects` in order. Returns follow-up messages produced on the spot.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Notify(notice) => self.notifier.notify(&notice),
                Effect::SubmitGeneration(request) => {
                    engine_info!(
                        "SubmitGeneration domain={} theme_len={} geo_len={}",
                        request.domain(),
                        request.theme().len(),
                        request.geo().len()
                    );
                    match self.engine.generate(to_body(&request)) {
                        Ok(()) => self.pending.push_back(Pending::Generation),
                        Err(err) => follow_ups.push(Pending::Generation.into_failure(err)),
                    }
                }
                Effect::FetchPreview { domain } => {
                    engine_info!("FetchPreview domain={}", domain);
                    match self.engine.retrieve(domain.clone()) {
                        Ok(()) => self.pending.push_back(Pending::Preview { domain }),
                        Err(err) => follow_ups.push(Pending::Preview { domain }.into_failure(err)),
                    }
                }
                Effect::RenderPreview { domain, html } => {
                    match self.renderer.render(&domain, &html) {
                        Ok(preview) => self.last_preview = Some(preview),
                        Err(err) => {
                            engine_warn!("Preview for {} could not be rendered: {}", domain, err);
                            follow_ups.push(Msg::PreviewRenderFailed(err.to_string()));
                        }
                    }
                }
            }
        }
        follow_ups
    }

    /// Number of engine requests that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Waits up to `timeout` for the next engine event and maps it to messages.
    ///
    /// If the engine has stopped, every outstanding request is resolved as a failure.
    pub fn next_msgs(&mut self, timeout: Duration) -> Vec<Msg> {
        match self.engine.recv_timeout(timeout) {
            Ok(Some(event)) => {
                if let Some(index) = self.pending.iter().position(|p| p.answered_by(&event)) {
                    self.pending.remove(index);
                }
                vec![map_event(event)]
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                engine_error!("{} with {} request(s) outstanding", err, self.pending.len());
                self.pending
                    .drain(..)
                    .map(|pending| pending.into_failure(err))
                    .collect()
            }
        }
    }

    pub fn take_last_preview(&mut self) -> Option<RenderedPreview> {
        self.last_preview.take()
    }
}

fn to_body(request: &GenerationRequest) -> GenerateBody {
    GenerateBody {
        theme: request.theme().to_string(),
        geo: request.geo().to_string(),
        domain: request.domain().to_string(),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::GenerationCompleted(result) => Msg::GenerationFinished(
            result.map(to_result).map_err(|err| {
                engine_warn!("Generation failed ({}): {}", err.kind, err.message);
                err.message
            }),
        ),
        EngineEvent::PreviewCompleted { domain, result } => Msg::PreviewFetched {
            domain,
            result: result
                .map(|document| PreviewArtifact {
                    html_content: document.html_content,
                })
                .map_err(|err| {
                    engine_warn!("Preview retrieval failed ({}): {}", err.kind, err.message);
                    err.message
                }),
        },
    }
}

fn to_result(landing: GeneratedLanding) -> GenerationResult {
    GenerationResult {
        domain: landing.domain,
        landing_id: landing.landing_id,
        preview_url: landing.preview_url,
    }
}
