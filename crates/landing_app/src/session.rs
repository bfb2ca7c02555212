use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use engine_logging::engine_debug;
use landing_core::{
    update, AppState, AppViewModel, GenerationResult, LifecycleState, Msg, ValidationError,
    GENERIC_GENERATION_FAILURE,
};
use landing_engine::EngineHandle;

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::notify::TerminalNotifier;
use crate::render::{BrowserPreviewRenderer, RenderedPreview};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Preview contexts older than this are removed at startup.
const PREVIEW_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("a generation is already in progress")]
    Busy,
    #[error("{0}")]
    Failed(String),
}

/// Owns the one `AppState` and feeds it messages; the only place state changes.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Production wiring: reqwest engine, terminal notices, browser previews.
    pub fn from_config(config: &AppConfig) -> io::Result<Self> {
        let engine = EngineHandle::new(config.service.clone())?;
        let renderer = BrowserPreviewRenderer::new(config.preview_dir.clone(), config.open_preview);
        renderer.prune_stale(PREVIEW_RETENTION);
        Ok(Self::new(EffectRunner::new(
            engine,
            Box::new(TerminalNotifier),
            Box::new(renderer),
        )))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies `msg` and everything it triggers synchronously.
    pub fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            engine_debug!("dispatch {}", msg_name(&msg));
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }
    }

    pub fn set_fields(&mut self, theme: &str, geo: &str, domain: &str) {
        self.dispatch(Msg::ThemeChanged(theme.to_string()));
        self.dispatch(Msg::GeoChanged(geo.to_string()));
        self.dispatch(Msg::DomainChanged(domain.to_string()));
    }

    /// Validates the current fields, generates, and waits for the outcome.
    pub fn submit(&mut self) -> Result<GenerationResult, SubmitError> {
        if self.state.is_generating() {
            return Err(SubmitError::Busy);
        }
        let validation = self.state.form().to_request();
        self.dispatch(Msg::GenerateClicked);
        validation?;
        self.settle();

        match self.state.lifecycle() {
            LifecycleState::Succeeded(result) => Ok(result.clone()),
            LifecycleState::Failed(message) => Err(SubmitError::Failed(message.clone())),
            LifecycleState::Idle | LifecycleState::Generating => Err(SubmitError::Failed(
                GENERIC_GENERATION_FAILURE.to_string(),
            )),
        }
    }

    /// Fetches and renders the held result. Returns the viewing context on success.
    pub fn view_preview(&mut self) -> Option<RenderedPreview> {
        self.runner.take_last_preview();
        self.dispatch(Msg::PreviewClicked);
        self.settle();
        self.runner.take_last_preview()
    }

    /// Pumps engine events until no request is outstanding.
    ///
    /// Every accepted request yields an event, and a stopped engine fails the
    /// rest, so this always returns.
    pub fn settle(&mut self) {
        while self.runner.in_flight() > 0 {
            for msg in self.runner.next_msgs(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
    }
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::ThemeChanged(_) => "ThemeChanged",
        Msg::GeoChanged(_) => "GeoChanged",
        Msg::DomainChanged(_) => "DomainChanged",
        Msg::GenerateClicked => "GenerateClicked",
        Msg::GenerationFinished(Ok(_)) => "GenerationFinished(ok)",
        Msg::GenerationFinished(Err(_)) => "GenerationFinished(err)",
        Msg::PreviewClicked => "PreviewClicked",
        Msg::PreviewFetched { .. } => "PreviewFetched",
        Msg::PreviewRenderFailed(_) => "PreviewRenderFailed",
    }
}
