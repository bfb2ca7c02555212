//! Landing core: pure generation lifecycle state machine and view-model helpers.
mod effect;
mod msg;
mod notice;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use notice::{Notice, Severity};
pub use request::{
    validate, Field, FormFields, GenerationRequest, GenerationResult, PreviewArtifact,
    ValidationError,
};
pub use state::{AppState, LifecycleState};
pub use update::{update, GENERIC_GENERATION_FAILURE};
pub use view_model::{AppViewModel, ResultView, Status};
