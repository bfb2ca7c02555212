//! Landing engine: HTTP client for the generation service and effect execution.
mod engine;
mod filename;
mod persist;
mod service;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use filename::preview_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use service::{LandingService, ReqwestLandingService, ServiceSettings};
pub use types::{EngineEvent, EngineStopped, FailureKind, ServiceError};
pub use wire::{GenerateBody, GeneratedLanding, LandingDocument};
