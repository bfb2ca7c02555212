//! Landing app: configuration, effect execution and terminal presentation.
pub mod config;
pub mod effects;
pub mod logging;
pub mod notify;
pub mod render;
pub mod session;
pub mod ui;

pub use config::{AppConfig, Cli, ConfigError, OneShot};
pub use effects::EffectRunner;
pub use notify::{Notifier, TerminalNotifier};
pub use render::{BrowserPreviewRenderer, PreviewRenderer, RenderError, RenderedPreview};
pub use session::{Session, SubmitError};
