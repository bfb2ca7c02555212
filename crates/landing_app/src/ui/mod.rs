//! Terminal presentation: view rendering, the interactive form and one-shot runs.
mod oneshot;
mod prompt;
pub mod render;

pub use oneshot::run_one_shot;
pub use prompt::run_interactive;
