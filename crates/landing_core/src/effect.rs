use crate::{GenerationRequest, Notice};

/// Side effects requested by `update`; executed by the app layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a notice to the user.
    Notify(Notice),
    /// Issue exactly one generation request.
    SubmitGeneration(GenerationRequest),
    /// Fetch the stored markup for `domain`.
    FetchPreview { domain: String },
    /// Render foreign markup in a fresh isolated viewing context.
    RenderPreview { domain: String, html: String },
}
