use crate::{GenerationResult, PreviewArtifact};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the theme input.
    ThemeChanged(String),
    /// User edited the geography input.
    GeoChanged(String),
    /// User edited the domain input.
    DomainChanged(String),
    /// User asked to generate a landing page from the current inputs.
    GenerateClicked,
    /// The generation request resolved. `Err` carries the user-facing message.
    GenerationFinished(Result<GenerationResult, String>),
    /// User asked to view the held result.
    PreviewClicked,
    /// The preview retrieval for `domain` resolved.
    PreviewFetched {
        domain: String,
        result: Result<PreviewArtifact, String>,
    },
    /// The renderer could not open a viewing context.
    PreviewRenderFailed(String),
}
