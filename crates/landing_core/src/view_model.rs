use crate::GenerationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Generating,
    Succeeded,
    Failed,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Idle => "Ready",
            Status::Generating => "Generating...",
            Status::Succeeded => "Landing page created",
            Status::Failed => "Generation failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub theme: String,
    pub geo: String,
    pub domain: String,
    pub status: Status,
    pub last_error: Option<String>,
    pub inputs_enabled: bool,
    pub generate_enabled: bool,
    pub preview_enabled: bool,
    pub result: Option<ResultView>,
}

impl AppViewModel {
    pub fn generate_label(&self) -> &'static str {
        if self.status == Status::Generating {
            "Generating..."
        } else {
            "Generate landing page"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub domain: String,
    pub landing_id: String,
    pub preview_url: String,
}

impl From<&GenerationResult> for ResultView {
    fn from(result: &GenerationResult) -> Self {
        Self {
            domain: result.domain.clone(),
            landing_id: result.landing_id.clone(),
            preview_url: result.preview_url.clone(),
        }
    }
}
