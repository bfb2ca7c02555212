use crate::view_model::{AppViewModel, ResultView, Status};
use crate::{Field, FormFields, GenerationResult};

/// Lifecycle of the single generation slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Generating,
    Succeeded(GenerationResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormFields,
    lifecycle: LifecycleState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.lifecycle, LifecycleState::Generating)
    }

    /// The held result, if the last generation succeeded.
    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.lifecycle {
            LifecycleState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let generating = self.is_generating();
        let (status, last_error) = match &self.lifecycle {
            LifecycleState::Idle => (Status::Idle, None),
            LifecycleState::Generating => (Status::Generating, None),
            LifecycleState::Succeeded(_) => (Status::Succeeded, None),
            LifecycleState::Failed(message) => (Status::Failed, Some(message.clone())),
        };
        AppViewModel {
            theme: self.form.theme.clone(),
            geo: self.form.geo.clone(),
            domain: self.form.domain.clone(),
            status,
            last_error,
            inputs_enabled: !generating,
            generate_enabled: !generating,
            preview_enabled: self.result().is_some(),
            result: self.result().map(ResultView::from),
        }
    }

    /// Field edits are ignored while a generation is outstanding.
    pub(crate) fn edit_field(&mut self, field: Field, value: String) -> bool {
        if self.is_generating() || self.form.get(field) == value {
            return false;
        }
        self.form.set(field, value);
        true
    }

    /// Compare-and-set into `Generating`. Any held result is dropped here.
    pub(crate) fn begin_generation(&mut self) -> bool {
        if self.is_generating() {
            return false;
        }
        self.lifecycle = LifecycleState::Generating;
        true
    }

    pub(crate) fn complete_generation(&mut self, result: GenerationResult) {
        self.lifecycle = LifecycleState::Succeeded(result);
    }

    pub(crate) fn fail_generation(&mut self, message: String) {
        self.lifecycle = LifecycleState::Failed(message);
    }
}
