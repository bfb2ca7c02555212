//! Interactive form session on top of `dialoguer`.

use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use landing_core::{Field, Msg};
use owo_colors::OwoColorize;

use super::render::render;
use crate::session::{Session, SubmitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    EditFields,
    Generate,
    ViewPreview,
    Quit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::EditFields => "Edit fields",
            Action::Generate => "Generate landing page",
            Action::ViewPreview => "View landing page",
            Action::Quit => "Quit",
        }
    }
}

pub fn run_interactive(session: &mut Session) -> Result<()> {
    loop {
        println!("\n{}", render(&session.view()));

        let actions = available_actions(session);
        let labels: Vec<&str> = actions.iter().map(|action| action.label()).collect();
        let selection = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()
            .context("Failed to get user input")?;

        match actions[selection] {
            Action::EditFields => edit_fields(session)?,
            Action::Generate => {
                println!("{}", session.view().generate_label().dimmed());
                // Validation and service failures were already shown as notices.
                match session.submit() {
                    Ok(_) | Err(SubmitError::Invalid(_)) | Err(SubmitError::Failed(_)) => {}
                    Err(SubmitError::Busy) => println!("A generation is already running."),
                }
            }
            Action::ViewPreview => {
                if let Some(preview) = session.view_preview() {
                    let verb = if preview.opened { "Opened" } else { "Wrote" };
                    println!("{verb} preview {}", preview.document.display());
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn available_actions(session: &Session) -> Vec<Action> {
    let view = session.view();
    let mut actions = Vec::with_capacity(4);
    if view.inputs_enabled {
        actions.push(Action::EditFields);
    }
    if view.generate_enabled {
        actions.push(Action::Generate);
    }
    if view.preview_enabled {
        actions.push(Action::ViewPreview);
    }
    actions.push(Action::Quit);
    actions
}

fn edit_fields(session: &mut Session) -> Result<()> {
    for field in Field::ALL {
        let current = session.state().form().get(field).to_string();
        let value: String = Input::new()
            .with_prompt(prompt_for(field))
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
            .context("Failed to get user input")?;
        let msg = match field {
            Field::Theme => Msg::ThemeChanged(value),
            Field::Geo => Msg::GeoChanged(value),
            Field::Domain => Msg::DomainChanged(value),
        };
        session.dispatch(msg);
    }
    Ok(())
}

fn prompt_for(field: Field) -> &'static str {
    match field {
        Field::Theme => "Business theme (e.g. Pizza delivery, Dentistry)",
        Field::Geo => "Location (e.g. Moscow, Novosibirsk)",
        Field::Domain => "Site domain (e.g. pizza-moscow.ru)",
    }
}
