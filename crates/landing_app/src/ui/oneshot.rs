use anyhow::{bail, Result};

use super::render::render;
use crate::config::OneShot;
use crate::session::Session;

/// One generation from command line values, optionally followed by a preview.
///
/// Notices have already been printed by the notifier when this returns an error.
pub fn run_one_shot(session: &mut Session, request: &OneShot) -> Result<()> {
    session.set_fields(&request.theme, &request.geo, &request.domain);
    let submitted = session.submit();
    println!("{}", render(&session.view()));
    if let Err(err) = submitted {
        bail!("generation did not complete: {err}");
    }

    if request.preview {
        match session.view_preview() {
            Some(preview) => println!("Preview: {}", preview.document.display()),
            None => bail!("preview could not be shown"),
        }
    }
    Ok(())
}
