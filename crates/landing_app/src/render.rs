//! Rendering of untrusted landing markup.
//!
//! The markup is model output and is never sanitized. Every preview gets a
//! fresh private directory holding exactly one read-only document, opened by
//! the system browser from a `file://` URL outside any origin this app owns.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use landing_engine::{ensure_output_dir, preview_filename, AtomicFileWriter, PersistError};
use url::Url;

const CONTEXT_PREFIX: &str = "preview-";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not create viewing context: {0}")]
    Context(#[from] std::io::Error),
    #[error("could not write preview document: {0}")]
    Persist(#[from] PersistError),
    #[error("no file url for {0:?}")]
    FileUrl(PathBuf),
    #[error("browser refused to open {url}: {message}")]
    Open { url: String, message: String },
}

/// A finalized viewing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPreview {
    pub document: PathBuf,
    pub opened: bool,
}

/// The "render foreign document" capability.
pub trait PreviewRenderer {
    fn render(&self, domain: &str, html: &str) -> Result<RenderedPreview, RenderError>;
}

#[derive(Debug, Clone)]
pub struct BrowserPreviewRenderer {
    base_dir: PathBuf,
    open_browser: bool,
}

impl BrowserPreviewRenderer {
    pub fn new(base_dir: PathBuf, open_browser: bool) -> Self {
        Self {
            base_dir,
            open_browser,
        }
    }

    /// Removes viewing contexts left by earlier runs once they are older than `max_age`.
    ///
    /// Returns how many were removed. A context that cannot be inspected or
    /// removed is skipped.
    pub fn prune_stale(&self, max_age: Duration) -> usize {
        let Ok(entries) = fs::read_dir(&self.base_dir) else {
            return 0;
        };
        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !is_context_dir(&path) || !is_older_than(&path, max_age) {
                continue;
            }
            match fs::remove_dir_all(&path) {
                Ok(()) => removed += 1,
                Err(err) => engine_warn!("Could not remove stale preview {:?}: {}", path, err),
            }
        }
        if removed > 0 {
            engine_info!("Pruned {} stale preview context(s) in {:?}", removed, self.base_dir);
        }
        removed
    }

    fn create_context(&self) -> Result<PathBuf, RenderError> {
        ensure_output_dir(&self.base_dir)?;
        let dir = tempfile::Builder::new()
            .prefix(CONTEXT_PREFIX)
            .tempdir_in(&self.base_dir)?;
        // The document must outlive this process so the browser can read it.
        // Old contexts are removed by `prune_stale` on the next start.
        Ok(std::path::absolute(dir.keep())?)
    }
}

fn is_context_dir(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(CONTEXT_PREFIX))
}

fn is_older_than(path: &Path, max_age: Duration) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .is_some_and(|age| age >= max_age)
}

impl PreviewRenderer for BrowserPreviewRenderer {
    fn render(&self, domain: &str, html: &str) -> Result<RenderedPreview, RenderError> {
        let context = self.create_context()?;
        let writer = AtomicFileWriter::new(context);
        let document = writer.write_final(&preview_filename(domain), html)?;
        engine_info!(
            "Preview for {} written to {:?} ({} bytes)",
            domain,
            document,
            html.len()
        );

        if !self.open_browser {
            return Ok(RenderedPreview {
                document,
                opened: false,
            });
        }

        let url = Url::from_file_path(&document)
            .map_err(|_| RenderError::FileUrl(document.clone()))?;
        webbrowser::open(url.as_str()).map_err(|err| RenderError::Open {
            url: url.to_string(),
            message: err.to_string(),
        })?;
        engine_debug!("Opened {}", url);
        Ok(RenderedPreview {
            document,
            opened: true,
        })
    }
}
