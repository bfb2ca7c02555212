use std::io::Write;

use engine_logging::{engine_info, engine_warn};
use landing_core::{Notice, Severity};
use owo_colors::OwoColorize;

/// Receives every user-facing notice the core emits.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Prints notices as coloured one-liners: info to stdout, errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.severity {
            Severity::Info => {
                engine_info!("notice: {} - {}", notice.title, notice.description);
                let mut out = std::io::stdout().lock();
                let _ = writeln!(
                    out,
                    "{} {}",
                    format!("✔ {}", notice.title).green().bold(),
                    notice.description
                );
            }
            Severity::Error => {
                engine_warn!("notice: {} - {}", notice.title, notice.description);
                let mut err = std::io::stderr().lock();
                let _ = writeln!(
                    err,
                    "{} {}",
                    format!("✖ {}", notice.title).red().bold(),
                    notice.description
                );
            }
        }
    }
}
