//! Blocking user-facing alerts.

use std::io::Write;

pub trait Notifier {
    /// Show `message` and wait for the user to dismiss it.
    fn alert(&self, message: &str);
}

/// Writes alerts to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        tracing::debug!(message, "alert shown");
        let _ = writeln!(std::io::stderr().lock(), "alert: {message}");
    }
}
