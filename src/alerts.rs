use std::io::Write;

use crate::error::ClipboardError;

/// The host's user-facing warning channel.
pub trait Notifier {
    fn warn(&mut self, message: &str);
}

/// Prints warnings on stderr so they do not overwrite the status line.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn warn(&mut self, message: &str) {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "\nwarning: {}", message).ok();
    }
}

/// Clipboard failures are never fatal: log them and tell the user.
pub fn report_copy_failure(notifier: &mut dyn Notifier, err: &ClipboardError) {
    log::warn!("stopwatch write clipboard: {}", err);
    notifier.warn(&format!("stopwatch copy to clipboard fail: {}", err));
}
