use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ClipboardError;
use crate::storage::ClipboardSettings;

/// Text clipboard write primitive. Called off the event-loop thread.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies through the terminal with an OSC 52 escape sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct Osc52Clipboard;

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Pipes the text into an external program such as `wl-copy` or `pbcopy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// `None` when `argv` is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        let status = child.wait()?;
        if !status.success() {
            return Err(ClipboardError::Exit {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}

pub fn from_settings(settings: &ClipboardSettings) -> Arc<dyn Clipboard> {
    match CommandClipboard::from_argv(&settings.command) {
        Some(clipboard) => {
            log::info!("copying through {}", clipboard.program);
            Arc::new(clipboard)
        }
        None => Arc::new(Osc52Clipboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("00:00:01:000"), "\x1b]52;c;MDA6MDA6MDE6MDAw\x07");
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_command_from_argv() {
        assert_eq!(CommandClipboard::from_argv(&[]), None);
        let argv = vec!["xclip".to_string(), "-selection".to_string(), "clipboard".to_string()];
        let clipboard = CommandClipboard::from_argv(&argv).unwrap();
        assert_eq!(clipboard.program, "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clipboard"]);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let clipboard = CommandClipboard::from_argv(&["light-stopwatch-no-such-program".to_string()])
            .unwrap();
        let err = clipboard.write_text("x").unwrap_err();
        assert!(matches!(err, ClipboardError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_exit_status_is_checked() {
        let ok = CommandClipboard::from_argv(&["cat".to_string()]).unwrap();
        assert!(ok.write_text("x").is_ok());
        let argv = ["sh", "-c", "cat >/dev/null; exit 3"].map(String::from);
        let failing = CommandClipboard::from_argv(&argv).unwrap();
        assert!(matches!(
            failing.write_text("x"),
            Err(ClipboardError::Exit { .. })
        ));
    }
}
