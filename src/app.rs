use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use flume::{Receiver, Sender};
use log::{debug, error, info};

use crate::alerts::{report_copy_failure, Notifier};
use crate::clipboard::Clipboard;
use crate::command::Command;
use crate::error::ClipboardError;
use crate::stopwatch::{Outcome, Stopwatch};
use crate::storage;
use crate::ui::{status_view, StatusSink};

/// Messages handled by the event loop, one at a time.
#[derive(Debug)]
pub enum AppOp {
    Command(Command),
    /// Click on the time text: runs whatever the current state offers.
    ClickPrimary,
    /// Click on the stop/reset button.
    ClickSecondary,
    /// Periodic tick tagged with the generation that armed it.
    Pump(u64),
    ConfigChanged,
    CopyFinished(Result<(), ClipboardError>),
    Quit,
}

pub struct App {
    stopwatch: Stopwatch,
    clipboard: Arc<dyn Clipboard>,
    notifier: Box<dyn Notifier>,
    sink: Box<dyn StatusSink>,
    config_path: Option<PathBuf>,
    tx: Sender<AppOp>,
}

impl App {
    pub fn new(
        stopwatch: Stopwatch,
        clipboard: Arc<dyn Clipboard>,
        notifier: Box<dyn Notifier>,
        sink: Box<dyn StatusSink>,
        config_path: Option<PathBuf>,
        tx: Sender<AppOp>,
    ) -> Self {
        Self {
            stopwatch,
            clipboard,
            notifier,
            sink,
            config_path,
            tx,
        }
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    /// Runs until [`AppOp::Quit`] or until every sender is gone, then tears
    /// the stopwatch down.
    pub fn run(&mut self, rx: Receiver<AppOp>) {
        self.redraw();
        while let Ok(op) = rx.recv() {
            if !self.handle(op) {
                break;
            }
        }
        self.stopwatch.dispose();
        info!("stopwatch closed");
    }

    /// Returns `false` when the loop should end.
    pub fn handle(&mut self, op: AppOp) -> bool {
        match op {
            AppOp::Command(command) => self.run_command(command),
            AppOp::ClickPrimary => {
                let command = status_view(&self.stopwatch).primary;
                self.run_command(command);
            }
            AppOp::ClickSecondary => {
                let command = status_view(&self.stopwatch).secondary.command;
                self.run_command(command);
            }
            AppOp::Pump(generation) => {
                if self.stopwatch.on_tick(generation) && self.stopwatch.is_visible() {
                    self.sink.draw_time(self.stopwatch.current_time());
                }
            }
            AppOp::ConfigChanged => self.reload_settings(),
            AppOp::CopyFinished(Ok(())) => debug!("copied to clipboard"),
            AppOp::CopyFinished(Err(e)) => report_copy_failure(self.notifier.as_mut(), &e),
            AppOp::Quit => return false,
        }
        true
    }

    fn run_command(&mut self, command: Command) {
        debug!("command {}", command.id());
        match self.stopwatch.dispatch(command) {
            Outcome::Redraw => self.redraw(),
            Outcome::Copy(text) => self.copy(text),
        }
    }

    fn redraw(&mut self) {
        let view = status_view(&self.stopwatch);
        self.sink.draw(&view);
    }

    /// The write happens on a worker thread; its result comes back as
    /// [`AppOp::CopyFinished`].
    fn copy(&mut self, text: String) {
        let clipboard = Arc::clone(&self.clipboard);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("clipboard".into())
            .spawn(move || {
                let result = clipboard.write_text(&text);
                tx.send(AppOp::CopyFinished(result)).ok();
            });
        if let Err(e) = spawned {
            report_copy_failure(self.notifier.as_mut(), &ClipboardError::Io(e));
        }
    }

    fn reload_settings(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        match storage::load_settings(path) {
            Ok(settings) => {
                if self.stopwatch.apply_live_settings(&settings) {
                    self.redraw();
                }
            }
            Err(e) => error!("keeping current settings: {}", e),
        }
    }
}
