//! Hand-driven stand-ins for the host seams.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use crate::alerts::Notifier;
use crate::clipboard::Clipboard;
use crate::clock::Clock;
use crate::error::ClipboardError;
use crate::timer::{Ticker, TimeObserver};
use crate::ui::{StatusSink, StatusView};

#[derive(Clone, Default)]
pub(crate) struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

#[derive(Default)]
struct TickerLog {
    armed: Option<(u64, u64)>,
    arms: usize,
    disarms: usize,
}

#[derive(Clone, Default)]
pub(crate) struct ManualTicker(Rc<RefCell<TickerLog>>);

impl ManualTicker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `(interval_ms, generation)` currently armed.
    pub(crate) fn armed(&self) -> Option<(u64, u64)> {
        self.0.borrow().armed
    }

    pub(crate) fn arm_count(&self) -> usize {
        self.0.borrow().arms
    }

    pub(crate) fn disarm_count(&self) -> usize {
        self.0.borrow().disarms
    }
}

impl Ticker for ManualTicker {
    fn arm(&mut self, interval_ms: u64, generation: u64) {
        let mut log = self.0.borrow_mut();
        log.armed = Some((interval_ms, generation));
        log.arms += 1;
    }

    fn disarm(&mut self) {
        let mut log = self.0.borrow_mut();
        log.armed = None;
        log.disarms += 1;
    }
}

#[derive(Default)]
pub(crate) struct RecordingObserver {
    pub(crate) values: Vec<u64>,
}

impl RecordingObserver {
    pub(crate) fn last(&self) -> Option<u64> {
        self.values.last().copied()
    }
}

impl TimeObserver for RecordingObserver {
    fn on_elapsed(&mut self, elapsed_ms: u64) {
        self.values.push(elapsed_ms);
    }
}

/// Keeps every written text; fails every write when `failing`.
#[derive(Default)]
pub(crate) struct MemoryClipboard {
    pub(crate) written: Mutex<Vec<String>>,
    pub(crate) failing: bool,
}

impl MemoryClipboard {
    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            written: Mutex::default(),
            failing: true,
        })
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.failing {
            return Err(ClipboardError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "clipboard unavailable",
            )));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier(pub(crate) Rc<RefCell<Vec<String>>>);

impl Notifier for RecordingNotifier {
    fn warn(&mut self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub(crate) struct SinkLog {
    pub(crate) views: Vec<StatusView>,
    pub(crate) times: Vec<String>,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingSink(pub(crate) Rc<RefCell<SinkLog>>);

impl StatusSink for RecordingSink {
    fn draw(&mut self, view: &StatusView) {
        self.0.borrow_mut().views.push(view.clone());
    }

    fn draw_time(&mut self, text: &str) {
        self.0.borrow_mut().times.push(text.to_string());
    }
}
