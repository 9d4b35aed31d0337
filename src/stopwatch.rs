use log::debug;
use timer_core::{format_hms_ms, RecordLog, RecordMode, RecordStyle, TimerState};

use crate::clock::Clock;
use crate::command::Command;
use crate::storage::Settings;
use crate::timer::{Ticker, TimeObserver, Timer};

/// What the host has to do after a command was dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Copy(String),
}

/// Formatted time shown in the status item, refreshed by the timer.
#[derive(Debug)]
struct TimeText(String);

impl TimeObserver for TimeText {
    fn on_elapsed(&mut self, elapsed_ms: u64) {
        self.0 = format_hms_ms(elapsed_ms);
    }
}

/// The controller: one timer, its record log and the display flags.
pub struct Stopwatch {
    timer: Timer,
    records: RecordLog,
    mode: RecordMode,
    records_enabled: bool,
    visible: bool,
    text: TimeText,
}

impl Stopwatch {
    pub fn new(settings: &Settings, clock: Box<dyn Clock>, ticker: Box<dyn Ticker>) -> Self {
        Self {
            timer: Timer::new(clock, ticker),
            records: RecordLog::new(),
            mode: RecordMode::from_absolute(settings.default_abs_record),
            records_enabled: settings.enable_records,
            visible: settings.default_show,
            text: TimeText(format_hms_ms(0)),
        }
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.timer.elapsed_ms()
    }

    pub fn records(&self) -> &RecordLog {
        &self.records
    }

    pub fn record_mode(&self) -> RecordMode {
        self.mode
    }

    pub fn records_enabled(&self) -> bool {
        self.records_enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The formatted time currently displayed.
    pub fn current_time(&self) -> &str {
        &self.text.0
    }

    /// Starts from zero and drops all records.
    pub fn start(&mut self) {
        self.records.clear();
        self.timer.start(&mut self.text);
    }

    pub fn pause(&mut self) {
        if self.timer.state() != TimerState::Running {
            return;
        }
        self.timer.pause(&mut self.text);
    }

    /// `continue` in command terms.
    pub fn resume(&mut self) {
        if self.timer.state() != TimerState::Paused {
            return;
        }
        self.timer.resume(&mut self.text);
    }

    pub fn stop(&mut self) {
        self.timer.stop(&mut self.text);
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.timer.reset(&mut self.text);
    }

    /// Captures the current elapsed time without touching the timer.
    pub fn record(&mut self) {
        let elapsed = self.timer.elapsed_ms();
        self.records.push(elapsed);
        debug!("record {} at {} ms", self.records.len(), elapsed);
    }

    pub fn toggle_record_mode(&mut self) {
        self.mode = self.mode.toggled();
        debug!("record mode now {:?}", self.mode);
    }

    /// Hiding resets the timer and clears the records first.
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
        if !self.visible {
            self.reset();
        }
        debug!("visible: {}", self.visible);
    }

    pub fn records_as_text(&self, begin: &str, end: &str, delimiter: &str) -> String {
        self.records
            .render(self.mode, RecordStyle::new(begin, end, delimiter))
    }

    /// Returns whether the displayed time changed.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        self.timer.on_tick(generation, &mut self.text)
    }

    /// Applies a live settings change. Only `enable_records` is honored here;
    /// the other options stay as they were at construction.
    pub fn apply_live_settings(&mut self, settings: &Settings) -> bool {
        if self.records_enabled == settings.enable_records {
            return false;
        }
        self.records_enabled = settings.enable_records;
        debug!("records enabled: {}", self.records_enabled);
        true
    }

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Continue => self.resume(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::Record => self.record(),
            Command::ToggleRecordMode => self.toggle_record_mode(),
            Command::ToggleVisibility => self.toggle_visibility(),
            Command::CopyTime => return Outcome::Copy(self.current_time().to_string()),
            Command::CopyRecords => {
                let style = RecordStyle::PLAIN;
                return Outcome::Copy(self.records_as_text(style.begin, style.end, style.delimiter));
            }
        }
        Outcome::Redraw
    }

    /// Session teardown: back to Stopped/0 with no refresh pending.
    pub fn dispose(&mut self) {
        self.reset();
    }
}
