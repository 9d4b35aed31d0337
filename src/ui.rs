use std::fmt::Write as _;
use std::io::Write;

use timer_core::{RecordStyle, TimerState};

use crate::command::Command;
use crate::stopwatch::Stopwatch;

/// The small button next to the time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub icon: &'static str,
    pub command: Command,
    pub tooltip: &'static str,
}

/// Everything a host needs to draw the status item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusView {
    pub visible: bool,
    pub text: String,
    pub state: TimerState,
    /// Command run by clicking the time.
    pub primary: Command,
    pub secondary: Button,
    /// Record table header and rows, if records are enabled and present.
    pub records_table: Option<String>,
    /// Markdown tooltip with command links.
    pub tooltip: String,
}

/// Where status views end up.
pub trait StatusSink {
    fn draw(&mut self, view: &StatusView);
    /// Cheap refresh of the time only, used for periodic ticks.
    fn draw_time(&mut self, text: &str);
}

fn state_label(state: TimerState) -> &'static str {
    match state {
        TimerState::Stopped => "Stopped",
        TimerState::Running => "Running",
        TimerState::Paused => "Paused",
    }
}

fn click_hint(state: TimerState) -> &'static str {
    match state {
        TimerState::Stopped => "click to start",
        TimerState::Running => "click to pause",
        TimerState::Paused => "click to continue",
    }
}

fn primary_command(state: TimerState) -> Command {
    match state {
        TimerState::Stopped => Command::Start,
        TimerState::Running => Command::Pause,
        TimerState::Paused => Command::Continue,
    }
}

fn secondary_button(state: TimerState) -> Button {
    match state {
        TimerState::Running => Button {
            icon: "$(debug-stop)",
            command: Command::Stop,
            tooltip: "Stop",
        },
        TimerState::Stopped | TimerState::Paused => Button {
            icon: "$(discard)",
            command: Command::Reset,
            tooltip: "Reset",
        },
    }
}

fn command_link(label: &str, command: Command) -> String {
    format!("[{}](command:{} \"{}\")", label, command.id(), command.title())
}

fn records_table(sw: &Stopwatch) -> Option<String> {
    if !sw.records_enabled() || sw.records().is_empty() {
        return None;
    }
    let style = RecordStyle::TABLE;
    Some(format!(
        "|Item|{}|\n|---|---|\n{}",
        sw.record_mode().column_label(),
        sw.records_as_text(style.begin, style.end, style.delimiter)
    ))
}

pub fn status_view(sw: &Stopwatch) -> StatusView {
    let state = sw.state();
    let records_table = records_table(sw);

    let mut tooltip = String::new();
    if sw.records_enabled() {
        write!(
            tooltip,
            "Records &nbsp;{} {} {}",
            command_link("$(diff-added)", Command::Record),
            command_link("$(copy)", Command::CopyRecords),
            command_link("$(list-selection)", Command::ToggleRecordMode),
        )
        .ok();
        if let Some(table) = &records_table {
            write!(tooltip, "\n{}", table).ok();
        }
        tooltip.push_str("\n\n----\n");
    }
    write!(
        tooltip,
        "{} | *{}* &nbsp;&nbsp;{} | {}",
        state_label(state),
        click_hint(state),
        command_link("$(copy)", Command::CopyTime),
        command_link("$(circle-slash)Hide", Command::ToggleVisibility),
    )
    .ok();

    StatusView {
        visible: sw.is_visible(),
        text: sw.current_time().to_string(),
        state,
        primary: primary_command(state),
        secondary: secondary_button(state),
        records_table,
        tooltip,
    }
}

/// Draws on a plain terminal: the table above, the status line last so
/// ticks can rewrite it in place.
#[derive(Debug, Default)]
pub struct TerminalSink {
    hidden_shown: bool,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusSink for TerminalSink {
    fn draw(&mut self, view: &StatusView) {
        let mut out = std::io::stdout().lock();
        if !view.visible {
            if !self.hidden_shown {
                write!(out, "\n(hidden, '{}' to show) ", Command::ToggleVisibility.key()).ok();
                out.flush().ok();
            }
            self.hidden_shown = true;
            return;
        }
        self.hidden_shown = false;
        writeln!(out).ok();
        if let Some(table) = &view.records_table {
            write!(out, "{}", table).ok();
        }
        write!(
            out,
            "{}  {} | {} [enter] {} [.]",
            view.text,
            state_label(view.state),
            view.primary.title(),
            view.secondary.tooltip,
        )
        .ok();
        out.flush().ok();
    }

    fn draw_time(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        write!(out, "\r{}", text).ok();
        out.flush().ok();
    }
}
