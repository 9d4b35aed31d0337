//! Status-bar stopwatch with lap records.
//!
//! [`stopwatch::Stopwatch`] is the controller a host constructs once per
//! session. The host feeds it commands and ticks through [`app::App`], draws
//! [`ui::StatusView`]s and provides the clock, ticker, clipboard and warning
//! channel.

pub mod alerts;
pub mod app;
pub mod clipboard;
pub mod clock;
pub mod command;
pub mod error;
pub mod pump;
pub mod stopwatch;
pub mod storage;
pub mod timer;
pub mod ui;

#[cfg(test)]
mod testing;

pub use timer_core::{format_hms_ms, RecordLog, RecordMode, RecordStyle, TimerState};
