use std::str::FromStr;

use crate::error::UnknownCommand;

const COMMAND_PREFIX: &str = "light-stopwatch.";

/// Every action the host can trigger, by button, tooltip link or key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Pause,
    Continue,
    Stop,
    Reset,
    CopyTime,
    ToggleVisibility,
    Record,
    CopyRecords,
    ToggleRecordMode,
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::Start,
        Command::Pause,
        Command::Continue,
        Command::Stop,
        Command::Reset,
        Command::CopyTime,
        Command::ToggleVisibility,
        Command::Record,
        Command::CopyRecords,
        Command::ToggleRecordMode,
    ];

    /// Stable identifier used in tooltip links, e.g. `light-stopwatch.start`.
    pub fn id(self) -> &'static str {
        match self {
            Command::Start => "light-stopwatch.start",
            Command::Pause => "light-stopwatch.pause",
            Command::Continue => "light-stopwatch.continue",
            Command::Stop => "light-stopwatch.stop",
            Command::Reset => "light-stopwatch.reset",
            Command::CopyTime => "light-stopwatch.copyTime",
            Command::ToggleVisibility => "light-stopwatch.toggleVisualizability",
            Command::Record => "light-stopwatch.record",
            Command::CopyRecords => "light-stopwatch.copyRecords",
            Command::ToggleRecordMode => "light-stopwatch.toggleRecordMode",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Command::Start => "Start",
            Command::Pause => "Pause",
            Command::Continue => "Continue",
            Command::Stop => "Stop",
            Command::Reset => "Reset",
            Command::CopyTime => "Copy Time",
            Command::ToggleVisibility => "Hide",
            Command::Record => "Add a New Record",
            Command::CopyRecords => "Copy Records",
            Command::ToggleRecordMode => "Toggle Record Mode",
        }
    }

    pub fn key(self) -> char {
        match self {
            Command::Start => 's',
            Command::Pause => 'p',
            Command::Continue => 'c',
            Command::Stop => 'x',
            Command::Reset => 'r',
            Command::CopyTime => 't',
            Command::ToggleVisibility => 'h',
            Command::Record => 'l',
            Command::CopyRecords => 'y',
            Command::ToggleRecordMode => 'm',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.key() == key)
    }

    pub fn is_copy(self) -> bool {
        matches!(self, Command::CopyTime | Command::CopyRecords)
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Accepts the full identifier or the part after `light-stopwatch.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let wanted = s.strip_prefix(COMMAND_PREFIX).unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|cmd| &cmd.id()[COMMAND_PREFIX.len()..] == wanted)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
