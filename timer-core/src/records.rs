use std::fmt::Write;

use crate::format_hms_ms;

/// How captured records are displayed. The stored values never change,
/// only their interpretation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RecordMode {
    #[default]
    Absolute,
    Relative,
}

impl RecordMode {
    pub fn from_absolute(absolute: bool) -> Self {
        if absolute {
            RecordMode::Absolute
        } else {
            RecordMode::Relative
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            RecordMode::Absolute => RecordMode::Relative,
            RecordMode::Relative => RecordMode::Absolute,
        }
    }

    pub fn column_label(self) -> &'static str {
        match self {
            RecordMode::Absolute => "Time",
            RecordMode::Relative => "Diff Time",
        }
    }
}

/// Wrapping tokens for one rendered line: `{begin}{index}{delimiter}{time}{end}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordStyle<'a> {
    pub begin: &'a str,
    pub end: &'a str,
    pub delimiter: &'a str,
}

impl RecordStyle<'static> {
    /// Rows of a two-column markdown table.
    pub const TABLE: RecordStyle<'static> = RecordStyle {
        begin: "|",
        end: "|",
        delimiter: "|",
    };

    /// `1, 00:00:01:000` lines for the clipboard.
    pub const PLAIN: RecordStyle<'static> = RecordStyle {
        begin: "",
        end: "",
        delimiter: ", ",
    };
}

impl<'a> RecordStyle<'a> {
    pub fn new(begin: &'a str, end: &'a str, delimiter: &'a str) -> Self {
        Self {
            begin,
            end,
            delimiter,
        }
    }
}

/// Elapsed-time snapshots in capture order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordLog {
    entries: Vec<u64>,
}

impl RecordLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, elapsed_ms: u64) {
        self.entries.push(elapsed_ms);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// Yields `(index, value)` pairs with a 1-based index. In relative mode
    /// every entry after the first is the difference to its predecessor.
    pub fn displayed(&self, mode: RecordMode) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.entries.iter().enumerate().map(move |(i, &value)| {
            let shown = match mode {
                RecordMode::Relative if i > 0 => value.saturating_sub(self.entries[i - 1]),
                _ => value,
            };
            (i + 1, shown)
        })
    }

    /// One line per record, each terminated by `\n`. Empty log renders as "".
    pub fn render(&self, mode: RecordMode, style: RecordStyle<'_>) -> String {
        let mut txt = String::new();
        for (index, value) in self.displayed(mode) {
            // Writing into a String cannot fail.
            let _ = writeln!(
                txt,
                "{}{}{}{}{}",
                style.begin,
                index,
                style.delimiter,
                format_hms_ms(value),
                style.end
            );
        }
        txt
    }
}
