//! Pure timing logic library with no platform dependencies.
//! Every clock reading is passed in as `now_ms`, so the whole state machine
//! is testable on the host without sleeping.

mod records;

pub use records::{RecordLog, RecordMode, RecordStyle};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
    Paused,
}

/// Elapsed-time accounting for one stopwatch.
///
/// While running, the true elapsed time is `accumulated_ms + (now - segment_start)`.
/// Otherwise it is `accumulated_ms` alone and there is no open segment.
#[derive(Clone, Debug, Default)]
pub struct TimerCore {
    state: TimerState,
    accumulated_ms: u64,
    segment_start_ms: Option<u64>,
}

impl TimerCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Starts from zero, whatever the current state is.
    pub fn start(&mut self, now_ms: u64) {
        self.accumulated_ms = 0;
        self.segment_start_ms = Some(now_ms);
        self.state = TimerState::Running;
    }

    /// Returns `false` and leaves the timer untouched unless it was running.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.close_segment(now_ms);
        self.state = TimerState::Paused;
        true
    }

    /// Returns `false` and leaves the timer untouched unless it was paused.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.segment_start_ms = Some(now_ms);
        self.state = TimerState::Running;
        true
    }

    /// Stopping keeps the accumulated time; only `reset` or `start` clears it.
    pub fn stop(&mut self, now_ms: u64) {
        self.close_segment(now_ms);
        self.state = TimerState::Stopped;
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.segment_start_ms = None;
        self.state = TimerState::Stopped;
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match (self.state, self.segment_start_ms) {
            (TimerState::Running, Some(start)) => {
                self.accumulated_ms + now_ms.saturating_sub(start)
            }
            _ => self.accumulated_ms,
        }
    }

    fn close_segment(&mut self, now_ms: u64) {
        if let Some(start) = self.segment_start_ms.take() {
            self.accumulated_ms += now_ms.saturating_sub(start);
        }
    }
}

/// Format milliseconds as "HH:MM:SS:mmm".
///
/// Every field is truncated, never rounded. Hours have no upper bound, so
/// durations of 100 hours or more print more than two hour digits.
pub fn format_hms_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    let millis = ms % 1000;
    format!("{:02}:{:02}:{:02}:{:03}", h, m, s, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_basic() {
        let mut sw = TimerCore::new();
        assert_eq!(sw.state(), TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(0), 0);

        sw.start(1000);
        assert_eq!(sw.state(), TimerState::Running);
        assert_eq!(sw.elapsed_ms(1500), 500);
        assert_eq!(sw.elapsed_ms(2000), 1000);

        assert!(sw.pause(2000));
        assert_eq!(sw.state(), TimerState::Paused);
        assert_eq!(sw.elapsed_ms(5000), 1000); // Stays at 1000 when paused

        assert!(sw.resume(5000));
        assert_eq!(sw.elapsed_ms(5500), 1500);

        sw.stop(6000);
        assert_eq!(sw.state(), TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(9000), 2000);

        sw.reset();
        assert_eq!(sw.state(), TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(10000), 0);
    }

    #[test]
    fn test_elapsed_never_decreases_while_running() {
        let mut sw = TimerCore::new();
        sw.start(100);
        let mut last = 0;
        for now in (100..2000).step_by(37) {
            let elapsed = sw.elapsed_ms(now);
            assert!(elapsed >= last);
            last = elapsed;
        }
    }

    #[test]
    fn test_clock_going_backwards_saturates() {
        let mut sw = TimerCore::new();
        sw.start(5000);
        assert_eq!(sw.elapsed_ms(4000), 0);
        assert!(sw.pause(4000));
        assert_eq!(sw.elapsed_ms(4000), 0);
    }

    #[test]
    fn test_pause_continue_stop_sums_segments() {
        let mut sw = TimerCore::new();
        sw.start(0);
        sw.pause(300);
        sw.resume(10_000);
        sw.stop(10_450);
        assert_eq!(sw.elapsed_ms(99_999), 750);
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut sw = TimerCore::new();
        assert!(!sw.pause(100));
        assert!(!sw.resume(100));
        assert_eq!(sw.state(), TimerState::Stopped);

        sw.start(0);
        assert!(!sw.resume(50));
        assert_eq!(sw.elapsed_ms(100), 100);

        sw.pause(100);
        assert!(!sw.pause(200));
        assert_eq!(sw.elapsed_ms(200), 100);
    }

    #[test]
    fn test_stop_from_stopped_keeps_elapsed() {
        let mut sw = TimerCore::new();
        sw.start(0);
        sw.stop(400);
        sw.stop(900);
        assert_eq!(sw.state(), TimerState::Stopped);
        assert_eq!(sw.elapsed_ms(1000), 400);
    }

    #[test]
    fn test_stop_while_paused_does_not_add_time() {
        let mut sw = TimerCore::new();
        sw.start(0);
        sw.pause(250);
        sw.stop(5000);
        assert_eq!(sw.elapsed_ms(5000), 250);
    }

    #[test]
    fn test_start_restarts_from_zero() {
        let mut sw = TimerCore::new();
        sw.start(0);
        sw.pause(800);
        sw.start(1000);
        assert_eq!(sw.state(), TimerState::Running);
        assert_eq!(sw.elapsed_ms(1100), 100);
    }

    #[test]
    fn test_reset_from_every_state() {
        let mut running = TimerCore::new();
        running.start(0);
        let mut paused = TimerCore::new();
        paused.start(0);
        paused.pause(10);
        let mut stopped = TimerCore::new();
        stopped.start(0);
        stopped.stop(10);

        for mut sw in [running, paused, stopped] {
            sw.reset();
            assert_eq!(sw.state(), TimerState::Stopped);
            assert_eq!(sw.elapsed_ms(50_000), 0);
        }
    }

    #[test]
    fn test_format_hms_ms() {
        assert_eq!(format_hms_ms(0), "00:00:00:000");
        assert_eq!(format_hms_ms(999), "00:00:00:999");
        assert_eq!(format_hms_ms(61_000), "00:01:01:000");
        assert_eq!(format_hms_ms(3_661_000), "01:01:01:000");
        assert_eq!(format_hms_ms(12_345), "00:00:12:345");
    }

    #[test]
    fn test_format_hours_are_unbounded() {
        assert_eq!(format_hms_ms(100 * 3_600_000), "100:00:00:000");
        assert_eq!(format_hms_ms(24 * 3_600_000 + 1), "24:00:00:001");
    }

    #[test]
    fn test_format_fields_reconstruct_input() {
        for t in [0, 1, 59_999, 60_000, 3_599_999, 3_600_000, 86_399_999, 987_654_321] {
            let text = format_hms_ms(t);
            let fields: Vec<u64> = text.split(':').map(|f| f.parse().unwrap()).collect();
            assert_eq!(fields.len(), 4);
            let (h, m, s, ms) = (fields[0], fields[1], fields[2], fields[3]);
            assert!(m < 60 && s < 60 && ms < 1000);
            assert_eq!(((h * 3600 + m * 60 + s) * 1000) + ms, t);
        }
    }
}
