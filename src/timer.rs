//! The running stopwatch: [`TimerCore`] bound to a clock and to the periodic
//! refresh that keeps the displayed time live.
//!
//! Every arming of the ticker gets a fresh generation number. A tick only
//! counts if it carries the generation that is currently armed, so pausing,
//! stopping or resetting cancels the refresh even when a tick from the old
//! generation is already queued.

use log::{debug, trace};
use timer_core::{TimerCore, TimerState};

use crate::clock::Clock;

/// Refresh period while running.
pub const REFRESH_INTERVAL_MS: u64 = 50;

/// Delivers periodic ticks back to the event loop.
pub trait Ticker {
    /// Begin ticking every `interval_ms`, tagging each tick with `generation`.
    /// Replaces any previous arming.
    fn arm(&mut self, interval_ms: u64, generation: u64);
    fn disarm(&mut self);
}

/// Receives the elapsed time after each state-relevant change.
pub trait TimeObserver {
    fn on_elapsed(&mut self, elapsed_ms: u64);
}

pub struct Timer {
    core: TimerCore,
    clock: Box<dyn Clock>,
    ticker: Box<dyn Ticker>,
    armed: Option<u64>,
    next_generation: u64,
}

impl Timer {
    pub fn new(clock: Box<dyn Clock>, ticker: Box<dyn Ticker>) -> Self {
        Self {
            core: TimerCore::new(),
            clock,
            ticker,
            armed: None,
            next_generation: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.core.state()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.core.elapsed_ms(self.clock.now_ms())
    }

    pub fn start(&mut self, observer: &mut dyn TimeObserver) {
        self.cancel_ticks();
        self.core.start(self.clock.now_ms());
        self.arm_ticks();
        debug!("timer started");
        observer.on_elapsed(self.elapsed_ms());
    }

    /// No-op unless running.
    pub fn pause(&mut self, observer: &mut dyn TimeObserver) -> bool {
        if !self.core.pause(self.clock.now_ms()) {
            return false;
        }
        self.cancel_ticks();
        let elapsed = self.elapsed_ms();
        debug!("timer paused at {} ms", elapsed);
        observer.on_elapsed(elapsed);
        true
    }

    /// No-op unless paused. Keeps the accumulated time.
    pub fn resume(&mut self, observer: &mut dyn TimeObserver) -> bool {
        if !self.core.resume(self.clock.now_ms()) {
            return false;
        }
        self.arm_ticks();
        debug!("timer continued");
        observer.on_elapsed(self.elapsed_ms());
        true
    }

    pub fn stop(&mut self, observer: &mut dyn TimeObserver) {
        self.cancel_ticks();
        self.core.stop(self.clock.now_ms());
        let elapsed = self.elapsed_ms();
        debug!("timer stopped at {} ms", elapsed);
        observer.on_elapsed(elapsed);
    }

    pub fn reset(&mut self, observer: &mut dyn TimeObserver) {
        self.cancel_ticks();
        self.core.reset();
        debug!("timer reset");
        observer.on_elapsed(0);
    }

    /// Reports the live elapsed time if `generation` is the armed one.
    /// Returns whether the tick was accepted.
    pub fn on_tick(&mut self, generation: u64, observer: &mut dyn TimeObserver) -> bool {
        if self.armed != Some(generation) || self.core.state() != TimerState::Running {
            trace!("dropping stale tick {}", generation);
            return false;
        }
        observer.on_elapsed(self.elapsed_ms());
        true
    }

    fn arm_ticks(&mut self) {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        self.armed = Some(generation);
        self.ticker.arm(REFRESH_INTERVAL_MS, generation);
    }

    fn cancel_ticks(&mut self) {
        if self.armed.take().is_some() {
            self.ticker.disarm();
        }
    }
}
