//! Periodic tick source running on its own thread. Ticks arrive in the
//! event loop as [`AppOp::Pump`] messages, so they are handled in order with
//! everything else and never concurrently with a user action.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError, Sender};

use crate::app::AppOp;
use crate::error::AppError;
use crate::timer::Ticker;

#[derive(Debug)]
enum PumpCtl {
    Start { interval_ms: u64, generation: u64 },
    Stop,
    Quit,
}

pub struct Pump {
    ctl: Sender<PumpCtl>,
    handle: Option<JoinHandle<()>>,
}

impl Pump {
    pub fn spawn(main_tx: Sender<AppOp>) -> Result<Self, AppError> {
        let (ctl, ctl_rx) = flume::unbounded();
        let handle = thread::Builder::new()
            .name("pump".into())
            .spawn(move || pump_thread(ctl_rx, main_tx))
            .map_err(|source| AppError::Thread {
                name: "pump",
                source,
            })?;
        Ok(Self {
            ctl,
            handle: Some(handle),
        })
    }

    fn send(&self, msg: PumpCtl) {
        if self.ctl.send(msg).is_err() {
            log::error!("pump thread is gone");
        }
    }
}

impl Ticker for Pump {
    fn arm(&mut self, interval_ms: u64, generation: u64) {
        self.send(PumpCtl::Start {
            interval_ms,
            generation,
        });
    }

    fn disarm(&mut self) {
        self.send(PumpCtl::Stop);
    }
}

impl Drop for Pump {
    fn drop(&mut self) {
        self.ctl.send(PumpCtl::Quit).ok();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("pump thread panicked");
            }
        }
    }
}

fn pump_thread(ctl_rx: Receiver<PumpCtl>, main_tx: Sender<AppOp>) {
    let mut armed: Option<(Duration, u64)> = None;

    loop {
        // Block when idle; wake up every interval when armed.
        let msg = match armed {
            Some((interval, generation)) => match ctl_rx.recv_timeout(interval) {
                Ok(msg) => msg,
                Err(RecvTimeoutError::Timeout) => {
                    if main_tx.send(AppOp::Pump(generation)).is_err() {
                        break;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match ctl_rx.recv() {
                Ok(msg) => msg,
                Err(_) => break,
            },
        };

        match msg {
            PumpCtl::Start {
                interval_ms,
                generation,
            } => {
                armed = Some((Duration::from_millis(interval_ms.max(1)), generation));
            }
            PumpCtl::Stop => armed = None,
            PumpCtl::Quit => break,
        }
    }
    log::debug!("pump thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_carry_generation() {
        let (tx, rx) = flume::unbounded();
        let mut pump = Pump::spawn(tx).unwrap();
        pump.arm(5, 7);
        let op = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(op, AppOp::Pump(7)));
        pump.disarm();
        drop(pump);
    }

    #[test]
    fn test_idle_pump_sends_nothing() {
        let (tx, rx) = flume::unbounded();
        let pump = Pump::spawn(tx).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
        drop(pump);
    }

    #[test]
    fn test_rearm_switches_generation() {
        let (tx, rx) = flume::unbounded();
        let mut pump = Pump::spawn(tx).unwrap();
        pump.arm(5, 1);
        pump.arm(5, 2);
        // Anything queued after the second arm is tagged 2.
        let mut seen_two = false;
        for _ in 0..10 {
            if let Ok(AppOp::Pump(generation)) = rx.recv_timeout(Duration::from_secs(5)) {
                if generation == 2 {
                    seen_two = true;
                    break;
                }
            }
        }
        assert!(seen_two);
    }
}
