use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; carries the seconds still remaining.
    Tick(u64),
    /// Remaining time just dropped to a quarter of the total or below.
    LowTime(u64),
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Warning,
}

/// Countdown from a fixed number of seconds to zero, advanced one second per
/// `tick()`. `Expired` is returned by exactly one tick per `start()`.
#[derive(Debug, Clone, Default)]
pub struct CountdownTimer {
    total_seconds: u64,
    remaining_seconds: u64,
    active: bool,
    warned: bool,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer. A zero duration does not expire here; it expires on
    /// the next tick so callers never see expiry inside their own `start`.
    pub fn start(&mut self, total_seconds: u64) {
        self.total_seconds = total_seconds;
        self.remaining_seconds = total_seconds;
        self.active = true;
        self.warned = false;
        debug!(total_seconds, "countdown started");
    }

    /// Disarms the timer. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.active {
            debug!(remaining = self.remaining_seconds, "countdown stopped");
        }
        self.active = false;
    }

    pub fn tick(&mut self) -> Option<TimerEvent> {
        // checked before every delivery, not only when a tick is scheduled
        if !self.active {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.active = false;
            return Some(TimerEvent::Expired);
        }

        if self.urgency() == Urgency::Warning && !self.warned {
            self.warned = true;
            return Some(TimerEvent::LowTime(self.remaining_seconds));
        }

        Some(TimerEvent::Tick(self.remaining_seconds))
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Recomputed from the current totals on every call.
    pub fn urgency(&self) -> Urgency {
        urgency_for(self.remaining_seconds, self.total_seconds)
    }

    pub fn display(&self) -> String {
        format_remaining(self.remaining_seconds)
    }
}

/// `Warning` once `remaining / total <= 0.25`.
pub fn urgency_for(remaining: u64, total: u64) -> Urgency {
    if remaining.saturating_mul(4) <= total {
        Urgency::Warning
    } else {
        Urgency::Normal
    }
}

/// Renders seconds as `MM:SS`. Minutes are not capped at two digits.
pub fn format_remaining(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Background metronome that sends one message per interval. The owner
/// drains it from its event loop and calls `CountdownTimer::tick` per message.
pub struct Ticker {
    rx: mpsc::Receiver<()>,
    stop: Arc<AtomicBool>,
    worker: thread::JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        let worker = thread::spawn(move || {
            let origin = Instant::now();
            let mut beats: u32 = 0;

            loop {
                beats += 1;
                // aim at origin + n * interval so sleeps do not accumulate drift
                let due = origin + interval * beats;
                thread::sleep(due.saturating_duration_since(Instant::now()));

                if flag.load(Ordering::SeqCst) {
                    break;
                }
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        Self { rx, stop, worker }
    }

    /// Number of beats received since the last call.
    pub fn drain(&self) -> usize {
        let beats = self.rx.try_iter().count();
        if self.stop.load(Ordering::SeqCst) {
            0
        } else {
            beats
        }
    }

    /// The worker exits at its next beat after `stop`.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        !self.worker.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
