use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};

/// Time source for sessions. `Manual` clocks share their instant between
/// clones so a test can advance the clock a session holds.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    #[default]
    System,
    Manual(Rc<Cell<DateTime<Utc>>>),
}

impl Clock {
    pub fn manual(at: DateTime<Utc>) -> Self {
        Clock::Manual(Rc::new(Cell::new(at)))
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Manual(t) => t.get(),
        }
    }

    /// Moves a manual clock forward. No effect on the system clock.
    pub fn advance(&self, delta: Duration) {
        if let Clock::Manual(t) = self {
            t.set(t.get() + delta);
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(Duration::seconds(secs));
    }
}

/// Whole seconds from `start` to `end`, never negative.
pub fn elapsed_secs(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    end.signed_duration_since(start).num_seconds().max(0) as u64
}
