//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

/// Returns the fixed instant unit tests start from.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct SteppingClock(Arc<Mutex<DateTime<Utc>>>);

impl Default for SteppingClock {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(fixture_now())))
    }
}

impl SteppingClock {
    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        *self.0.lock().expect("clock mutex") += delta;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}
