use chrono::{DateTime, Utc};

use semestra_application::Clock;

/// Wall-clock implementation of the application clock port.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
