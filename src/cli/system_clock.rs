use chrono::{DateTime, Utc};

use billdesk_core::Clock;

/// Wall clock backed by the system UTC time source. Bill dates and report
/// reference days both come from it, so they agree on where a day ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
