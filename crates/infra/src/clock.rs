//! System clock implementation of the core `Clock` port.

use chrono::{Local, NaiveDate};
use rotaboard_core::Clock;

/// Wall-clock implementation; the only place the projection path touches
/// ambient time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
