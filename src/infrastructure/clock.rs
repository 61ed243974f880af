use crate::domain::ports::Clock;
use chrono::Timelike;

/// Local wall-clock hour.
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

/// Pins every tick to one hour of the day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn current_hour(&self) -> u32 {
        self.0
    }
}
