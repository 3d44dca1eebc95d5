//! Clock abstraction - isolates "today's date" so tests can inject a fixed one

/// Source of the current calendar date in YYYYMMDD form
pub trait Clock {
    fn today_ymd(&self) -> String;
}

/// Wall-clock implementation backed by the local timezone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today_ymd(&self) -> String {
        chrono::Local::now().format("%Y%m%d").to_string()
    }
}

/// Fixed date, for deterministic tests
#[derive(Clone, Debug)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn today_ymd(&self) -> String {
        self.0.clone()
    }
}
