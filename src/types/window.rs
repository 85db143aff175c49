use chrono::{NaiveDateTime, TimeDelta};

const MILLISECONDS_PER_MINUTE: f64 = 60_000.0;
const MILLISECONDS_PER_HOUR: f64 = 3_600_000.0;

/// A trailing time window `[now - span, ..)` used to select recent transactions.
///
/// There is no upper bound: records stamped after `now` are still inside the window.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Window(TimeDelta);

impl Window {
    pub fn hours(hours: f64) -> Self {
        Self::from_milliseconds(hours * MILLISECONDS_PER_HOUR)
    }

    pub fn minutes(minutes: f64) -> Self {
        Self::from_milliseconds(minutes * MILLISECONDS_PER_MINUTE)
    }

    /// Earliest timestamp still inside the window, saturating at the calendar limits.
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        match now.checked_sub_signed(self.0) {
            Some(cutoff) => cutoff,
            None if self.0 > TimeDelta::zero() => NaiveDateTime::MIN,
            None => NaiveDateTime::MAX
        }
    }

    /// A missing timestamp never falls inside a window.
    pub fn contains(&self, now: NaiveDateTime, timestamp: Option<NaiveDateTime>) -> bool {
        timestamp.is_some_and(|timestamp| timestamp >= self.cutoff(now))
    }

    fn from_milliseconds(milliseconds: f64) -> Self {
        // NaN casts to 0, everything else saturates into TimeDelta's range
        let milliseconds = milliseconds.clamp(-(i64::MAX as f64), i64::MAX as f64) as i64;
        Window(TimeDelta::milliseconds(milliseconds.max(-i64::MAX)))
    }
}
