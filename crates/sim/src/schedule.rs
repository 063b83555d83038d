//! Service hours: which days and times trains actually move.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};

/// Compact representation of which weekdays service operates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperatingDays {
    flags: u8,
}

impl OperatingDays {
    pub fn none() -> Self {
        Self { flags: 0 }
    }

    pub fn every_day() -> Self {
        Self { flags: 0x7f }
    }

    pub fn set(&mut self, weekday: Weekday) {
        self.flags |= 1 << weekday.num_days_from_monday();
    }

    pub fn unset(&mut self, weekday: Weekday) {
        self.flags &= !(1 << weekday.num_days_from_monday());
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        (self.flags & (1 << weekday.num_days_from_monday())) != 0
    }
}

/// Daily service window over a set of operating days.
///
/// `close < open` describes a window spanning midnight; the hours after
/// midnight count toward the calendar day they fall on.
#[derive(Clone, Copy, Debug)]
pub struct ServiceWindow {
    pub days: OperatingDays,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl ServiceWindow {
    pub fn new(days: OperatingDays, open: NaiveTime, close: NaiveTime) -> Self {
        Self { days, open, close }
    }

    /// Daily window on every day of the week.
    pub fn daily(open: NaiveTime, close: NaiveTime) -> Self {
        Self::new(OperatingDays::every_day(), open, close)
    }

    pub fn is_open(&self, at: NaiveDateTime) -> bool {
        if !self.days.contains(at.weekday()) {
            return false;
        }

        let time = at.time();
        if self.open <= self.close {
            time >= self.open && time < self.close
        } else {
            // Overnight window
            time >= self.open || time < self.close
        }
    }
}
