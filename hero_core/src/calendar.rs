//! Calendar generation for the tracked year.
//!
//! The calendar is independent of ledger contents: every day of the year
//! gets a card whether or not anything was recorded for it.

use crate::catalog::WEEKDAYS;
use crate::{DateKey, Error, Result};
use chrono::{Datelike, NaiveDate};

/// Every day of one year, in order
///
/// Lazy and finite; clone it (or build a new one) to iterate again.
#[derive(Clone, Debug)]
pub struct CalendarYear {
    year: i32,
    front: Option<NaiveDate>,
    back: Option<NaiveDate>,
}

impl CalendarYear {
    pub fn new(year: i32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        match (first, last) {
            (Some(first), Some(last)) => Ok(Self {
                year,
                front: Some(first),
                back: Some(last),
            }),
            _ => Err(Error::Calendar(format!("year {} is out of range", year))),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, key: DateKey) -> bool {
        key.date().year() == self.year
    }

    /// Zero-based position of a day within the year
    pub fn position(&self, key: DateKey) -> Option<usize> {
        self.contains(key).then(|| key.date().ordinal0() as usize)
    }

    fn remaining(&self) -> usize {
        match (self.front, self.back) {
            (Some(front), Some(back)) if front <= back => {
                (back - front).num_days() as usize + 1
            }
            _ => 0,
        }
    }

    fn exhaust(&mut self) {
        self.front = None;
        self.back = None;
    }
}

impl Iterator for CalendarYear {
    type Item = DateKey;

    fn next(&mut self) -> Option<DateKey> {
        let (front, back) = (self.front?, self.back?);
        if front > back {
            return None;
        }
        if front == back {
            self.exhaust();
        } else {
            self.front = front.succ_opt();
        }
        Some(DateKey::from_date(front))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl DoubleEndedIterator for CalendarYear {
    fn next_back(&mut self) -> Option<DateKey> {
        let (front, back) = (self.front?, self.back?);
        if front > back {
            return None;
        }
        if front == back {
            self.exhaust();
        } else {
            self.back = back.pred_opt();
        }
        Some(DateKey::from_date(back))
    }
}

impl ExactSizeIterator for CalendarYear {}

/// Display strings for a day card header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayLabel {
    pub weekday: &'static str,
    /// `M/D` without zero padding
    pub short_date: String,
    pub year: i32,
}

impl DayLabel {
    pub fn for_key(key: DateKey) -> Self {
        let date = key.date();
        Self {
            weekday: WEEKDAYS[date.weekday().num_days_from_sunday() as usize],
            short_date: format!("{}/{}", date.month(), date.day()),
            year: date.year(),
        }
    }
}
