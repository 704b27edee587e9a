use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};

/// Closed interval `[start, end]`; both bounds are part of the range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(BudgetError::Validation(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Range covering every instant of the given days, inclusive.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Result<Self> {
        Self::new(start_of_day(first), end_of_day(last))
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Calendar policy used to cut months and weeks.
///
/// All boundaries are computed in UTC. `first_weekday` is explicit rather than
/// inherited from a locale so every caller agrees on where a week starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    first_weekday: Weekday,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::iso()
    }
}

impl Calendar {
    /// ISO weeks: Monday through Sunday.
    pub fn iso() -> Self {
        Self::with_first_weekday(Weekday::Mon)
    }

    pub fn with_first_weekday(first_weekday: Weekday) -> Self {
        Self { first_weekday }
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// The calendar month containing `at`.
    pub fn month_of(&self, at: DateTime<Utc>) -> DateRange {
        let date = at.date_naive();
        let first = date - Duration::days(i64::from(date.day0()));
        let last = first_of_next_month(first) - Duration::days(1);
        DateRange {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// The seven-day week containing `at`, starting on `first_weekday`.
    pub fn week_of(&self, at: DateTime<Utc>) -> DateRange {
        let date = at.date_naive();
        let offset = (7 + date.weekday().num_days_from_monday()
            - self.first_weekday.num_days_from_monday())
            % 7;
        let first = date - Duration::days(i64::from(offset));
        DateRange {
            start: start_of_day(first),
            end: end_of_day(first + Duration::days(6)),
        }
    }

    /// The last `days` calendar days ending with the day of `now`, capped at `now`.
    pub fn trailing_days(&self, now: DateTime<Utc>, days: u32) -> DateRange {
        let span = i64::from(days.max(1)) - 1;
        let first = now.date_naive() - Duration::days(span);
        DateRange {
            start: start_of_day(first),
            end: now,
        }
    }

    /// Calendar days left in `range`, counting the day of `now`. Never negative.
    pub fn days_remaining(&self, now: DateTime<Utc>, range: &DateRange) -> i64 {
        if now > range.end {
            return 0;
        }
        let from = now.date_naive().max(range.start.date_naive());
        ((range.end.date_naive() - from).num_days() + 1).max(0)
    }

    /// Whole weeks between two instants, truncated toward zero.
    pub fn whole_weeks_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
        (to - from).num_weeks()
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date + Duration::days(1)) - Duration::nanoseconds(1)
}

fn first_of_next_month(first: NaiveDate) -> NaiveDate {
    let mut next = first + Duration::days(28);
    while next.month() == first.month() {
        next += Duration::days(1);
    }
    next
}
