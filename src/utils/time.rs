use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::cmp::Ordering;
use tracing::debug;

/// Naive date-time layouts accepted for event starts, tried in order
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an event start into the calendar day it falls on.
///
/// RFC 3339 values are converted to `tz` first; naive date-times are taken as
/// wall-clock time in `tz`; plain `YYYY-MM-DD` values are used as-is.
/// Returns `None` for anything unparsable.
pub fn parse_day(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz).date_naive());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Current calendar day in `tz`
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Every day from `start` to `end`, both inclusive. Empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        debug!("Empty day range: {} is after {}", start, end);
        return Vec::new();
    }
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// Where a day sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayClass {
    Past,
    Today,
    Future,
}

/// Classify `day` against `today`
pub fn classify_day(day: NaiveDate, today: NaiveDate) -> DayClass {
    match day.cmp(&today) {
        Ordering::Less => DayClass::Past,
        Ordering::Equal => DayClass::Today,
        Ordering::Greater => DayClass::Future,
    }
}

/// Closed interval of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range. `start > end` is allowed and simply contains no days.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Smallest range covering all candidate dates
    pub fn from_candidate_dates(dates: &[NaiveDate]) -> Option<Self> {
        let start = dates.iter().min()?;
        let end = dates.iter().max()?;
        Some(Self::new(*start, *end))
    }

    /// Whether the range contains at least one day
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Whether `day` falls inside the range
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days in the range
    pub fn len_days(&self) -> usize {
        if !self.is_valid() {
            return 0;
        }
        (self.end - self.start).num_days() as usize + 1
    }

    /// The days of the range in order
    pub fn days(&self) -> Vec<NaiveDate> {
        days_between(self.start, self.end)
    }
}

/// Sunday-to-Saturday week containing `day`
pub fn week_containing(day: NaiveDate) -> DateRange {
    let offset = day.weekday().num_days_from_sunday() as i64;
    let start = day - Duration::days(offset);
    DateRange::new(start, start + Duration::days(6))
}

/// Whole weeks covering the given month, as shown by a month grid
pub fn month_grid(year: i32, month: u32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = last_day_of_month(first)?;
    Some(DateRange::new(
        week_containing(first).start,
        week_containing(last).end,
    ))
}

/// First day of the month containing `day`
pub fn first_day_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Last day of the month containing `day`
pub fn last_day_of_month(day: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

/// Same day-of-month in an adjacent month, clamped to the month's length
pub fn shift_months(day: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = day.year() * 12 + day.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = last_day_of_month(first)?;
    first.with_day(day.day().min(last.day()))
}
