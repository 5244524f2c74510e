use super::adapter::{decorate_day, DayCell};
use crate::components::invited::Event;
use crate::utils::i18n::ensure_locale;
use crate::utils::time::{first_day_of_month, month_grid, shift_months, week_containing, DateRange};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;
use rust_i18n::t;
use std::str::FromStr;

/// Calendar layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    Month,
    Week,
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(ViewKind::Month),
            "week" => Ok(ViewKind::Week),
            other => Err(format!("unknown calendar view '{}'", other)),
        }
    }
}

/// Localized weekday name
pub fn weekday_label(weekday: Weekday) -> String {
    ensure_locale();
    match weekday {
        Weekday::Sun => t!("weekday_sunday"),
        Weekday::Mon => t!("weekday_monday"),
        Weekday::Tue => t!("weekday_tuesday"),
        Weekday::Wed => t!("weekday_wednesday"),
        Weekday::Thu => t!("weekday_thursday"),
        Weekday::Fri => t!("weekday_friday"),
        Weekday::Sat => t!("weekday_saturday"),
    }
    .to_string()
}

/// Month/week calendar navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    kind: ViewKind,
    cursor: NaiveDate,
}

impl CalendarView {
    /// Open the calendar on `cursor`
    pub fn new(kind: ViewKind, cursor: NaiveDate) -> Self {
        Self { kind, cursor }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Switch between month and week layouts, keeping the cursor
    pub fn change_view(&mut self, kind: ViewKind) {
        self.kind = kind;
    }

    /// Jump back to today
    pub fn today(&mut self, today: NaiveDate) {
        self.cursor = today;
    }

    /// Previous month or week
    pub fn prev(&mut self) {
        self.cursor = match self.kind {
            ViewKind::Month => shift_months(first_day_of_month(self.cursor), -1),
            ViewKind::Week => self.cursor.checked_sub_signed(Duration::days(7)),
        }
        .unwrap_or(self.cursor);
    }

    /// Next month or week
    pub fn next(&mut self) {
        self.cursor = match self.kind {
            ViewKind::Month => shift_months(first_day_of_month(self.cursor), 1),
            ViewKind::Week => self.cursor.checked_add_signed(Duration::days(7)),
        }
        .unwrap_or(self.cursor);
    }

    /// Localized month label and the year, e.g. ("11월", 2025)
    pub fn title(&self) -> (String, i32) {
        ensure_locale();
        (
            t!("calendar_month_title", month = self.cursor.month()).to_string(),
            self.cursor.year(),
        )
    }

    /// Days the current layout shows: whole weeks of the month, or one week
    pub fn visible_range(&self) -> DateRange {
        match self.kind {
            ViewKind::Month => month_grid(self.cursor.year(), self.cursor.month())
                .unwrap_or_else(|| week_containing(self.cursor)),
            ViewKind::Week => week_containing(self.cursor),
        }
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.visible_range().days()
    }

    /// Header labels, Sunday first
    pub fn weekday_headers(&self) -> Vec<String> {
        week_containing(self.cursor)
            .days()
            .into_iter()
            .map(|day| weekday_label(day.weekday()))
            .collect()
    }

    /// Decorated cells for every visible day
    pub fn cells(
        &self,
        events: &[Event],
        today: NaiveDate,
        max_per_day: usize,
        tz: Tz,
    ) -> Vec<DayCell> {
        self.visible_days()
            .into_iter()
            .map(|day| decorate_day(events, day, today, max_per_day, tz))
            .collect()
    }

    /// Whether `day` belongs to the month under the cursor
    pub fn in_current_month(&self, day: NaiveDate) -> bool {
        day.year() == self.cursor.year() && day.month() == self.cursor.month()
    }
}
