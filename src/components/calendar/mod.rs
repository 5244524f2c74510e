pub mod adapter;
pub mod view;

pub use adapter::{decorate_day, to_calendar_entries, CalendarEntry, DayCell, StyleToken};
pub use view::{weekday_label, CalendarView, ViewKind};
