//! Dates, views and the per-tile context.
//!
//! A [`Date`] is a naive (zone-less) instant. Two dates are considered equal for
//! cache invalidation when they fall on the same millisecond.
//!
//! # Examples
//!
//! ```
//! use calendula_core::date::{self, View};
//! use chrono::NaiveDate;
//!
//! let noon = NaiveDate::from_ymd_opt(2024, 3, 15)
//!     .and_then(|d| d.and_hms_opt(12, 0, 0))
//!     .expect("valid date");
//!
//! let start = date::day_start(noon);
//! assert_eq!(start.to_string(), "2024-03-15 00:00:00");
//!
//! // Month grids hold day tiles, so bounds are normalized to whole days.
//! let transform = View::Month.max_date_transform();
//! assert_eq!(transform(noon).to_string(), "2024-03-15 23:59:59.999");
//! ```

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Instant used throughout the toolkit.
pub type Date = NaiveDateTime;

/// Normalizes a bound to a comparable instant (e.g. start or end of a day).
pub type BoundTransform = fn(Date) -> Date;

/// The unit a grid of tiles represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Grid of days
    #[default]
    Month,
    /// Grid of months
    Year,
    /// Grid of years
    Decade,
    /// Grid of decades
    Century,
}

impl View {
    /// Transform applied to a minimum bound for tiles of this view.
    ///
    /// A month view holds day tiles, a year view month tiles, and so on.
    #[must_use]
    pub fn min_date_transform(self) -> BoundTransform {
        match self {
            Self::Month => day_start,
            Self::Year => month_start,
            Self::Decade => year_start,
            Self::Century => decade_start,
        }
    }

    /// Transform applied to a maximum bound for tiles of this view.
    #[must_use]
    pub fn max_date_transform(self) -> BoundTransform {
        match self {
            Self::Month => day_end,
            Self::Year => month_end,
            Self::Decade => year_end,
            Self::Century => decade_end,
        }
    }

    /// Lowercase name, as used in class names and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
            Self::Decade => "decade",
            Self::Century => "century",
        }
    }
}

/// Context handed to every value-or-function tile prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileContext {
    /// First date of the range the grid currently shows
    pub active_start_date: Date,
    /// Date this tile represents
    pub date: Date,
    /// Granularity of the grid
    pub view: View,
}

impl TileContext {
    /// Create a new tile context.
    #[must_use]
    pub const fn new(active_start_date: Date, date: Date, view: View) -> Self {
        Self {
            active_start_date,
            date,
            view,
        }
    }
}

/// Calendar conventions that decide which weekdays form the weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    /// ISO 8601, weeks start on Monday
    #[default]
    Iso8601,
    /// Gregorian (US), weeks start on Sunday
    Gregory,
    /// Hebrew calendar
    Hebrew,
    /// Islamic calendar
    Islamic,
}

/// Millisecond timestamp of a date.
#[must_use]
pub fn millis(date: Date) -> i64 {
    date.and_utc().timestamp_millis()
}

/// True when exactly one date is present, or both are present on different
/// milliseconds.
#[must_use]
pub fn dates_differ(a: Option<Date>, b: Option<Date>) -> bool {
    match (a, b) {
        (None, None) => false,
        (Some(a), Some(b)) => millis(a) != millis(b),
        _ => true,
    }
}

/// Whether `date` falls on a weekend under the given calendar.
#[must_use]
pub fn is_weekend(date: Date, calendar_type: CalendarType) -> bool {
    let weekday = date.weekday();
    match calendar_type {
        CalendarType::Hebrew | CalendarType::Islamic => {
            matches!(weekday, Weekday::Fri | Weekday::Sat)
        }
        CalendarType::Iso8601 | CalendarType::Gregory => {
            matches!(weekday, Weekday::Sat | Weekday::Sun)
        }
    }
}

/// Default day label: the day of the month.
#[must_use]
pub fn format_day(_locale: Option<&str>, date: Date) -> String {
    date.day().to_string()
}

/// Default long date, e.g. `January 5, 2024`.
#[must_use]
pub fn format_long_date(_locale: Option<&str>, date: Date) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn midnight(day: NaiveDate) -> Date {
    day.and_time(NaiveTime::default())
}

fn last_millisecond(day: NaiveDate) -> Date {
    let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default();
    day.and_time(time)
}

/// Decades start on years ending in 1 (2021 - 2030, -9 - 0).
fn decade_start_year(year: i32) -> i32 {
    year - (year - 1).rem_euclid(10)
}

// Bounds falling outside chrono's range saturate to its first or last day.

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_yo_opt(year, 1).unwrap_or(NaiveDate::MIN)
}

fn last_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Midnight of the same day.
#[must_use]
pub fn day_start(date: Date) -> Date {
    midnight(date.date())
}

/// Last millisecond of the same day.
#[must_use]
pub fn day_end(date: Date) -> Date {
    last_millisecond(date.date())
}

/// Midnight of the first day of the month.
#[must_use]
pub fn month_start(date: Date) -> Date {
    let day = date.date();
    midnight(day.with_day(1).unwrap_or(day))
}

/// Last millisecond of the month.
#[must_use]
pub fn month_end(date: Date) -> Date {
    let last = month_start(date)
        .date()
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    last_millisecond(last)
}

/// Midnight of January 1st.
#[must_use]
pub fn year_start(date: Date) -> Date {
    midnight(first_of_year(date.year()))
}

/// Last millisecond of December 31st.
#[must_use]
pub fn year_end(date: Date) -> Date {
    last_millisecond(last_of_year(date.year()))
}

/// Midnight of January 1st of the decade's first year.
#[must_use]
pub fn decade_start(date: Date) -> Date {
    midnight(first_of_year(decade_start_year(date.year())))
}

/// Last millisecond of the decade's last year.
#[must_use]
pub fn decade_end(date: Date) -> Date {
    last_millisecond(last_of_year(decade_start_year(date.year()) + 9))
}
