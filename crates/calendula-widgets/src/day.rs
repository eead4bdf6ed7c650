//! Day tile of a month grid.

use crate::tile::{FormatFn, Tile, TileProps};
use calendula_core::date::{day_end, day_start, format_day, format_long_date, is_weekend};
use calendula_core::{CalendarType, Date, View};
use chrono::Datelike;

/// Base class of every day tile.
pub const DAY_CLASS: &str = "calendula__month-view__days__day";

/// A day in a month view.
///
/// Decorates the generic tile props with weekend and neighboring-month
/// classes, a day-number label and a long-date abbreviation.
///
/// # Examples
///
/// ```
/// use calendula_widgets::{Day, TileProps};
/// use calendula_core::View;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let day = Day::new(TileProps::new(start, date, View::Month), 5);
///
/// let tile = day.into_tile();
/// assert_eq!(
///     tile.class_name(),
///     "calendula__month-view__days__day calendula__month-view__days__day--weekend"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Day {
    props: TileProps,
    calendar_type: CalendarType,
    current_month_index: u32,
    format_day: FormatFn,
    format_long_date: FormatFn,
}

impl Day {
    /// Create a day tile. `current_month_index` is the zero-based month shown
    /// by the grid; days of other months are marked as neighbors.
    #[must_use]
    pub fn new(props: TileProps, current_month_index: u32) -> Self {
        Self {
            props,
            calendar_type: CalendarType::default(),
            current_month_index,
            format_day,
            format_long_date,
        }
    }

    /// Set the calendar type deciding weekends.
    #[must_use]
    pub fn calendar_type(mut self, calendar_type: CalendarType) -> Self {
        self.calendar_type = calendar_type;
        self
    }

    /// Set the label formatter.
    #[must_use]
    pub fn format_day(mut self, formatter: FormatFn) -> Self {
        self.format_day = formatter;
        self
    }

    /// Set the abbreviation formatter.
    #[must_use]
    pub fn format_long_date(mut self, formatter: FormatFn) -> Self {
        self.format_long_date = formatter;
        self
    }

    /// Date of the day.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.props.date()
    }

    /// Whether the day falls on a weekend.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        is_weekend(self.date(), self.calendar_type)
    }

    /// Whether the day belongs to a month other than the one shown.
    #[must_use]
    pub fn is_neighboring_month(&self) -> bool {
        self.date().month0() != self.current_month_index
    }

    /// Tile props with day decorations applied. Caller classes come first
    /// and the view is always [`View::Month`].
    #[must_use]
    pub fn tile_props(&self) -> TileProps {
        let mut classes = self.props.class_tokens().to_vec();
        classes.push(DAY_CLASS.to_string());
        if self.is_weekend() {
            classes.push(format!("{DAY_CLASS}--weekend"));
        }
        if self.is_neighboring_month() {
            classes.push(format!("{DAY_CLASS}--neighboringMonth"));
        }

        let label = (self.format_day)(self.props.locale_str(), self.date());

        self.props
            .clone()
            .with_view(View::Month)
            .classes(classes)
            .children(label)
            .format_abbr(self.format_long_date)
            .min_date_transform(day_start)
            .max_date_transform(day_end)
    }

    /// Build the tile.
    #[must_use]
    pub fn into_tile(self) -> Tile {
        Tile::new(self.tile_props())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendula_core::{Brick, DerivedValue, TileContext};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|x| x.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn day(d: Date) -> Day {
        Day::new(TileProps::new(date(2024, 6, 1), d, View::Month), 5)
    }

    #[test]
    fn test_weekday_in_month() {
        // 2024-06-05 is a Wednesday
        let tile = day(date(2024, 6, 5)).into_tile();
        assert_eq!(tile.class_name(), DAY_CLASS);
        assert_eq!(tile.props().label(), "5");
    }

    #[test]
    fn test_neighboring_month() {
        let d = day(date(2024, 7, 1));
        assert!(d.is_neighboring_month());
        assert!(d
            .into_tile()
            .class_name()
            .ends_with("calendula__month-view__days__day--neighboringMonth"));
    }

    #[test]
    fn test_weekend_depends_on_calendar_type() {
        // 2024-06-07 is a Friday
        let d = day(date(2024, 6, 7));
        assert!(!d.is_weekend());
        assert!(d.calendar_type(CalendarType::Hebrew).is_weekend());
    }

    #[test]
    fn test_caller_classes_precede_day_classes() {
        // 2024-06-08 is a Saturday
        let props = TileProps::new(date(2024, 6, 1), date(2024, 6, 8), View::Month)
            .classes(["selected"]);
        let tile = Day::new(props, 5).into_tile();
        assert_eq!(
            tile.class_name(),
            format!("selected {DAY_CLASS} {DAY_CLASS}--weekend")
        );
    }

    #[test]
    fn test_day_forces_month_view() {
        let props = TileProps::new(date(2024, 1, 1), date(2024, 6, 5), View::Year)
            .tile_class_name(DerivedValue::derived(|ctx: &TileContext| {
                ctx.view.as_str().to_string()
            }));
        let tile = Day::new(props, 5).into_tile();
        assert_eq!(tile.props().view(), View::Month);
        assert_eq!(tile.class_name(), format!("{DAY_CLASS} month"));
    }

    #[test]
    fn test_abbr_uses_long_date() {
        let html = day(date(2024, 6, 5)).into_tile().to_html();
        assert!(html.contains(r#"<abbr aria-label="June 5, 2024">5</abbr>"#));
    }

    #[test]
    fn test_custom_formatters() {
        fn padded(_: Option<&str>, d: Date) -> String {
            d.format("%d").to_string()
        }
        let tile = day(date(2024, 6, 5)).format_day(padded).into_tile();
        assert_eq!(tile.props().label(), "05");
    }

    #[test]
    fn test_bounds_use_day_granularity() {
        let min = NaiveDate::from_ymd_opt(2024, 6, 5)
            .and_then(|x| x.and_hms_opt(18, 0, 0))
            .unwrap();
        let on_day = TileProps::new(date(2024, 6, 1), date(2024, 6, 5), View::Month).min_date(min);
        assert!(!Day::new(on_day, 5).into_tile().is_disabled());

        let day_before =
            TileProps::new(date(2024, 6, 1), date(2024, 6, 4), View::Month).min_date(min);
        assert!(Day::new(day_before, 5).into_tile().is_disabled());
    }
}
