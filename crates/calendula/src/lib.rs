//! Calendula: date-grid tiles and proportional flex layout.
//!
//! Tiles cache the class name and content derived from their props and only
//! recompute them when a source is replaced or the grid navigates to a new
//! active range. Containers lay tiles out in `count` equal slots.
//!
//! # Examples
//!
//! ```
//! use calendula::prelude::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let config = CalendarConfig::from_yaml("max_date: 2024-01-31T00:00:00").unwrap();
//!
//! let tile = Tile::new(
//!     TileProps::new(start, start, View::Month)
//!         .children("1")
//!         .with_bounds_from(&config),
//! );
//! assert!(tile.is_disabled());
//! assert_eq!(ProportionalLayout::new(4).slots(1)[0].basis(), "25%");
//! ```

pub use calendula_core::*;
pub use calendula_layout as layout;
pub use calendula_widgets as widgets;

/// Commonly used types.
pub mod prelude {
    pub use calendula_core::{
        Brick, Date, DerivedValue, Event, Rect, Style, TileContext, View, Widget,
    };
    pub use calendula_layout::ProportionalLayout;
    pub use calendula_widgets::{
        CalendarConfig, Day, Flex, Tile, TileClicked, TileHovered, TileProps,
    };
}
