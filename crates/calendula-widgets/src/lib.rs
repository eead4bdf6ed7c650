//! Widgets for Calendula date grids.
//!
//! - [`Tile`]: a selectable grid cell with cached derived class name and content
//! - [`Day`]: the day tile of a month view
//! - [`Flex`]: container sizing its children in equal proportional slots
//! - [`CalendarConfig`]: YAML configuration of a grid
//!
//! # Examples
//!
//! ```
//! use calendula_widgets::{Day, Flex, TileProps};
//! use calendula_core::{Brick, View};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let first = Day::new(TileProps::new(start, start, View::Month), 1).into_tile();
//!
//! // February 2024 starts on a Thursday
//! let grid = Flex::new(7).offset(3).wrap(true).child(first);
//! assert!(grid.to_html().contains("margin-left: 42.857142857142854%"));
//! ```

pub mod config;
pub mod day;
pub mod flex;
pub mod tile;

pub use config::{CalendarConfig, ConfigError, LayoutConfig};
pub use day::{Day, DAY_CLASS};
pub use flex::Flex;
pub use tile::{FormatFn, Tile, TileClicked, TileDisabledFn, TileHovered, TileProps};
