//! Proportional layout for Calendula grids.
//!
//! A row or column of `count` rigid, equally sized slots. Children never grow
//! or shrink and clip their content; the first child may be pushed in by a
//! whole number of slots (e.g. the weekday a month starts on).
//!
//! ```
//! use calendula_layout::ProportionalLayout;
//!
//! let week = ProportionalLayout::new(7).offset(3);
//! let slots = week.slots(4);
//! assert_eq!(slots[0].margin_left().as_deref(), Some("42.857142857142854%"));
//! assert_eq!(slots[1].margin_left(), None);
//! ```

mod proportional;

pub use proportional::{compute_slots, container_style, slot_rects, ProportionalLayout};
