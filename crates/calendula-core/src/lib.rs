//! Core types and traits for the Calendula date-grid toolkit.
//!
//! This crate provides the foundations shared by layout and widgets:
//! - Dates and tile context: [`Date`], [`View`], [`TileContext`], bound transforms
//! - Derived tile state: [`DerivedValue`], [`TileDerivedState`]
//! - Styles: [`Style`], [`LayoutSlot`], [`FlexDirection`]
//! - Widgets: [`Brick`], [`Widget`], [`Event`], geometry

pub mod brick;
pub mod date;
pub mod derived;
mod event;
mod geometry;
pub mod style;
pub mod widget;

pub use brick::{html_escape, Brick, BrickAssertion, BrickVerification};
pub use date::{dates_differ, BoundTransform, CalendarType, Date, TileContext, View};
pub use derived::{DeriveFn, DerivedSlot, DerivedValue, Recomputed, TileDerivedState};
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use style::{to_percent, FlexDirection, LayoutSlot, Overflow, Style};
pub use widget::{AccessibleRole, LayoutResult, TypeId, Widget};
