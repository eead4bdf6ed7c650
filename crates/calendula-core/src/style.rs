//! Inline style declarations and the per-slot overrides of proportional layout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Format a number as a CSS percentage using the shortest representation that
/// round-trips (`25%`, `33.333333333333336%`).
#[must_use]
pub fn to_percent(value: f64) -> String {
    format!("{value}%")
}

/// Inline CSS declarations, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style {
    declarations: BTreeMap<String, String>,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::set`].
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.insert(property.into(), value.into());
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.declarations.remove(property)
    }

    /// Copy of `self` with every declaration of `overrides` applied on top.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut out = self.clone();
        for (property, value) in &overrides.declarations {
            out.set(property.clone(), value.clone());
        }
        out
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate declarations in property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as an inline `style` attribute value.
    #[must_use]
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_inline())
    }
}

/// Main axis of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    /// Horizontal
    #[default]
    Row,
    /// Vertical
    Column,
}

impl FlexDirection {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// Overflow handling of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Clip content at the slot edge
    #[default]
    Hidden,
    /// Let content spill over
    Visible,
}

impl Overflow {
    /// CSS keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }
}

/// Style overrides assigned to one child of a proportional layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSlot {
    /// Share of the main axis, in percent
    pub basis_percent: f64,
    /// Flex shrink factor
    pub shrink: u32,
    /// Flex grow factor
    pub grow: u32,
    /// Overflow handling
    pub overflow: Overflow,
    /// Leading margin in percent; `None` leaves the margin untouched
    pub margin_left_percent: Option<f64>,
}

impl LayoutSlot {
    /// `flex-basis` value.
    #[must_use]
    pub fn basis(&self) -> String {
        to_percent(self.basis_percent)
    }

    /// `margin-left` value, if the slot carries one.
    #[must_use]
    pub fn margin_left(&self) -> Option<String> {
        self.margin_left_percent.map(to_percent)
    }

    /// The slot's declarations alone.
    #[must_use]
    pub fn to_style(&self) -> Style {
        let mut style = Style::new()
            .with("flex-basis", self.basis())
            .with("flex-shrink", self.shrink.to_string())
            .with("flex-grow", self.grow.to_string())
            .with("overflow", self.overflow.as_css());
        if let Some(margin) = self.margin_left() {
            style.set("margin-left", margin);
        }
        style
    }

    /// Apply the slot on top of a caller style.
    ///
    /// Slot fields win for basis, shrink, grow and overflow, and for the left
    /// margin when the slot has one. Every other property passes through.
    #[must_use]
    pub fn apply_to(&self, base: &Style) -> Style {
        base.merged(&self.to_style())
    }
}
