//! Proportional flex layout: `count` rigid slots of equal width, with an
//! optional leading offset before the first child.

use calendula_core::{FlexDirection, LayoutSlot, Overflow, Rect, Style};
use serde::{Deserialize, Serialize};

/// Slot overrides for `children` children of a layout with `count` slots.
///
/// Every child gets a basis of `100 / count` percent, no shrink or grow, and
/// hidden overflow. Only the child at index 0 gets a left margin, and only
/// for a non-zero `offset`. A `count` of zero yields non-finite percentages.
#[must_use]
pub fn compute_slots(count: u32, offset: Option<u32>, children: usize) -> Vec<LayoutSlot> {
    let count = f64::from(count);
    let basis_percent = 100.0 / count;
    let leading = offset
        .filter(|&o| o != 0)
        .map(|o| 100.0 * f64::from(o) / count);

    (0..children)
        .map(|index| LayoutSlot {
            basis_percent,
            shrink: 0,
            grow: 0,
            overflow: Overflow::Hidden,
            margin_left_percent: if index == 0 { leading } else { None },
        })
        .collect()
}

/// Container declarations: flex display, direction and wrap first, then the
/// caller style on top.
#[must_use]
pub fn container_style(direction: FlexDirection, wrap: bool, caller: &Style) -> Style {
    Style::new()
        .with("display", "flex")
        .with("flex-direction", direction.as_css())
        .with("flex-wrap", if wrap { "wrap" } else { "nowrap" })
        .merged(caller)
}

/// Pixel rectangles for `children` slots inside `bounds`.
///
/// Each slot spans `1 / count` of the main axis. The first child starts
/// `offset` slots in. Without wrapping, children past the end overflow the
/// bounds; with wrapping they continue on further lines that share the cross
/// axis equally.
#[must_use]
pub fn slot_rects(
    bounds: Rect,
    direction: FlexDirection,
    wrap: bool,
    count: u32,
    offset: Option<u32>,
    children: usize,
) -> Vec<Rect> {
    if children == 0 {
        return Vec::new();
    }

    let count_f = count as f32;
    let lead = offset.unwrap_or(0) as usize;
    let per_line = count.max(1) as usize;
    let lines = if wrap {
        (lead + children).div_ceil(per_line)
    } else {
        1
    };

    let (main, cross) = match direction {
        FlexDirection::Row => (bounds.width, bounds.height),
        FlexDirection::Column => (bounds.height, bounds.width),
    };
    let slot_main = main / count_f;
    let line_cross = cross / lines as f32;

    (0..children)
        .map(|index| {
            let position = lead + index;
            let (line, column) = if wrap {
                (position / per_line, position % per_line)
            } else {
                (0, position)
            };
            let main_start = column as f32 * slot_main;
            let cross_start = line as f32 * line_cross;

            match direction {
                FlexDirection::Row => Rect::new(
                    bounds.x + main_start,
                    bounds.y + cross_start,
                    slot_main,
                    line_cross,
                ),
                FlexDirection::Column => Rect::new(
                    bounds.x + cross_start,
                    bounds.y + main_start,
                    line_cross,
                    slot_main,
                ),
            }
        })
        .collect()
}

/// Parameters of a proportional layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionalLayout {
    /// Number of slots per line
    pub count: u32,
    /// Slot widths to skip before the first child
    #[serde(default)]
    pub offset: Option<u32>,
    /// Main axis
    #[serde(default)]
    pub direction: FlexDirection,
    /// Whether children wrap onto further lines
    #[serde(default)]
    pub wrap: bool,
}

impl ProportionalLayout {
    /// Create a row layout with `count` slots.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self {
            count,
            offset: None,
            direction: FlexDirection::Row,
            wrap: false,
        }
    }

    /// Set the leading offset, in slots.
    #[must_use]
    pub const fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the main axis.
    #[must_use]
    pub const fn direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set wrapping.
    #[must_use]
    pub const fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Slot overrides for `children` children.
    #[must_use]
    pub fn slots(&self, children: usize) -> Vec<LayoutSlot> {
        compute_slots(self.count, self.offset, children)
    }

    /// Container declarations over a caller style.
    #[must_use]
    pub fn container_style(&self, caller: &Style) -> Style {
        container_style(self.direction, self.wrap, caller)
    }

    /// Pixel rectangles for `children` children inside `bounds`.
    #[must_use]
    pub fn rects(&self, bounds: Rect, children: usize) -> Vec<Rect> {
        slot_rects(
            bounds,
            self.direction,
            self.wrap,
            self.count,
            self.offset,
            children,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_slots_quarters() {
        let slots = compute_slots(4, None, 4);
        assert_eq!(slots.len(), 4);
        for slot in &slots {
            assert_eq!(slot.basis(), "25%");
            assert_eq!(slot.shrink, 0);
            assert_eq!(slot.grow, 0);
            assert_eq!(slot.overflow, Overflow::Hidden);
            assert_eq!(slot.margin_left(), None);
        }
    }

    #[test]
    fn test_compute_slots_thirds() {
        let slots = compute_slots(3, None, 3);
        assert_eq!(slots[0].basis(), "33.333333333333336%");
        assert_eq!(slots[0].basis_percent, 100.0 / 3.0);
    }

    #[test]
    fn test_compute_slots_offset_first_child_only() {
        let slots = compute_slots(4, Some(1), 4);
        assert_eq!(slots[0].margin_left().as_deref(), Some("25%"));
        assert!(slots[1..].iter().all(|s| s.margin_left_percent.is_none()));
    }

    #[test]
    fn test_compute_slots_zero_offset_is_absent() {
        let slots = compute_slots(4, Some(0), 2);
        assert_eq!(slots[0].margin_left(), None);
    }

    #[test]
    fn test_compute_slots_week_offset() {
        // A month starting on a Thursday in an ISO week grid
        let slots = compute_slots(7, Some(3), 1);
        assert_eq!(slots[0].margin_left_percent, Some(300.0 / 7.0));
    }

    #[test]
    fn test_compute_slots_zero_count_is_non_finite() {
        let slots = compute_slots(0, None, 1);
        assert!(!slots[0].basis_percent.is_finite());
    }

    #[test]
    fn test_compute_slots_count_mismatch_is_not_checked() {
        assert_eq!(compute_slots(7, None, 3).len(), 3);
        assert_eq!(compute_slots(2, None, 5).len(), 5);
    }

    #[test]
    fn test_container_style_defaults() {
        let style = container_style(FlexDirection::Row, false, &Style::new());
        assert_eq!(style.get("display"), Some("flex"));
        assert_eq!(style.get("flex-direction"), Some("row"));
        assert_eq!(style.get("flex-wrap"), Some("nowrap"));
    }

    #[test]
    fn test_container_style_caller_wins() {
        let caller = Style::new().with("flex-wrap", "wrap-reverse").with("gap", "2px");
        let style = container_style(FlexDirection::Column, true, &caller);
        assert_eq!(style.get("flex-direction"), Some("column"));
        assert_eq!(style.get("flex-wrap"), Some("wrap-reverse"));
        assert_eq!(style.get("gap"), Some("2px"));
    }

    #[test]
    fn test_slot_rects_row() {
        let rects = slot_rects(
            Rect::new(0.0, 0.0, 700.0, 100.0),
            FlexDirection::Row,
            false,
            7,
            None,
            3,
        );
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects[2], Rect::new(200.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_slot_rects_offset_shifts_everything() {
        let rects = slot_rects(
            Rect::new(10.0, 0.0, 400.0, 40.0),
            FlexDirection::Row,
            false,
            4,
            Some(1),
            2,
        );
        assert_eq!(rects[0].x, 110.0);
        assert_eq!(rects[1].x, 210.0);
    }

    #[test]
    fn test_slot_rects_column() {
        let rects = slot_rects(
            Rect::new(0.0, 0.0, 50.0, 300.0),
            FlexDirection::Column,
            false,
            3,
            None,
            3,
        );
        assert_eq!(rects[1], Rect::new(0.0, 100.0, 50.0, 100.0));
    }

    #[test]
    fn test_slot_rects_wrap_month_grid() {
        // 31 days starting on the 4th column of a 7-wide grid: 5 lines
        let rects = slot_rects(
            Rect::new(0.0, 0.0, 700.0, 500.0),
            FlexDirection::Row,
            true,
            7,
            Some(3),
            31,
        );
        assert_eq!(rects.len(), 31);
        assert_eq!(rects[0], Rect::new(300.0, 0.0, 100.0, 100.0));
        assert_eq!(rects[4], Rect::new(0.0, 100.0, 100.0, 100.0));
        assert_eq!(rects[30], Rect::new(500.0, 400.0, 100.0, 100.0));
    }

    #[test]
    fn test_slot_rects_empty() {
        assert!(slot_rects(Rect::default(), FlexDirection::Row, true, 7, None, 0).is_empty());
    }

    #[test]
    fn test_proportional_layout_builder() {
        let layout = ProportionalLayout::new(7)
            .offset(2)
            .direction(FlexDirection::Column)
            .wrap(true);
        assert_eq!(layout.count, 7);
        assert_eq!(layout.offset, Some(2));
        assert_eq!(layout.direction, FlexDirection::Column);
        assert!(layout.wrap);
        assert_eq!(layout.slots(2)[0].margin_left_percent, Some(200.0 / 7.0));
    }
}
