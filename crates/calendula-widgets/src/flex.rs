//! Flex container that sizes its children proportionally.

use crate::config::LayoutConfig;
use calendula_core::{
    html_escape, AccessibleRole, Brick, BrickAssertion, BrickVerification, Event, FlexDirection,
    Key, LayoutResult, LayoutSlot, Rect, Style, TypeId, Widget,
};
use calendula_layout::ProportionalLayout;
use std::any::Any;

/// Container laying out children in `count` equal slots per line.
///
/// Every child receives a [`LayoutSlot`] on insertion and again on each
/// layout pass, so a child always renders with the container's current
/// proportions merged over its own style.
///
/// Pointer events reach every child, which test the position against their
/// own bounds. Focus and keys go to the focused child only; arrow keys and
/// Tab move focus between focusable children.
pub struct Flex {
    grid: ProportionalLayout,
    class_name: Option<String>,
    style: Style,
    children: Vec<Box<dyn Widget>>,
    slot: Option<LayoutSlot>,
    test_id_value: Option<String>,
    bounds: Rect,
    focused: Option<usize>,
    assertions: Vec<BrickAssertion>,
}

impl Flex {
    /// Create a row container with `count` slots.
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self::with_layout(ProportionalLayout::new(count))
    }

    /// Create a container from layout parameters.
    #[must_use]
    pub fn with_layout(grid: ProportionalLayout) -> Self {
        Self {
            grid,
            class_name: None,
            style: Style::new(),
            children: Vec::new(),
            slot: None,
            test_id_value: None,
            bounds: Rect::default(),
            focused: None,
            assertions: vec![BrickAssertion::custom("positive-count")],
        }
    }

    /// Create a container from a configured layout.
    #[must_use]
    pub fn from_config(config: &LayoutConfig) -> Self {
        let mut flex = Self::with_layout(config.grid()).style(config.style.clone());
        flex.class_name.clone_from(&config.class_name);
        flex
    }

    /// Set the leading offset, in slots.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.grid = self.grid.offset(offset);
        self.assign_slots();
        self
    }

    /// Set the main axis.
    #[must_use]
    pub fn direction(mut self, direction: FlexDirection) -> Self {
        self.grid = self.grid.direction(direction);
        self
    }

    /// Set wrapping.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.grid = self.grid.wrap(wrap);
        self
    }

    /// Set the class attribute.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set the caller style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Add a child widget.
    #[must_use]
    pub fn child(mut self, widget: impl Widget + 'static) -> Self {
        self.children.push(Box::new(widget));
        self.assign_slots();
        self
    }

    /// Add boxed children.
    #[must_use]
    pub fn children_from(mut self, widgets: impl IntoIterator<Item = Box<dyn Widget>>) -> Self {
        self.children.extend(widgets);
        self.assign_slots();
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Layout parameters.
    #[must_use]
    pub const fn grid(&self) -> &ProportionalLayout {
        &self.grid
    }

    /// Container declarations: flex display with the caller style on top.
    #[must_use]
    pub fn container_style(&self) -> Style {
        self.grid.container_style(&self.style)
    }

    /// Index of the child holding keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Focus offset for a navigation key: one child across, a full line down.
    fn navigation_step(&self, key: Key) -> Option<isize> {
        let line = isize::try_from(self.grid.count).unwrap_or(isize::MAX);
        match key {
            Key::Left => Some(-1),
            Key::Right | Key::Tab => Some(1),
            Key::Up => Some(-line),
            Key::Down => Some(line),
            _ => None,
        }
    }

    /// Next focusable child after `from`, skipping disabled ones.
    fn step_focus(&self, from: usize, step: isize) -> Option<usize> {
        if step == 0 {
            return None;
        }
        let mut index = from;
        loop {
            index = index.checked_add_signed(step)?;
            if self.children.get(index)?.is_focusable() {
                return Some(index);
            }
        }
    }

    fn move_focus(&mut self, to: usize) -> Option<Box<dyn Any + Send>> {
        if let Some(child) = self.focused.and_then(|i| self.children.get_mut(i)) {
            child.event(&Event::FocusOut);
        }
        tracing::trace!(from = ?self.focused, to, "moving focus");
        self.focused = Some(to);
        self.children.get_mut(to)?.event(&Event::FocusIn)
    }

    fn assign_slots(&mut self) {
        let slots = self.grid.slots(self.children.len());
        tracing::debug!(
            count = self.grid.count,
            offset = ?self.grid.offset,
            children = self.children.len(),
            "assigning proportional slots"
        );
        for (child, slot) in self.children.iter_mut().zip(slots) {
            child.assign_slot(Some(slot));
        }
    }
}

impl std::fmt::Debug for Flex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flex")
            .field("grid", &self.grid)
            .field("class_name", &self.class_name)
            .field("style", &self.style)
            .field("children", &self.children.len())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Brick for Flex {
    fn brick_name(&self) -> &'static str {
        "Flex"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &self.assertions
    }

    fn verify(&self) -> BrickVerification {
        let mut builder = BrickVerification::start();
        for assertion in &self.assertions {
            let failure = match assertion {
                BrickAssertion::Custom { name } if name == "positive-count" => (self.grid.count
                    == 0)
                    .then(|| "slot count must be at least 1".to_string()),
                _ => None,
            };
            builder = builder.check(assertion.clone(), failure);
        }
        builder.finish()
    }

    fn to_html(&self) -> String {
        let mut attrs = String::new();
        if let Some(class) = self.class_name.as_deref().filter(|c| !c.is_empty()) {
            attrs.push_str(&format!(r#" class="{}""#, html_escape(class)));
        }
        let style = self.effective_style();
        attrs.push_str(&format!(r#" style="{}""#, html_escape(&style.to_inline())));
        if let Some(id) = &self.test_id_value {
            attrs.push_str(&format!(r#" data-testid="{}""#, html_escape(id)));
        }

        let inner: String = self.children.iter().map(|c| c.to_html()).collect();
        format!("<div{attrs}>{inner}</div>")
    }

    fn to_css(&self) -> String {
        let mut rules: Vec<String> = Vec::new();
        for child in &self.children {
            let css = child.to_css();
            if !css.is_empty() && !rules.contains(&css) {
                rules.push(css);
            }
        }
        rules.join("\n")
    }
}

impl Widget for Flex {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.assign_slots();

        let rects = self.grid.rects(bounds, self.children.len());
        for (child, rect) in self.children.iter_mut().zip(rects) {
            child.layout(rect);
        }

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        // A release outside every child still has to clear a pressed tile.
        if event.position().is_some() {
            let mut message = None;
            for child in &mut self.children {
                let msg = child.event(event);
                if message.is_none() {
                    message = msg;
                }
            }
            return message;
        }

        match event {
            Event::FocusIn => {
                let target = match self.focused {
                    Some(index) => index,
                    None => self.children.iter().position(|c| c.is_focusable())?,
                };
                self.focused = Some(target);
                self.children.get_mut(target)?.event(event)
            }
            Event::FocusOut => {
                let index = self.focused.take()?;
                self.children.get_mut(index)?.event(event)
            }
            Event::KeyDown { key } if self.navigation_step(*key).is_some() => {
                let from = self.focused?;
                let step = self.navigation_step(*key)?;
                let to = self.step_focus(from, step)?;
                self.move_focus(to)
            }
            _ if event.is_keyboard() => {
                let index = self.focused?;
                self.children.get_mut(index)?.event(event)
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn assign_slot(&mut self, slot: Option<LayoutSlot>) {
        self.slot = slot;
    }

    fn effective_style(&self) -> Style {
        let container = self.container_style();
        match &self.slot {
            Some(slot) => slot.apply_to(&container),
            None => container,
        }
    }

    fn is_interactive(&self) -> bool {
        self.children.iter().any(|c| c.is_interactive())
    }

    fn is_focusable(&self) -> bool {
        self.children.iter().any(|c| c.is_focusable())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Grid
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
