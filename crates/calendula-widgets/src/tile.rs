//! Tile widget: one selectable cell of a date grid.

use calendula_core::{
    html_escape, AccessibleRole, BoundTransform, Brick, BrickAssertion, BrickVerification, Date,
    DerivedValue, Event, LayoutResult, LayoutSlot, MouseButton, Recomputed, Rect, Style,
    TileContext, TileDerivedState, TypeId, View, Widget,
};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether a tile is disabled.
pub type TileDisabledFn = Arc<dyn Fn(&TileContext) -> bool + Send + Sync>;

/// Formats a date for a locale.
pub type FormatFn = fn(Option<&str>, Date) -> String;

/// Props of a [`Tile`]. Replaced wholesale on every render cycle.
#[derive(Clone)]
pub struct TileProps {
    active_start_date: Date,
    date: Date,
    view: View,
    children: String,
    classes: Vec<String>,
    tile_class_name: Option<DerivedValue<String>>,
    tile_content: Option<DerivedValue<String>>,
    tile_disabled: Option<TileDisabledFn>,
    min_date: Option<Date>,
    max_date: Option<Date>,
    min_date_transform: BoundTransform,
    max_date_transform: BoundTransform,
    format_abbr: Option<FormatFn>,
    locale: Option<String>,
    style: Style,
    test_id_value: Option<String>,
}

impl TileProps {
    /// Create props for the tile of `date` in a grid of `view`.
    ///
    /// Bound transforms default to the granularity of `view`'s tiles.
    #[must_use]
    pub fn new(active_start_date: Date, date: Date, view: View) -> Self {
        Self {
            active_start_date,
            date,
            view,
            children: String::new(),
            classes: Vec::new(),
            tile_class_name: None,
            tile_content: None,
            tile_disabled: None,
            min_date: None,
            max_date: None,
            min_date_transform: view.min_date_transform(),
            max_date_transform: view.max_date_transform(),
            format_abbr: None,
            locale: None,
            style: Style::new(),
            test_id_value: None,
        }
    }

    /// Set the visible label.
    #[must_use]
    pub fn children(mut self, label: impl Into<String>) -> Self {
        self.children = label.into();
        self
    }

    /// Set extra class tokens.
    #[must_use]
    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the class name source.
    #[must_use]
    pub fn tile_class_name(mut self, source: DerivedValue<String>) -> Self {
        self.tile_class_name = Some(source);
        self
    }

    /// Set the content source.
    #[must_use]
    pub fn tile_content(mut self, source: DerivedValue<String>) -> Self {
        self.tile_content = Some(source);
        self
    }

    /// Set the disabling predicate.
    #[must_use]
    pub fn tile_disabled(mut self, predicate: TileDisabledFn) -> Self {
        self.tile_disabled = Some(predicate);
        self
    }

    /// Set the minimum date bound.
    #[must_use]
    pub fn min_date(mut self, date: Date) -> Self {
        self.min_date = Some(date);
        self
    }

    /// Set the maximum date bound.
    #[must_use]
    pub fn max_date(mut self, date: Date) -> Self {
        self.max_date = Some(date);
        self
    }

    /// Set both bounds at once; `None` removes a bound.
    #[must_use]
    pub fn bounds(mut self, min_date: Option<Date>, max_date: Option<Date>) -> Self {
        self.min_date = min_date;
        self.max_date = max_date;
        self
    }

    /// Override the minimum bound transform.
    #[must_use]
    pub fn min_date_transform(mut self, transform: BoundTransform) -> Self {
        self.min_date_transform = transform;
        self
    }

    /// Override the maximum bound transform.
    #[must_use]
    pub fn max_date_transform(mut self, transform: BoundTransform) -> Self {
        self.max_date_transform = transform;
        self
    }

    /// Wrap the label in an abbreviation read as the formatter's output.
    #[must_use]
    pub fn format_abbr(mut self, formatter: FormatFn) -> Self {
        self.format_abbr = Some(formatter);
        self
    }

    /// Set the locale handed to formatters.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the caller style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set the grid view. Bound transforms are left as they are.
    #[must_use]
    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Move the tile to a different active range.
    #[must_use]
    pub fn active_start_date(mut self, date: Date) -> Self {
        self.active_start_date = date;
        self
    }

    /// Context handed to derived props.
    #[must_use]
    pub const fn context(&self) -> TileContext {
        TileContext::new(self.active_start_date, self.date, self.view)
    }

    /// Date of the tile.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Grid view of the tile.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Visible label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.children
    }

    /// Extra class tokens.
    #[must_use]
    pub fn class_tokens(&self) -> &[String] {
        &self.classes
    }

    /// Locale handed to formatters.
    #[must_use]
    pub fn locale_str(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Whether the tile is disabled: before the normalized minimum, after the
    /// normalized maximum, or rejected by the predicate.
    ///
    /// Missing bounds are skipped. A panicking predicate is not caught.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        let before_min = self
            .min_date
            .is_some_and(|min| (self.min_date_transform)(min) > self.date);
        let after_max = self
            .max_date
            .is_some_and(|max| (self.max_date_transform)(max) < self.date);

        before_min
            || after_max
            || self
                .tile_disabled
                .as_ref()
                .is_some_and(|predicate| predicate(&self.context()))
    }

    /// Abbreviation label, when a formatter is set.
    #[must_use]
    pub fn abbr_label(&self) -> Option<String> {
        self.format_abbr
            .map(|format| format(self.locale.as_deref(), self.date))
    }
}

impl fmt::Debug for TileProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileProps")
            .field("active_start_date", &self.active_start_date)
            .field("date", &self.date)
            .field("view", &self.view)
            .field("children", &self.children)
            .field("classes", &self.classes)
            .field("tile_class_name", &self.tile_class_name)
            .field("tile_content", &self.tile_content)
            .field("tile_disabled", &self.tile_disabled.is_some())
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("locale", &self.locale)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// Message emitted when an enabled tile is activated.
#[derive(Debug, Clone, PartialEq)]
pub struct TileClicked {
    /// Date of the tile
    pub date: Date,
    /// Event that completed the activation
    pub event: Event,
}

/// Message emitted when the pointer enters or keyboard focus lands on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileHovered {
    /// Date of the tile
    pub date: Date,
}

/// Join class tokens, dropping empty ones.
fn join_classes<'a>(tokens: impl IntoIterator<Item = &'a str>) -> String {
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Selectable grid cell with cached derived class name and content.
pub struct Tile {
    props: TileProps,
    derived: TileDerivedState,
    abbr_label: Option<String>,
    slot: Option<LayoutSlot>,
    hovered: bool,
    focused: bool,
    pressed: bool,
    key_pressed: bool,
    bounds: Rect,
}

impl Tile {
    /// Create a tile and run its first render cycle.
    #[must_use]
    pub fn new(props: TileProps) -> Self {
        let mut tile = Self {
            abbr_label: None,
            props,
            derived: TileDerivedState::new(),
            slot: None,
            hovered: false,
            focused: false,
            pressed: false,
            key_pressed: false,
            bounds: Rect::default(),
        };
        tile.render_cycle();
        tile
    }

    /// Replace the props and bring derived state up to date.
    pub fn set_props(&mut self, props: TileProps) -> Recomputed {
        self.props = props;
        self.render_cycle()
    }

    fn render_cycle(&mut self) -> Recomputed {
        let ctx = self.props.context();
        self.abbr_label = self.props.abbr_label();
        self.derived.recompute(
            &ctx,
            self.props.tile_class_name.as_ref(),
            self.props.tile_content.as_ref(),
        )
    }

    /// Current props.
    #[must_use]
    pub const fn props(&self) -> &TileProps {
        &self.props
    }

    /// Date of the tile.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.props.date
    }

    /// Cached derived class name.
    #[must_use]
    pub fn tile_class_name(&self) -> Option<Arc<String>> {
        self.derived.class_name()
    }

    /// Cached derived content.
    #[must_use]
    pub fn tile_content(&self) -> Option<Arc<String>> {
        self.derived.content()
    }

    /// Full class attribute: extra classes followed by the derived class name.
    #[must_use]
    pub fn class_name(&self) -> String {
        let derived = self.derived.class_name();
        join_classes(
            self.props
                .classes
                .iter()
                .map(String::as_str)
                .chain(derived.as_deref().map(String::as_str)),
        )
    }

    /// Whether the tile is disabled for the current props.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.props.is_disabled()
    }

    /// Whether the pointer is over the tile.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the tile holds keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    fn hovered_message(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(TileHovered {
            date: self.props.date,
        }))
    }

    fn clicked_message(&self, event: &Event) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(TileClicked {
            date: self.props.date,
            event: event.clone(),
        }))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tile")
            .field("props", &self.props)
            .field("derived", &self.derived)
            .field("slot", &self.slot)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Brick for Tile {
    fn brick_name(&self) -> &'static str {
        "Tile"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        let has_text = !self.props.children.is_empty()
            || self.derived.content().is_some_and(|c| !c.is_empty());

        BrickVerification::start()
            .check(
                BrickAssertion::TextVisible,
                (!has_text).then(|| "Tile has neither label nor content".to_string()),
            )
            .finish()
    }

    fn to_html(&self) -> String {
        let mut attrs = String::from(r#"type="button""#);

        let class_name = self.class_name();
        if !class_name.is_empty() {
            attrs.push_str(&format!(r#" class="{}""#, html_escape(&class_name)));
        }
        let style = self.effective_style();
        if !style.is_empty() {
            attrs.push_str(&format!(r#" style="{}""#, html_escape(&style.to_inline())));
        }
        if self.is_disabled() {
            attrs.push_str(" disabled");
        }
        if let Some(id) = &self.props.test_id_value {
            attrs.push_str(&format!(r#" data-testid="{}""#, html_escape(id)));
        }

        let label = html_escape(&self.props.children);
        let label = match &self.abbr_label {
            Some(aria) => format!(r#"<abbr aria-label="{}">{label}</abbr>"#, html_escape(aria)),
            None => label,
        };
        // Content is markup supplied by the caller and is emitted as is.
        let content = self.derived.content();
        let content = content.as_deref().map_or("", String::as_str);

        format!("<button {attrs}>{label}{content}</button>")
    }

    fn to_css(&self) -> String {
        match self.props.classes.first() {
            Some(class) => format!(
                r".{class} {{
    max-width: 100%;
    text-align: center;
}}
.{class}:disabled {{
    cursor: default;
}}"
            ),
            None => String::new(),
        }
    }
}

impl Widget for Tile {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.is_disabled() {
            self.pressed = false;
            self.key_pressed = false;
            return None;
        }

        match event {
            Event::MouseMove { position } => {
                let inside = self.bounds.contains_point(position);
                let entered = inside && !self.hovered;
                self.hovered = inside;
                if entered {
                    self.hovered_message()
                } else {
                    None
                }
            }
            Event::FocusIn => {
                self.focused = true;
                self.hovered_message()
            }
            Event::FocusOut => {
                self.focused = false;
                self.key_pressed = false;
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.bounds.contains_point(position) {
                    self.pressed = true;
                }
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;

                if was_pressed && self.bounds.contains_point(position) {
                    self.clicked_message(event)
                } else {
                    None
                }
            }
            Event::KeyDown { key } if key.is_activation() => {
                self.key_pressed = self.focused;
                None
            }
            Event::KeyUp { key } if key.is_activation() => {
                let was_pressed = self.key_pressed;
                self.key_pressed = false;

                if was_pressed && self.focused {
                    self.clicked_message(event)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn style(&self) -> &Style {
        &self.props.style
    }

    fn assign_slot(&mut self, slot: Option<LayoutSlot>) {
        self.slot = slot;
    }

    fn effective_style(&self) -> Style {
        match &self.slot {
            Some(slot) => slot.apply_to(&self.props.style),
            None => self.props.style.clone(),
        }
    }

    fn is_interactive(&self) -> bool {
        !self.is_disabled()
    }

    fn is_focusable(&self) -> bool {
        !self.is_disabled()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.abbr_label
            .as_deref()
            .or(Some(self.props.children.as_str()))
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.props.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
