//! Derived tile state: values that are either static or computed from a
//! [`TileContext`], cached per tile and recomputed only when their inputs change.
//!
//! # Invalidation
//!
//! A cached slice is reused until either its source (compared by identity, not
//! by value) or the tile's `active_start_date` (compared to the millisecond)
//! changes. Class name and content track their sources independently but share
//! the `active_start_date` snapshot, so a new active range invalidates both.
//!
//! # Examples
//!
//! ```
//! use calendula_core::{DerivedValue, TileContext, TileDerivedState, View};
//! use chrono::NaiveDate;
//! use std::sync::Arc;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .and_then(|d| d.and_hms_opt(0, 0, 0))
//!     .expect("valid date");
//! let ctx = TileContext::new(start, start, View::Month);
//!
//! let class_name = DerivedValue::derived(|ctx: &TileContext| format!("view-{}", ctx.view.as_str()));
//! let content: Option<DerivedValue<String>> = None;
//!
//! let mut state = TileDerivedState::new();
//! state.recompute(&ctx, Some(&class_name), content.as_ref());
//! let first = state.class_name().expect("computed");
//!
//! // Same source, same active start date: the cached value is reused.
//! let outcome = state.recompute(&ctx, Some(&class_name), content.as_ref());
//! assert!(!outcome.class_name);
//! assert!(Arc::ptr_eq(&first, &state.class_name().expect("cached")));
//! ```

use crate::date::{dates_differ, Date, TileContext};
use std::fmt;
use std::sync::Arc;

/// Function form of a derived value.
pub type DeriveFn<V> = dyn Fn(&TileContext) -> V + Send + Sync;

/// A prop that is either a fixed value or a function of the tile context.
pub enum DerivedValue<V> {
    /// Passed through as is
    Static(Arc<V>),
    /// Evaluated against the tile context on recomputation
    Derived(Arc<DeriveFn<V>>),
}

impl<V> DerivedValue<V> {
    /// Wrap a fixed value.
    #[must_use]
    pub fn value(value: V) -> Self {
        Self::Static(Arc::new(value))
    }

    /// Wrap a function of the tile context.
    #[must_use]
    pub fn derived(f: impl Fn(&TileContext) -> V + Send + Sync + 'static) -> Self {
        Self::Derived(Arc::new(f))
    }

    /// Identity comparison: true only for clones of the same source.
    #[must_use]
    pub fn same_source(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(a), Self::Static(b)) => Arc::ptr_eq(a, b),
            (Self::Derived(a), Self::Derived(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Produce the value for a context. Static values are shared, not copied.
    ///
    /// Panics raised by a derive function propagate to the caller.
    #[must_use]
    pub fn resolve(&self, ctx: &TileContext) -> Arc<V> {
        match self {
            Self::Static(value) => Arc::clone(value),
            Self::Derived(f) => Arc::new(f(ctx)),
        }
    }

    /// Whether this is the function form.
    #[must_use]
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::Derived(_))
    }
}

impl<V> Clone for DerivedValue<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(Arc::clone(value)),
            Self::Derived(f) => Self::Derived(Arc::clone(f)),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for DerivedValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Derived(_) => f.write_str("Derived(<fn>)"),
        }
    }
}

impl From<&str> for DerivedValue<String> {
    fn from(value: &str) -> Self {
        Self::value(value.to_string())
    }
}

impl From<String> for DerivedValue<String> {
    fn from(value: String) -> Self {
        Self::value(value)
    }
}

fn same_source<V>(a: Option<&DerivedValue<V>>, b: Option<&DerivedValue<V>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same_source(b),
        _ => false,
    }
}

/// One cached slice of derived state.
pub struct DerivedSlot<V> {
    last_source: Option<DerivedValue<V>>,
    cached: Option<Arc<V>>,
}

impl<V> Default for DerivedSlot<V> {
    fn default() -> Self {
        Self {
            last_source: None,
            cached: None,
        }
    }
}

impl<V> DerivedSlot<V> {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cached value, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<V>> {
        self.cached.clone()
    }

    /// Whether the slot must be recomputed for `source`.
    #[must_use]
    pub fn is_stale(&self, source: Option<&DerivedValue<V>>, active_start_changed: bool) -> bool {
        active_start_changed || !same_source(source, self.last_source.as_ref())
    }

    /// Replace the cached value from `source`. An absent source empties the slot.
    pub fn refresh(&mut self, ctx: &TileContext, source: Option<&DerivedValue<V>>) {
        self.cached = source.map(|s| s.resolve(ctx));
        self.last_source = source.cloned();
    }

    /// Refresh only when stale. Returns whether a recomputation happened.
    pub fn sync(
        &mut self,
        ctx: &TileContext,
        source: Option<&DerivedValue<V>>,
        active_start_changed: bool,
    ) -> bool {
        if self.is_stale(source, active_start_changed) {
            self.refresh(ctx, source);
            true
        } else {
            false
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for DerivedSlot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedSlot")
            .field("last_source", &self.last_source)
            .field("cached", &self.cached)
            .finish()
    }
}

/// Which slices a recomputation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recomputed {
    /// Class name was recomputed
    pub class_name: bool,
    /// Content was recomputed
    pub content: bool,
}

impl Recomputed {
    /// Whether anything was recomputed.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.class_name || self.content
    }
}

/// Per-tile cache of the class name and content derived from tile props.
///
/// Created on a tile's first render and kept for the tile's lifetime.
pub struct TileDerivedState<C = String, V = String> {
    class_name: DerivedSlot<C>,
    content: DerivedSlot<V>,
    last_active_start_date: Option<Date>,
}

impl<C, V> Default for TileDerivedState<C, V> {
    fn default() -> Self {
        Self {
            class_name: DerivedSlot::default(),
            content: DerivedSlot::default(),
            last_active_start_date: None,
        }
    }
}

impl<C, V> TileDerivedState<C, V> {
    /// Create empty state, as on a tile's first render.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cached slices up to date with the current props.
    pub fn recompute(
        &mut self,
        ctx: &TileContext,
        class_name: Option<&DerivedValue<C>>,
        content: Option<&DerivedValue<V>>,
    ) -> Recomputed {
        let active_start_changed =
            dates_differ(Some(ctx.active_start_date), self.last_active_start_date);

        let outcome = Recomputed {
            class_name: self.class_name.sync(ctx, class_name, active_start_changed),
            content: self.content.sync(ctx, content, active_start_changed),
        };
        self.last_active_start_date = Some(ctx.active_start_date);

        if outcome.any() {
            tracing::trace!(
                date = %ctx.date,
                view = ctx.view.as_str(),
                class_name = outcome.class_name,
                content = outcome.content,
                "recomputed derived tile state"
            );
        }
        outcome
    }

    /// Cached class name.
    #[must_use]
    pub fn class_name(&self) -> Option<Arc<C>> {
        self.class_name.get()
    }

    /// Cached content.
    #[must_use]
    pub fn content(&self) -> Option<Arc<V>> {
        self.content.get()
    }

    /// Active start date seen by the last recomputation.
    #[must_use]
    pub const fn last_active_start_date(&self) -> Option<Date> {
        self.last_active_start_date
    }
}

impl<C: fmt::Debug, V: fmt::Debug> fmt::Debug for TileDerivedState<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileDerivedState")
            .field("class_name", &self.class_name)
            .field("content", &self.content)
            .field("last_active_start_date", &self.last_active_start_date)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::View;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn day(d: u32) -> Date {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .and_then(|x| x.and_hms_opt(0, 0, 0))
            .unwrap()
    }

    fn ctx(active: u32, date: u32) -> TileContext {
        TileContext::new(day(active), day(date), View::Month)
    }

    fn counting(counter: &Arc<AtomicUsize>, label: &'static str) -> DerivedValue<String> {
        let counter = Arc::clone(counter);
        DerivedValue::derived(move |ctx: &TileContext| {
            counter.fetch_add(1, Ordering::SeqCst);
            format!("{label}-{}", ctx.date.format("%d"))
        })
    }

    #[test]
    fn test_derived_value_same_source_is_identity() {
        let a: DerivedValue<String> = "x".into();
        let b: DerivedValue<String> = "x".into();
        assert!(a.same_source(&a.clone()));
        assert!(!a.same_source(&b));
    }

    #[test]
    fn test_derived_value_static_resolve_shares_arc() {
        let a: DerivedValue<String> = "x".into();
        let first = a.resolve(&ctx(1, 2));
        let second = a.resolve(&ctx(8, 9));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_first_recompute_fills_both() {
        let mut state: TileDerivedState = TileDerivedState::new();
        let class: DerivedValue<String> = "highlight".into();
        let content = DerivedValue::derived(|ctx: &TileContext| ctx.date.format("%d").to_string());

        let outcome = state.recompute(&ctx(1, 5), Some(&class), Some(&content));
        assert!(outcome.class_name);
        assert!(outcome.content);
        assert_eq!(state.class_name().as_deref().map(String::as_str), Some("highlight"));
        assert_eq!(state.content().as_deref().map(String::as_str), Some("05"));
    }

    #[test]
    fn test_absent_sources_stay_empty() {
        let mut state: TileDerivedState = TileDerivedState::new();
        let outcome = state.recompute(&ctx(1, 5), None, None);
        // First render always counts as a change of active start date
        assert!(outcome.class_name && outcome.content);
        assert!(state.class_name().is_none());
        assert!(state.content().is_none());

        let outcome = state.recompute(&ctx(1, 5), None, None);
        assert!(!outcome.any());
    }

    #[test]
    fn test_unchanged_inputs_reuse_identical_values() {
        let calls = Arc::new(AtomicUsize::new(0));
        let class = counting(&calls, "c");
        let content = counting(&calls, "t");
        let mut state: TileDerivedState = TileDerivedState::new();

        state.recompute(&ctx(1, 5), Some(&class), Some(&content));
        let class_before = state.class_name().unwrap();
        let content_before = state.content().unwrap();

        for _ in 0..3 {
            let outcome = state.recompute(&ctx(1, 5), Some(&class), Some(&content));
            assert!(!outcome.any());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(Arc::ptr_eq(&class_before, &state.class_name().unwrap()));
        assert!(Arc::ptr_eq(&content_before, &state.content().unwrap()));
    }

    #[test]
    fn test_active_start_change_invalidates_both() {
        let calls = Arc::new(AtomicUsize::new(0));
        let class = counting(&calls, "c");
        let content = counting(&calls, "t");
        let mut state: TileDerivedState = TileDerivedState::new();

        state.recompute(&ctx(1, 5), Some(&class), Some(&content));
        let outcome = state.recompute(&ctx(2, 5), Some(&class), Some(&content));

        assert_eq!(
            outcome,
            Recomputed {
                class_name: true,
                content: true
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(state.last_active_start_date(), Some(day(2)));
    }

    #[test]
    fn test_equal_active_start_instances_do_not_invalidate() {
        let calls = Arc::new(AtomicUsize::new(0));
        let class = counting(&calls, "c");
        let mut state: TileDerivedState = TileDerivedState::new();

        state.recompute(&ctx(1, 5), Some(&class), None);
        // A freshly built, equal instant
        let same = TileContext::new(day(1), day(5), View::Month);
        let outcome = state.recompute(&same, Some(&class), None);
        assert!(!outcome.any());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_content_change_leaves_class_name_alone() {
        let calls = Arc::new(AtomicUsize::new(0));
        let class = counting(&calls, "c");
        let mut state: TileDerivedState = TileDerivedState::new();

        state.recompute(&ctx(1, 5), Some(&class), Some(&"a".into()));
        let class_before = state.class_name().unwrap();

        let outcome = state.recompute(&ctx(1, 5), Some(&class), Some(&"b".into()));
        assert!(!outcome.class_name);
        assert!(outcome.content);
        assert!(Arc::ptr_eq(&class_before, &state.class_name().unwrap()));
        assert_eq!(state.content().as_deref().map(String::as_str), Some("b"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_class_name_change_leaves_content_alone() {
        let calls = Arc::new(AtomicUsize::new(0));
        let content = counting(&calls, "t");
        let mut state: TileDerivedState = TileDerivedState::new();

        state.recompute(&ctx(1, 5), Some(&"a".into()), Some(&content));
        let content_before = state.content().unwrap();

        let outcome = state.recompute(&ctx(1, 5), Some(&"b".into()), Some(&content));
        assert!(outcome.class_name);
        assert!(!outcome.content);
        assert!(Arc::ptr_eq(&content_before, &state.content().unwrap()));
    }

    #[test]
    fn test_removing_source_clears_cache() {
        let mut state: TileDerivedState = TileDerivedState::new();
        state.recompute(&ctx(1, 5), Some(&"a".into()), None);
        assert!(state.class_name().is_some());

        let outcome = state.recompute(&ctx(1, 5), None, None);
        assert!(outcome.class_name);
        assert!(state.class_name().is_none());
    }

    #[test]
    fn test_date_change_alone_does_not_invalidate() {
        // Only the source and active start date are tracked
        let mut state: TileDerivedState = TileDerivedState::new();
        let class = DerivedValue::derived(|ctx: &TileContext| ctx.date.format("%d").to_string());
        state.recompute(&ctx(1, 5), Some(&class), None);
        let outcome = state.recompute(&ctx(1, 6), Some(&class), None);
        assert!(!outcome.any());
        assert_eq!(state.class_name().as_deref().map(String::as_str), Some("05"));
    }

    #[test]
    fn test_debug_hides_functions() {
        let f: DerivedValue<String> = DerivedValue::derived(|_: &TileContext| String::new());
        assert_eq!(format!("{f:?}"), "Derived(<fn>)");
        let s: DerivedValue<String> = "x".into();
        assert!(format!("{s:?}").contains("Static"));
    }
}
