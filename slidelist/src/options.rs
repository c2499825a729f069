use std::fmt;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::{Direction, Easing};

/// A callback fired when the focused item changes: `(item, segment id, index in segment)`.
pub type OnItemFocused<Id, I> = Rc<dyn Fn(&I, &Id, usize)>;

/// Which item of the first loaded segment to centre initially.
pub enum StartItem<I> {
    Index(usize),
    /// The first item matching the predicate.
    Matching(Rc<dyn Fn(&I) -> bool>),
}

impl<I> StartItem<I> {
    pub fn matching(f: impl Fn(&I) -> bool + 'static) -> Self {
        Self::Matching(Rc::new(f))
    }

    pub(crate) fn resolve(&self, items: &[I]) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Matching(f) => items.iter().position(|item| f(item)),
        }
    }
}

impl<I> Clone for StartItem<I> {
    fn clone(&self) -> Self {
        match self {
            Self::Index(i) => Self::Index(*i),
            Self::Matching(f) => Self::Matching(Rc::clone(f)),
        }
    }
}

impl<I> fmt::Debug for StartItem<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => f.debug_tuple("Index").field(i).finish(),
            Self::Matching(_) => f.write_str("Matching(..)"),
        }
    }
}

/// Configuration for [`crate::SlidingList`].
///
/// Fields left as `None` may be filled in by the view (see [`crate::View::tune_options`])
/// before the documented fallback applies.
pub struct SlidingListOptions<Id, I> {
    pub start_segment: Id,
    pub start_item: Option<StartItem<I>>,

    /// Throw deceleration in px/ms².
    pub drag: f64,

    /// Direction of automatic steps. Throws overwrite it to follow the user.
    pub step_direction: Direction,
    /// Idle time before an automatic step. `None` disables auto-stepping.
    pub step_interval_ms: Option<u64>,
    pub step_duration_ms: u64,
    pub step_easing: Easing,

    /// How many items beyond the viewport to keep loaded.
    pub preload: usize,

    /// Snap throws to item boundaries. Defaults to `false`.
    pub rounding: Option<bool>,
    /// Release velocity cap in px/ms. Defaults to `4.0`.
    pub max_throw_velocity: Option<f64>,
    /// Most items a single throw may cross. `None` is unbounded.
    pub max_throw_items: Option<u32>,

    pub on_item_focused: Option<OnItemFocused<Id, I>>,
}

impl<Id: Clone, I> Clone for SlidingListOptions<Id, I> {
    fn clone(&self) -> Self {
        Self {
            start_segment: self.start_segment.clone(),
            start_item: self.start_item.clone(),
            drag: self.drag,
            step_direction: self.step_direction,
            step_interval_ms: self.step_interval_ms,
            step_duration_ms: self.step_duration_ms,
            step_easing: self.step_easing,
            preload: self.preload,
            rounding: self.rounding,
            max_throw_velocity: self.max_throw_velocity,
            max_throw_items: self.max_throw_items,
            on_item_focused: self.on_item_focused.clone(),
        }
    }
}

impl<Id, I> SlidingListOptions<Id, I> {
    pub const DEFAULT_DRAG: f64 = 0.002;
    pub const DEFAULT_MAX_THROW_VELOCITY: f64 = 4.0;

    pub fn new(start_segment: Id) -> Self {
        Self {
            start_segment,
            start_item: None,
            drag: Self::DEFAULT_DRAG,
            step_direction: Direction::Forward,
            step_interval_ms: Some(3000),
            step_duration_ms: 1000,
            step_easing: Easing::SmoothStep,
            preload: 20,
            rounding: None,
            max_throw_velocity: None,
            max_throw_items: None,
            on_item_focused: None,
        }
    }

    pub fn with_start_item(mut self, index: usize) -> Self {
        self.start_item = Some(StartItem::Index(index));
        self
    }

    pub fn with_start_item_matching(mut self, f: impl Fn(&I) -> bool + 'static) -> Self {
        self.start_item = Some(StartItem::matching(f));
        self
    }

    pub fn with_drag(mut self, drag: f64) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_step_direction(mut self, direction: Direction) -> Self {
        self.step_direction = direction;
        self
    }

    pub fn with_step_interval_ms(mut self, interval_ms: Option<u64>) -> Self {
        self.step_interval_ms = interval_ms;
        self
    }

    pub fn with_step_duration_ms(mut self, duration_ms: u64) -> Self {
        self.step_duration_ms = duration_ms;
        self
    }

    pub fn with_step_easing(mut self, easing: Easing) -> Self {
        self.step_easing = easing;
        self
    }

    pub fn with_preload(mut self, preload: usize) -> Self {
        self.preload = preload;
        self
    }

    pub fn with_rounding(mut self, rounding: bool) -> Self {
        self.rounding = Some(rounding);
        self
    }

    pub fn with_max_throw_velocity(mut self, velocity: f64) -> Self {
        self.max_throw_velocity = Some(velocity);
        self
    }

    pub fn with_max_throw_items(mut self, items: Option<u32>) -> Self {
        self.max_throw_items = items;
        self
    }

    pub fn with_on_item_focused(mut self, f: impl Fn(&I, &Id, usize) + 'static) -> Self {
        self.on_item_focused = Some(Rc::new(f));
        self
    }

    pub fn rounding(&self) -> bool {
        self.rounding.unwrap_or(false)
    }

    pub fn max_throw_velocity(&self) -> f64 {
        self.max_throw_velocity
            .unwrap_or(Self::DEFAULT_MAX_THROW_VELOCITY)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("drag", self.drag)?;
        ConfigError::check_positive("max_throw_velocity", self.max_throw_velocity())?;
        if self.max_throw_items == Some(0) {
            return Err(ConfigError::ZeroThrowItems);
        }
        Ok(())
    }
}

impl<Id: fmt::Debug, I> fmt::Debug for SlidingListOptions<Id, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlidingListOptions")
            .field("start_segment", &self.start_segment)
            .field("start_item", &self.start_item)
            .field("drag", &self.drag)
            .field("step_direction", &self.step_direction)
            .field("step_interval_ms", &self.step_interval_ms)
            .field("step_duration_ms", &self.step_duration_ms)
            .field("step_easing", &self.step_easing)
            .field("preload", &self.preload)
            .field("rounding", &self.rounding)
            .field("max_throw_velocity", &self.max_throw_velocity)
            .field("max_throw_items", &self.max_throw_items)
            .finish_non_exhaustive()
    }
}
