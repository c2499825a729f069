/// Direction of travel along the list.
///
/// `Forward` reveals later items (content moves left), `Backward` reveals earlier ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Backward,
    #[default]
    Forward,
}

impl Direction {
    /// `-1` for `Backward`, `1` for `Forward`.
    pub fn signum(self) -> i32 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }

    /// Maps a step count to a direction. Zero counts as forward.
    pub fn from_step(step: i32) -> Self {
        if step < 0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Backward => Self::Forward,
            Self::Forward => Self::Backward,
        }
    }
}

/// What a host must do to keep a component running.
///
/// Components never read a clock. They report the next moment they need to be ticked and the
/// host calls `tick(now_ms)` accordingly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wakeup {
    /// Tick on the next display frame.
    Frame,
    /// Tick once `now_ms` reaches this deadline.
    At(u64),
}

impl Wakeup {
    /// Picks whichever wakeup comes first. A frame request always wins.
    pub fn earliest(a: Option<Wakeup>, b: Option<Wakeup>) -> Option<Wakeup> {
        match (a, b) {
            (Some(Self::Frame), _) | (_, Some(Self::Frame)) => Some(Self::Frame),
            (Some(Self::At(x)), Some(Self::At(y))) => Some(Self::At(x.min(y))),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Size of the widget container in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The final on-screen transform of one item, as computed by a view strategy.
///
/// `x`/`y` is the top-left corner after scaling, `z` a stacking order (higher is in front).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub z: i32,
    pub scale: f64,
    pub opacity: f64,
    pub visible: bool,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0,
            scale: 1.0,
            opacity: 1.0,
            visible: false,
        }
    }
}

/// A read-only view of one segment in the engine's deque.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentState<'a, Id> {
    pub id: &'a Id,
    /// Left edge offset in the viewport.
    pub x: f64,
    /// Where the current animation will leave the left edge.
    pub end_x: f64,
    pub width: f64,
    pub len: usize,
    pub loaded: bool,
}

impl<Id> SegmentState<'_, Id> {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}
