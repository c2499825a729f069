//! Normalized input events consumed by [`crate::SlidingList`].
//!
//! Raw touch/mouse streams are turned into these by an adapter (see the `slidelist-adapter`
//! crate's `PointerListener`).

/// A single tracked pointer (touch or pressed mouse button).
///
/// Velocities are in pixels per millisecond.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub page_x: f64,
    pub page_y: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
}

impl PointerEvent {
    /// Horizontal travel since the gesture started.
    pub fn offset_x(&self) -> f64 {
        self.page_x - self.start_x
    }

    pub fn offset_y(&self) -> f64 {
        self.page_y - self.start_y
    }
}

/// A wheel event.
///
/// `delta*` values are roughly lines; `step*` values are the best guess at mouse notches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelEvent {
    pub delta: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    pub step: f64,
    pub step_x: f64,
    pub step_y: f64,
}

/// A hovering (unpressed) mouse position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoverEvent {
    pub page_x: f64,
    pub page_y: f64,
}
