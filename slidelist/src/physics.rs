//! Throw physics: constant deceleration along one axis.
//!
//! Velocities are in pixels per millisecond and `drag` in pixels per millisecond squared. A
//! positive velocity moves content to the right.

/// Distance a throw at `velocity` travels before `drag` stops it: `v² / 2d`, signed like `v`.
pub fn throw_distance(velocity: f64, drag: f64) -> f64 {
    if velocity == 0.0 || drag <= 0.0 {
        return 0.0;
    }
    let d = if velocity < 0.0 { -drag } else { drag };
    0.5 * velocity * velocity / d
}

/// The release velocity that stops exactly after `distance`: `sqrt(2·|d|·drag)`, signed like
/// `distance`.
pub fn throw_velocity(distance: f64, drag: f64) -> f64 {
    let v = (2.0 * distance * drag).abs().sqrt();
    if distance < 0.0 { -v } else { v }
}

/// Adjusts `distance` so the first segment comes to rest on an item boundary.
///
/// `offset` is the first segment's position relative to the left stop.
pub fn round_to_item(distance: f64, offset: f64, spacing: f64) -> f64 {
    if spacing <= 0.0 {
        return distance;
    }
    let p = offset + distance;
    distance + (p / spacing).round() * spacing - p
}

/// Shortens `distance` so no more than `max_items` item boundaries are crossed.
///
/// `offset` is the first segment's position relative to the left stop; partial items count
/// towards the limit.
pub fn clamp_to_items(distance: f64, offset: f64, spacing: f64, max_items: Option<u32>) -> f64 {
    let Some(max_items) = max_items else {
        return distance;
    };
    if spacing <= 0.0 {
        return distance;
    }
    let max_items = max_items as f64;
    let item_x = offset / spacing;
    if distance < 0.0 {
        let item_offset = item_x.ceil() - item_x;
        let count = (item_offset - distance / spacing).ceil();
        if count > max_items {
            return (item_offset - max_items) * spacing;
        }
    } else {
        let item_offset = item_x - item_x.floor();
        let count = (item_offset + distance / spacing).ceil();
        if count > max_items {
            return (max_items - item_offset) * spacing;
        }
    }
    distance
}

/// A physically consistent throw: release velocity and the time it takes to stop.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Throw {
    pub velocity: f64,
    pub drag: f64,
    pub duration_ms: f64,
}

impl Throw {
    /// Builds the throw that travels exactly `distance`. Returns `None` for a zero or
    /// degenerate distance.
    pub fn for_distance(distance: f64, drag: f64) -> Option<Self> {
        if distance == 0.0 || !distance.is_finite() || drag <= 0.0 {
            return None;
        }
        let velocity = throw_velocity(distance, drag);
        Some(Self {
            velocity,
            drag,
            duration_ms: velocity.abs() / drag,
        })
    }

    /// Travel after `t` milliseconds: `v·t − ½·d·t²`.
    pub fn travel(&self, t: f64) -> f64 {
        let d = if self.velocity < 0.0 {
            -self.drag
        } else {
            self.drag
        };
        self.velocity * t - 0.5 * d * t * t
    }
}
