use crate::error::ConfigError;
use crate::Size;

/// Fixed layout of a view strategy.
///
/// All lengths are pixels along the scroll axis unless noted. `view_width` is the width of the
/// *virtual* viewport the engine lays segments out in; for the carousel that is the length of
/// the arc, not the container.
///
/// A `Geometry` is immutable once built. Views replace it wholesale on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub item_width: f64,
    pub item_height: f64,
    /// Distance between the left edges of two neighbouring items.
    pub item_spacing: f64,
    /// The box items should be fitted into when it differs from the laid-out item size
    /// (the train lays out shrunk items but loads them at full size).
    pub fit: Option<Size>,
    pub view_width: f64,
    /// Empty space kept at either end when content reaches a hard boundary.
    pub margin_width: f64,
    /// Fraction of the current item that must be visible before a step skips past it.
    pub step_tolerance: f64,
}

impl Geometry {
    pub fn validate(self) -> Result<Self, ConfigError> {
        ConfigError::check_positive("item_width", self.item_width)?;
        ConfigError::check_non_negative("item_height", self.item_height)?;
        ConfigError::check_positive("item_spacing", self.item_spacing)?;
        ConfigError::check_positive("view_width", self.view_width)?;
        ConfigError::check_finite("margin_width", self.margin_width)?;
        ConfigError::check_non_negative("step_tolerance", self.step_tolerance)?;
        if let Some(fit) = self.fit {
            ConfigError::check_positive("fit.width", fit.width)?;
            ConfigError::check_positive("fit.height", fit.height)?;
        }
        Ok(self)
    }

    /// The size items are asked to fit themselves into.
    pub fn fit_size(&self) -> Size {
        self.fit
            .unwrap_or(Size::new(self.item_width, self.item_height))
    }

    /// Leftmost position the first segment may rest at.
    pub fn left_stop(&self) -> f64 {
        self.margin_width
    }

    /// Rightmost position the last segment's right edge may rest at.
    pub fn right_stop(&self) -> f64 {
        self.view_width - self.margin_width
    }

    /// Whole items that fit between the margins, at least one.
    pub fn page_items(&self) -> u32 {
        let page = ((self.view_width - self.margin_width * 2.0) / self.item_spacing).floor();
        if page >= 1.0 { page as u32 } else { 1 }
    }

    /// Index of the item cell that contains the viewport centre, for a segment at `x`.
    pub fn focused_index(&self, x: f64) -> Option<usize> {
        let i = ((self.view_width / 2.0 - x) / self.item_spacing).floor();
        if i >= 0.0 { Some(i as usize) } else { None }
    }
}
