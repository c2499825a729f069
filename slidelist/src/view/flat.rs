use crate::error::ConfigError;
use crate::view::{View, ViewSegment, item_size};
use crate::{Geometry, Item, Placement, Viewport};

/// Options for [`FlatView`], a plain side-by-side shelf of items.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatOptions {
    /// Item spacing as a multiple of item width.
    pub spacing: f64,
    pub item_width: Option<f64>,
    pub item_height: Option<f64>,
    /// Width/height ratio used when `item_width` is not given.
    pub item_aspect: f64,
    pub margin_width: f64,
    /// Positions are snapped to physical pixels at this ratio.
    pub device_pixel_ratio: f64,
}

impl Default for FlatOptions {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            item_width: None,
            item_height: None,
            item_aspect: 1.0,
            margin_width: 0.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl FlatOptions {
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_item_size(mut self, width: f64, height: f64) -> Self {
        self.item_width = Some(width);
        self.item_height = Some(height);
        self
    }

    pub fn with_item_aspect(mut self, aspect: f64) -> Self {
        self.item_aspect = aspect;
        self
    }

    pub fn with_margin_width(mut self, margin_width: f64) -> Self {
        self.margin_width = margin_width;
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }
}

/// A flat list: each segment is a strip translated horizontally, items unscaled.
#[derive(Clone, Debug)]
pub struct FlatView {
    geometry: Geometry,
    device_pixel_ratio: f64,
}

impl FlatView {
    pub const STEP_TOLERANCE: f64 = 0.9;

    pub fn new(viewport: Viewport, options: FlatOptions) -> Result<Self, ConfigError> {
        let (item_width, item_height) = item_size(
            viewport,
            options.item_width,
            options.item_height,
            options.item_aspect,
        );
        let geometry = Geometry {
            item_width,
            item_height,
            item_spacing: (item_width * options.spacing).round(),
            fit: None,
            view_width: viewport.width,
            margin_width: options.margin_width,
            step_tolerance: Self::STEP_TOLERANCE,
        }
        .validate()?;
        let device_pixel_ratio = if options.device_pixel_ratio > 1.0 {
            options.device_pixel_ratio
        } else {
            1.0
        };
        Ok(Self {
            geometry,
            device_pixel_ratio,
        })
    }

    fn snap(&self, x: f64) -> f64 {
        (x * self.device_pixel_ratio).round() / self.device_pixel_ratio
    }

    fn cell_visible(&self, x: f64) -> bool {
        x < self.geometry.view_width && x + self.geometry.item_width > 0.0
    }
}

/// Segment state for [`FlatView`].
#[derive(Clone, Debug, Default)]
pub struct FlatSegment {
    offsets: Vec<f64>,
    placements: Vec<Placement>,
    placeholder: Option<Placement>,
    visible: bool,
}

impl<I: Item> View<I> for FlatView {
    type Segment = FlatSegment;

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn create_segment(&mut self, len: usize) -> FlatSegment {
        let spacing = self.geometry.item_spacing;
        FlatSegment {
            offsets: (0..len).map(|i| (spacing * i as f64).round()).collect(),
            placements: vec![Placement::default(); len],
            placeholder: None,
            visible: false,
        }
    }

    fn create_placeholder_segment(&mut self) -> FlatSegment {
        FlatSegment {
            placeholder: Some(Placement::default()),
            ..FlatSegment::default()
        }
    }

    fn init_item(&mut self, segment: &mut FlatSegment, _item: &I, index: usize) {
        if let Some(offset) = segment.offsets.get_mut(index) {
            *offset = (self.geometry.item_spacing * index as f64).round();
        }
    }

    fn set_position(&self, segment: &mut FlatSegment, position: f64, items: &[I]) {
        let x = self.snap(position);
        if let Some(placeholder) = segment.placeholder.as_mut() {
            placeholder.x = x;
            placeholder.visible = self.cell_visible(x);
        }

        let width = segment.offsets.len() as f64 * self.geometry.item_spacing;
        let in_view = x < self.geometry.view_width && x + width > 0.0;
        if !in_view && !segment.visible {
            return;
        }

        let mut any_visible = false;
        for ((placement, offset), item) in segment
            .placements
            .iter_mut()
            .zip(&segment.offsets)
            .zip(items)
        {
            let left = x + offset;
            let visible = self.cell_visible(left);
            *placement = Placement {
                x: left,
                y: self.geometry.item_height - item.height(),
                z: 0,
                scale: 1.0,
                opacity: 1.0,
                visible,
            };
            any_visible |= visible;
        }
        segment.visible = any_visible;
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.geometry = Geometry {
            view_width: viewport.width,
            ..self.geometry
        }
        .validate()?;
        Ok(())
    }
}

impl ViewSegment for FlatSegment {
    fn placements(&self) -> &[Placement] {
        &self.placements
    }

    fn placeholder(&self) -> Option<&Placement> {
        self.placeholder.as_ref()
    }

    fn is_visible(&self) -> bool {
        self.visible
            || self
                .placeholder
                .as_ref()
                .is_some_and(|placeholder| placeholder.visible)
    }

    fn remove(&mut self) {
        self.offsets.clear();
        self.placements.clear();
        self.placeholder = None;
        self.visible = false;
    }
}
