use std::f64::consts::PI;

use crate::error::ConfigError;
use crate::options::StartItem;
use crate::view::{ProjectedSegment, View, item_size};
use crate::{Geometry, Item, Placement, SlidingListOptions, Viewport};

/// Options for [`CarouselView`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselOptions {
    /// Item spacing along the arc as a multiple of item width. Also scales the arc radius.
    pub spacing: f64,
    /// How far back items drop, as a fraction of the container height.
    pub tilt: f64,
    /// Strength of the depth scaling.
    pub perspective: f64,
    /// Fraction of the arc at each end over which items fade in/out.
    pub fade: f64,
    pub item_width: Option<f64>,
    pub item_height: Option<f64>,
    pub item_aspect: f64,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            spacing: 1.2,
            tilt: 0.0,
            perspective: 1.0,
            fade: 0.1,
            item_width: None,
            item_height: None,
            item_aspect: 1.0,
        }
    }
}

impl CarouselOptions {
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_perspective(mut self, perspective: f64) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn with_fade(mut self, fade: f64) -> Self {
        self.fade = fade;
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
}

/// Items ride a half circle seen edge-on: they shrink and fade as they go round the back.
///
/// The engine's viewport is the arc length (`π·r`), with margins so the end items stop centred.
#[derive(Clone, Debug)]
pub struct CarouselView {
    geometry: Geometry,
    viewport: Viewport,
    radius: f64,
    options: CarouselOptions,
}

impl CarouselView {
    pub const STEP_TOLERANCE: f64 = 0.5;

    pub fn new(viewport: Viewport, options: CarouselOptions) -> Result<Self, ConfigError> {
        ConfigError::check_positive("spacing", options.spacing)?;
        ConfigError::check_non_negative("fade", options.fade)?;
        let (item_width, item_height) = item_size(
            viewport,
            options.item_width,
            options.item_height,
            options.item_aspect,
        );
        let item_spacing = item_width * options.spacing;
        let (geometry, radius) =
            Self::arc(viewport, item_width, item_height, item_spacing, options.spacing)?;
        Ok(Self {
            geometry,
            viewport,
            radius,
            options,
        })
    }

    fn arc(
        viewport: Viewport,
        item_width: f64,
        item_height: f64,
        item_spacing: f64,
        spacing: f64,
    ) -> Result<(Geometry, f64), ConfigError> {
        let radius = spacing * viewport.width / 2.0;
        let virtual_width = PI * radius;
        let geometry = Geometry {
            item_width,
            item_height,
            item_spacing,
            fit: None,
            view_width: virtual_width,
            margin_width: (virtual_width - item_spacing) / 2.0,
            step_tolerance: Self::STEP_TOLERANCE,
        }
        .validate()?;
        Ok((geometry, radius))
    }

    /// Default start: one item centred without revealing the previous segment.
    pub fn default_start_item(&self) -> usize {
        (self.geometry.view_width / 2.0 / self.geometry.item_spacing).ceil() as usize
    }

    fn place<I: Item>(&self, position: f64, item: &I, placement: &mut Placement) {
        let g = &self.geometry;
        let p = (g.item_spacing + position) / (g.item_spacing + g.view_width);
        placement.visible = p > 0.0 && p < 1.0;
        if !placement.visible {
            return;
        }

        let angle = p * PI;
        let z = 1.0 - angle.sin();
        let scale = 1.0 / (1.0 + self.options.perspective * z);
        let x = self.viewport.width / 2.0 - scale * self.radius * angle.cos();
        let y = self.viewport.height * self.options.tilt * z;

        // Items are bottom-aligned and horizontally centred in their cell.
        let size = item.size();
        let inset_x = (g.item_width - size.width) / 2.0;
        let inset_y = g.item_height - size.height;
        let left = x - scale * g.item_width / 2.0;
        let top = y + g.item_height - scale * g.item_height;

        let fade = self.options.fade;
        let opacity = if p < fade {
            p / fade
        } else if p > 1.0 - fade {
            (1.0 - p) / fade
        } else {
            1.0
        };

        *placement = Placement {
            x: left + inset_x * scale,
            y: top + inset_y * scale,
            z: (1000.0 * (1.0 - z)).floor() as i32,
            scale,
            opacity,
            visible: true,
        };
    }
}

impl<I: Item> View<I> for CarouselView {
    type Segment = ProjectedSegment;

    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn create_segment(&mut self, len: usize) -> ProjectedSegment {
        ProjectedSegment::new(len)
    }

    fn create_placeholder_segment(&mut self) -> ProjectedSegment {
        ProjectedSegment::new(0)
    }

    fn set_position(&self, segment: &mut ProjectedSegment, position: f64, items: &[I]) {
        let g = &self.geometry;
        segment.project(
            position,
            g.item_spacing,
            g.view_width,
            items,
            |offset, item, placement| self.place(offset, item, placement),
        );
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        let g = self.geometry;
        let (geometry, radius) = Self::arc(
            viewport,
            g.item_width,
            g.item_height,
            g.item_spacing,
            self.options.spacing,
        )?;
        self.geometry = geometry;
        self.radius = radius;
        self.viewport = viewport;
        Ok(())
    }

    fn tune_options<Id>(&self, options: &mut SlidingListOptions<Id, I>) {
        if options.start_item.is_none() {
            options.start_item = Some(StartItem::Index(self.default_start_item()));
        }
    }
}
