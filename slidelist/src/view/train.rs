use crate::animation::smoothstep;
use crate::error::ConfigError;
use crate::options::StartItem;
use crate::view::{ProjectedSegment, View, item_size};
use crate::{Geometry, Item, Placement, Size, SlidingListOptions, Viewport};

/// Options for [`TrainView`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainOptions {
    /// Spacing of unfocused items as a multiple of their (shrunk) width.
    pub spacing: f64,
    /// Full-size item box. Defaults to the container height and `item_aspect`.
    pub item_width: Option<f64>,
    pub item_height: Option<f64>,
    pub item_aspect: f64,
    /// Size of unfocused items relative to the focused one.
    pub unfocused_scale: f64,
    pub unfocused_opacity: f64,
    /// How far the focus transition reaches into neighbouring items, as a fraction of spacing.
    pub transition_overlap: f64,
    /// Focus level at which items become fully opaque.
    pub transition_fade: f64,
    /// Where the focused item sits, as a fraction of the container width.
    pub focused_position: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            spacing: 1.1,
            item_width: None,
            item_height: None,
            item_aspect: 0.8,
            unfocused_scale: 0.2,
            unfocused_opacity: 0.5,
            transition_overlap: 0.15,
            transition_fade: 0.2,
            focused_position: 0.5,
        }
    }
}

impl TrainOptions {
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_item_size(mut self, width: f64, height: f64) -> Self {
        self.item_width = Some(width);
        self.item_height = Some(height);
        self
    }

    pub fn with_unfocused(mut self, scale: f64, opacity: f64) -> Self {
        self.unfocused_scale = scale;
        self.unfocused_opacity = opacity;
        self
    }

    pub fn with_transition(mut self, overlap: f64, fade: f64) -> Self {
        self.transition_overlap = overlap;
        self.transition_fade = fade;
        self
    }

    pub fn with_focused_position(mut self, position: f64) -> Self {
        self.focused_position = position;
        self
    }
}

/// A row of small items with the one at the focus point blown up to full size.
#[derive(Clone, Debug)]
pub struct TrainView {
    geometry: Geometry,
    viewport: Viewport,
    options: TrainOptions,
}

impl TrainView {
    pub const STEP_TOLERANCE: f64 = 0.5;
    pub const DEFAULT_MAX_THROW_VELOCITY: f64 = 1.0;

    pub fn new(viewport: Viewport, options: TrainOptions) -> Result<Self, ConfigError> {
        ConfigError::check_positive("spacing", options.spacing)?;
        ConfigError::check_positive("unfocused_scale", options.unfocused_scale)?;
        ConfigError::check_positive("transition_fade", options.transition_fade)?;
        let (fit_width, fit_height) = item_size(
            viewport,
            options.item_width,
            options.item_height,
            options.item_aspect,
        );
        let item_width = fit_width * options.unfocused_scale;
        let geometry = Self::layout(
            viewport,
            &options,
            Size::new(fit_width, fit_height),
            item_width,
            item_width * options.spacing,
        )?;
        Ok(Self {
            geometry,
            viewport,
            options,
        })
    }

    fn layout(
        viewport: Viewport,
        options: &TrainOptions,
        fit: Size,
        item_width: f64,
        item_spacing: f64,
    ) -> Result<Geometry, ConfigError> {
        // The focused item sits mid-way through the virtual width, so widen it enough to
        // cover the container whatever the focus position.
        let virtual_width = viewport.width * (1.0 + 2.0 * (options.focused_position - 0.5).abs());
        Geometry {
            item_width,
            item_height: fit.height,
            item_spacing,
            fit: Some(fit),
            view_width: virtual_width,
            margin_width: (virtual_width - item_spacing) / 2.0,
            step_tolerance: Self::STEP_TOLERANCE,
        }
        .validate()
    }

    pub fn default_start_item(&self) -> usize {
        (self.geometry.view_width / 2.0 / self.geometry.item_spacing).ceil() as usize
    }

    /// `0` far from the focus point, `1` at it, smooth in between.
    pub fn focus_at(&self, position: f64) -> f64 {
        let g = &self.geometry;
        let centre = (g.view_width - g.item_spacing) / 2.0;
        let reach = (1.0 + self.options.transition_overlap) * g.item_spacing / 2.0;
        smoothstep((1.0 - (position - centre).abs() / reach).max(0.0))
    }

    fn place<I: Item>(&self, position: f64, item: &I, placement: &mut Placement) {
        let g = &self.geometry;
        let p = (g.item_spacing + position) / (g.item_spacing + g.view_width);
        placement.visible = p > 0.0 && p < 1.0;
        if !placement.visible {
            return;
        }

        let size = item.size();
        let fit_width = g.fit_size().width;
        let focus = self.focus_at(position);
        let scale = (1.0 - focus) * (g.item_width / fit_width) + focus;
        let height = scale * size.height;

        let mut x = position + g.item_spacing / 2.0;
        if self.options.focused_position < 0.5 {
            x += self.viewport.width - g.view_width;
        }

        let alpha_t = focus / self.options.transition_fade;
        let opacity = (self.options.unfocused_opacity * (1.0 - alpha_t) + alpha_t).min(1.0);

        *placement = Placement {
            x: x - size.width / 2.0 * scale,
            y: (self.viewport.height - height) / 2.0,
            z: (1000.0 * focus).floor() as i32,
            scale,
            opacity,
            visible: true,
        };
    }
}

impl<I: Item> View<I> for TrainView {
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
        self.geometry = Self::layout(
            viewport,
            &self.options,
            g.fit_size(),
            g.item_width,
            g.item_spacing,
        )?;
        self.viewport = viewport;
        Ok(())
    }

    fn tune_options<Id>(&self, options: &mut SlidingListOptions<Id, I>) {
        if options.start_item.is_none() {
            options.start_item = Some(StartItem::Index(self.default_start_item()));
        }
        if options.max_throw_velocity.is_none() {
            options.max_throw_velocity = Some(Self::DEFAULT_MAX_THROW_VELOCITY);
        }
        if options.rounding.is_none() {
            options.rounding = Some(true);
        }
    }
}
