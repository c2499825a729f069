//! View strategies: how a segment's 1-D offset becomes on-screen placements.
//!
//! The engine only ever hands a view the left-edge offset of each segment. Everything else
//! (perspective, focus scaling, fades) is the strategy's business.

mod carousel;
mod flat;
mod train;

pub use carousel::{CarouselOptions, CarouselView};
pub use flat::{FlatOptions, FlatSegment, FlatView};
pub use train::{TrainOptions, TrainView};

use crate::error::ConfigError;
use crate::{Geometry, Item, Placement, SlidingListOptions, Viewport};

/// A layout policy for [`crate::SlidingList`].
pub trait View<I: Item> {
    type Segment: ViewSegment;

    fn geometry(&self) -> &Geometry;

    /// Visual state for a resolved segment of `len` items.
    fn create_segment(&mut self, len: usize) -> Self::Segment;

    /// Visual state for a segment that is still loading.
    fn create_placeholder_segment(&mut self) -> Self::Segment;

    fn init_item(&mut self, segment: &mut Self::Segment, item: &I, index: usize) {
        let _ = (segment, item, index);
    }

    /// Lays out `segment` with its left edge at `position`.
    fn set_position(&self, segment: &mut Self::Segment, position: f64, items: &[I]);

    /// Applies a new container size. Item sizes and spacing stay fixed.
    fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError>;

    /// Lets the view supply defaults for options the caller left unset.
    fn tune_options<Id>(&self, options: &mut SlidingListOptions<Id, I>) {
        let _ = options;
    }
}

/// The per-segment output of a view.
pub trait ViewSegment {
    /// One placement per item, in item order.
    fn placements(&self) -> &[Placement];

    /// Where to draw a loading indicator, if the view shows one.
    fn placeholder(&self) -> Option<&Placement> {
        None
    }

    fn is_visible(&self) -> bool;

    fn remove(&mut self);
}

/// Item size used for layout: configured size or a fallback from the container and aspect.
pub(crate) fn item_size(
    viewport: Viewport,
    item_width: Option<f64>,
    item_height: Option<f64>,
    item_aspect: f64,
) -> (f64, f64) {
    let height = item_height.unwrap_or(viewport.height);
    let width = item_width.unwrap_or(height * item_aspect);
    (width, height)
}

/// Segment state shared by views that project items individually (carousel, train).
#[derive(Clone, Debug, Default)]
pub struct ProjectedSegment {
    placements: Vec<Placement>,
    visible: bool,
}

impl ProjectedSegment {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            placements: vec![Placement::default(); len],
            visible: false,
        }
    }

    /// Runs `place` for every item while any of the segment might be on screen.
    ///
    /// `place` receives the item's own offset and must set `visible` on the placement.
    pub(crate) fn project<I>(
        &mut self,
        position: f64,
        spacing: f64,
        virtual_width: f64,
        items: &[I],
        mut place: impl FnMut(f64, &I, &mut Placement),
    ) {
        if !self.visible {
            let len = self.placements.len() as f64;
            self.visible = position < virtual_width && position > -len * spacing;
        }
        if !self.visible {
            return;
        }
        let mut any_visible = false;
        for (i, (placement, item)) in self.placements.iter_mut().zip(items).enumerate() {
            place(position + spacing * i as f64, item, placement);
            any_visible |= placement.visible;
        }
        self.visible = any_visible;
    }
}

impl ViewSegment for ProjectedSegment {
    fn placements(&self) -> &[Placement] {
        &self.placements
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn remove(&mut self) {
        self.placements.clear();
        self.visible = false;
    }
}
