//! A headless sliding-list engine: carousels, bookshelves and train-style browsers over a
//! virtually infinite, lazily loaded sequence of items.
//!
//! For pointer normalization, fade transitions and ready-made streams, see the
//! `slidelist-adapter` crate.
//!
//! The engine keeps an ordered deque of *segments* (runs of items a [`Stream`] resolves by id),
//! loads neighbours as the viewport approaches them and drops those that scroll far away. Drags,
//! throws, wheel notches and timed auto-steps move every segment along one axis; a [`View`]
//! strategy turns each segment's offset into [`Placement`]s.
//!
//! It is UI-agnostic and clock-free. A host is expected to provide:
//! - the container size and normalized input events
//! - `now_ms` on every call, and a tick whenever [`SlidingList::next_wakeup`] asks for one
//! - rendering of the placements it reads back
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod animation;
mod error;
mod geometry;
mod input;
mod item;
mod options;
mod physics;
mod segment;
mod sliding_list;
mod stream;
mod types;
pub mod view;


pub use animation::{Easing, smoothstep};
pub use error::ConfigError;
pub use geometry::Geometry;
pub use input::{HoverEvent, PointerEvent, WheelEvent};
pub use item::{ImageLoad, Item, SimpleItem, fit_in_box};
pub use options::{OnItemFocused, SlidingListOptions, StartItem};
pub use physics::{Throw, clamp_to_items, round_to_item, throw_distance, throw_velocity};
pub use sliding_list::SlidingList;
pub use stream::{LoadedSegment, RefreshHandle, SegmentLoader, Stream, StreamContext};
pub use types::{Direction, Placement, SegmentState, Size, Viewport, Wakeup};
pub use view::{
    CarouselOptions, CarouselView, FlatOptions, FlatSegment, FlatView, ProjectedSegment,
    TrainOptions, TrainView, View, ViewSegment,
};
