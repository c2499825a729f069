//! Host-side helpers for the `slidelist` crate.
//!
//! `slidelist` is UI-agnostic: it takes normalized input and reports placements. This crate
//! provides the pieces most hosts need around it, still without binding to any UI framework:
//!
//! - [`PointerListener`]: raw touch/mouse/wheel streams to single-pointer events with velocity
//! - [`FadeTransition`]: cross-fades between two elements
//! - [`ArrayStream`] and (with the `json` feature) [`JsonStream`]
//! - [`SubstituteCover`]: cover items with generated fallbacks, built through a [`TaskQueue`]
//! - [`Widget`]: a list wired to a pointer listener
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod array_stream;
mod fade;
#[cfg(feature = "json")]
mod json_stream;
mod pointer;
mod queue;
mod substitute;
mod widget;

#[cfg(test)]
mod tests;

pub use array_stream::ArrayStream;
pub use fade::{FadeContainer, FadeTransition};
#[cfg(feature = "json")]
pub use json_stream::{Fetch, FetchResponse, JsonStream, JsonStreamError, SegmentDocument};
pub use pointer::{
    EventResponse, PointerHandler, PointerId, PointerListener, PointerOptions, RawEvent, RawWheel,
    Touch,
};
pub use queue::TaskQueue;
pub use substitute::{
    CoverContent, CoverImageLoad, CoverSpec, LehmerRng, SubstituteCover, SubstituteLayout,
    SubstituteOptions, TextBlock, TextMeasure, cover_colour, fit_cover_image, layout_substitute,
};
pub use widget::Widget;
