use std::cell::Cell;
use std::rc::Rc;

use crate::LoadedSegment;
use crate::view::ViewSegment;

/// One entry of the engine's deque: a stream segment, its items and its animation state.
///
/// Starts out as a one-cell placeholder and is promoted in place once the stream resolves it.
pub(crate) struct Segment<Id, D, I, S: ViewSegment> {
    pub(crate) id: Id,
    pub(crate) serial: u64,
    alive: Rc<Cell<bool>>,
    pub(crate) source: Option<LoadedSegment<Id, D>>,
    pub(crate) items: Vec<I>,
    pub(crate) prev: Option<Id>,
    pub(crate) next: Option<Id>,
    pub(crate) width: f64,
    pub(crate) x: f64,
    pub(crate) start_x: f64,
    pub(crate) end_x: f64,
    pub(crate) view: S,
}

impl<Id, D, I, S: ViewSegment> Segment<Id, D, I, S> {
    pub(crate) fn placeholder(
        id: Id,
        serial: u64,
        alive: Rc<Cell<bool>>,
        width: f64,
        view: S,
    ) -> Self {
        Self {
            id,
            serial,
            alive,
            source: None,
            items: Vec::new(),
            prev: None,
            next: None,
            width,
            x: 0.0,
            start_x: 0.0,
            end_x: 0.0,
            view,
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub(crate) fn set_all(&mut self, x: f64, start_x: f64, end_x: f64) {
        self.x = x;
        self.start_x = start_x;
        self.end_x = end_x;
    }

    /// Leftmost of where the segment is and where it is heading.
    pub(crate) fn min_x(&self) -> f64 {
        self.x.min(self.end_x)
    }

    pub(crate) fn max_x(&self) -> f64 {
        self.x.max(self.end_x)
    }

    /// Releases the view state and items. Late loads for this segment are dropped from now on.
    pub(crate) fn remove(&mut self) {
        self.alive.set(false);
        self.view.remove();
        self.items.clear();
        self.source = None;
    }
}

impl<Id, D, I, S: ViewSegment> Drop for Segment<Id, D, I, S> {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}
