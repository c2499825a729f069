use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::Item;

/// A segment as resolved by a [`Stream`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadedSegment<Id, D> {
    pub id: Id,
    /// The segment to the left, or `None` at a hard boundary.
    pub prev: Option<Id>,
    /// The segment to the right, or `None` at a hard boundary.
    pub next: Option<Id>,
    pub len: usize,
    /// Opaque per-segment backing data handed back to [`Stream::create_item`].
    pub data: D,
}

/// Lets items ask their list for a re-layout once they know their size.
///
/// Requests are coalesced: any number of calls between two ticks cause one refresh.
#[derive(Clone, Debug, Default)]
pub struct RefreshHandle {
    requested: Rc<Cell<bool>>,
}

impl RefreshHandle {
    pub fn request(&self) {
        self.requested.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }

    pub(crate) fn take(&self) -> bool {
        self.requested.replace(false)
    }
}

/// What a stream knows about the list it feeds.
#[derive(Clone, Debug)]
pub struct StreamContext {
    pub item_width: f64,
    pub item_height: f64,
    pub item_spacing: f64,
    pub refresh: RefreshHandle,
}

pub(crate) type Inbox<Id, D> = Rc<RefCell<VecDeque<(u64, LoadedSegment<Id, D>)>>>;

/// Completion handle for one [`Stream::load_segment`] call.
///
/// Resolving consumes the handle, so a load completes at most once. If the requesting segment
/// has been destroyed in the meantime the result is dropped.
pub struct SegmentLoader<Id, D> {
    serial: u64,
    alive: Rc<Cell<bool>>,
    inbox: Inbox<Id, D>,
}

impl<Id, D> SegmentLoader<Id, D> {
    pub(crate) fn new(serial: u64, alive: Rc<Cell<bool>>, inbox: Inbox<Id, D>) -> Self {
        Self {
            serial,
            alive,
            inbox,
        }
    }

    /// Whether anything still wants this segment. Streams may skip work when it is not.
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn resolve(self, segment: LoadedSegment<Id, D>) {
        if !self.alive.get() {
            strace!(serial = self.serial, "dropping load for a destroyed segment");
            return;
        }
        self.inbox.borrow_mut().push_back((self.serial, segment));
    }
}

impl<Id, D> fmt::Debug for SegmentLoader<Id, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentLoader")
            .field("serial", &self.serial)
            .field("alive", &self.alive.get())
            .finish_non_exhaustive()
    }
}

/// A source of linked segments.
///
/// Ids are opaque to the list; only equality is used. Loads may complete synchronously (by
/// resolving the loader before returning) or later, in any order.
pub trait Stream {
    type Id: Clone + PartialEq + fmt::Debug;
    type Data;
    type Item: Item;

    fn load_segment(
        &mut self,
        id: &Self::Id,
        context: &StreamContext,
        loader: SegmentLoader<Self::Id, Self::Data>,
    );

    fn create_item(
        &mut self,
        segment: &LoadedSegment<Self::Id, Self::Data>,
        index: usize,
        context: &StreamContext,
    ) -> Self::Item;
}
