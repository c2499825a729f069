use std::fmt;

use slidelist::{Item, LoadedSegment, SegmentLoader, Stream, StreamContext};

/// A stream over an in-memory array: one segment holding every element.
///
/// When looping (the default), the segment names itself as both neighbours, so the list repeats
/// the array endlessly in both directions. Loads resolve synchronously.
pub struct ArrayStream<T, F> {
    items: Vec<T>,
    looping: bool,
    make_item: F,
}

impl<T, I, F> ArrayStream<T, F>
where
    I: Item,
    F: FnMut(&T, &StreamContext) -> I,
{
    /// `make_item` builds the displayable item for an element.
    pub fn new(items: Vec<T>, make_item: F) -> Self {
        Self {
            items,
            looping: true,
            make_item,
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T, I, F> Stream for ArrayStream<T, F>
where
    I: Item,
    F: FnMut(&T, &StreamContext) -> I,
{
    type Id = u64;
    type Data = ();
    type Item = I;

    fn load_segment(&mut self, id: &u64, _context: &StreamContext, loader: SegmentLoader<u64, ()>) {
        let neighbour = self.looping.then_some(*id);
        loader.resolve(LoadedSegment {
            id: *id,
            prev: neighbour,
            next: neighbour,
            len: self.items.len(),
            data: (),
        });
    }

    fn create_item(
        &mut self,
        _segment: &LoadedSegment<u64, ()>,
        index: usize,
        context: &StreamContext,
    ) -> I {
        (self.make_item)(&self.items[index], context)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for ArrayStream<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayStream")
            .field("items", &self.items)
            .field("looping", &self.looping)
            .finish_non_exhaustive()
    }
}
