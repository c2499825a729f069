use slidelist::{
    CarouselOptions, CarouselView, ConfigError, Direction, FlatOptions, FlatView, HoverEvent,
    PointerEvent, SlidingList, SlidingListOptions, Stream, TrainOptions, TrainView, View,
    Viewport, Wakeup, WheelEvent,
};

use crate::{EventResponse, PointerHandler, PointerListener, PointerOptions, RawEvent};

impl<S: Stream, V: View<S::Item>> PointerHandler for SlidingList<S, V> {
    fn pointer_start(&mut self, event: &PointerEvent, now_ms: u64) {
        SlidingList::pointer_start(self, event, now_ms);
    }

    fn pointer_move(&mut self, event: &PointerEvent, now_ms: u64) {
        SlidingList::pointer_move(self, event, now_ms);
    }

    fn pointer_end(&mut self, event: &PointerEvent, now_ms: u64) {
        SlidingList::pointer_end(self, event, now_ms);
    }

    fn wheel(&mut self, event: &WheelEvent, now_ms: u64) {
        SlidingList::wheel(self, event, now_ms);
    }

    fn hover_move(&mut self, _event: &HoverEvent, now_ms: u64) {
        SlidingList::hover_move(self, now_ms);
    }
}

/// A sliding list wired to raw platform input.
///
/// Feed it every raw event for the container, tick it when [`Widget::next_wakeup`] says so and
/// render from [`Widget::list`].
#[derive(Debug)]
pub struct Widget<S: Stream, V: View<S::Item>> {
    list: SlidingList<S, V>,
    pointer: PointerListener,
}

impl<S: Stream, V: View<S::Item>> Widget<S, V> {
    pub fn new(
        stream: S,
        view: V,
        options: SlidingListOptions<S::Id, S::Item>,
        pointer: PointerOptions,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        let list = SlidingList::new(stream, view, options, now_ms)?;
        Ok(Self {
            list,
            pointer: PointerListener::new(pointer.with_drag_axes(true, false)),
        })
    }

    pub fn list(&self) -> &SlidingList<S, V> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut SlidingList<S, V> {
        &mut self.list
    }

    pub fn pointer(&self) -> &PointerListener {
        &self.pointer
    }

    pub fn handle(&mut self, event: &RawEvent<'_>, now_ms: u64) -> EventResponse {
        if self.list.is_removed() {
            return EventResponse::default();
        }
        self.pointer.handle(event, now_ms, &mut self.list)
    }

    pub fn next_wakeup(&self) -> Option<Wakeup> {
        self.list.next_wakeup()
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.list.tick(now_ms);
    }

    pub fn step(&mut self, direction: Direction, now_ms: u64) {
        self.list.step_item(direction.signum(), now_ms);
    }

    pub fn step_page(&mut self, direction: Direction, now_ms: u64) {
        self.list.step_page(direction.signum(), now_ms);
    }

    /// Re-lays out every item, e.g. after items changed size.
    pub fn refresh(&mut self) {
        self.list.refresh();
    }

    /// Re-measures the container and re-lays out.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.list.resize(viewport)
    }

    /// Tears everything down. Further input and ticks are ignored.
    pub fn remove(&mut self) {
        self.pointer.remove();
        self.list.remove();
    }
}

impl<S: Stream> Widget<S, FlatView> {
    /// A flat shelf of items resting on the bottom edge.
    pub fn bookshelf(
        stream: S,
        viewport: Viewport,
        view: FlatOptions,
        options: SlidingListOptions<S::Id, S::Item>,
        pointer: PointerOptions,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(stream, FlatView::new(viewport, view)?, options, pointer, now_ms)
    }
}

impl<S: Stream> Widget<S, CarouselView> {
    pub fn carousel(
        stream: S,
        viewport: Viewport,
        view: CarouselOptions,
        options: SlidingListOptions<S::Id, S::Item>,
        pointer: PointerOptions,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(stream, CarouselView::new(viewport, view)?, options, pointer, now_ms)
    }
}

impl<S: Stream> Widget<S, TrainView> {
    pub fn train(
        stream: S,
        viewport: Viewport,
        view: TrainOptions,
        options: SlidingListOptions<S::Id, S::Item>,
        pointer: PointerOptions,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(stream, TrainView::new(viewport, view)?, options, pointer, now_ms)
    }
}
