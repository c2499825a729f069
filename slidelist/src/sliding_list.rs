use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::animation::{Animation, Motion};
use crate::error::ConfigError;
use crate::physics::{Throw, clamp_to_items, round_to_item, throw_distance, throw_velocity};
use crate::segment::Segment;
use crate::stream::Inbox;
use crate::view::{View, ViewSegment};
use crate::{
    Direction, Geometry, LoadedSegment, Placement, PointerEvent, RefreshHandle, SegmentLoader,
    SegmentState, SlidingListOptions, Stream, StreamContext, Viewport, Wakeup, WheelEvent,
};

type SegmentOf<S, V> = Segment<
    <S as Stream>::Id,
    <S as Stream>::Data,
    <S as Stream>::Item,
    <V as View<<S as Stream>::Item>>::Segment,
>;

/// A sideways-scrolling, lazily loaded list of segments.
///
/// This type does not hold any UI objects and never reads a clock. Hosts drive it by calling:
/// - `pointer_*`, `wheel` and `hover_move` when input arrives
/// - `tick(now_ms)` whenever [`SlidingList::next_wakeup`] asks for it
///
/// and render from [`SlidingList::for_each_placement`] after each call.
pub struct SlidingList<S: Stream, V: View<S::Item>> {
    stream: S,
    view: V,
    options: SlidingListOptions<S::Id, S::Item>,
    context: StreamContext,
    segments: VecDeque<SegmentOf<S, V>>,
    inbox: Inbox<S::Id, S::Data>,
    next_serial: u64,

    animation: Option<Animation>,
    step_deadline: Option<u64>,
    step_direction: Direction,
    maintenance_pending: bool,
    grabbed: bool,
    start_pending: bool,
    focused: Option<(u64, usize)>,
    removed: bool,
}

impl<S: Stream, V: View<S::Item>> SlidingList<S, V> {
    pub fn new(
        stream: S,
        view: V,
        mut options: SlidingListOptions<S::Id, S::Item>,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        view.tune_options(&mut options);
        options.validate()?;
        let geometry = view.geometry().validate()?;
        let fit = geometry.fit_size();
        let context = StreamContext {
            item_width: fit.width,
            item_height: fit.height,
            item_spacing: geometry.item_spacing,
            refresh: RefreshHandle::default(),
        };
        sdebug!(
            view_width = geometry.view_width,
            item_spacing = geometry.item_spacing,
            margin_width = geometry.margin_width,
            "SlidingList::new"
        );

        let start_segment = options.start_segment.clone();
        let step_direction = options.step_direction;
        let mut list = Self {
            stream,
            view,
            options,
            context,
            segments: VecDeque::new(),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            next_serial: 0,
            animation: None,
            step_deadline: None,
            step_direction,
            maintenance_pending: false,
            grabbed: false,
            start_pending: true,
            focused: None,
            removed: false,
        };
        list.insert_segment(start_segment, 0);
        list.schedule_maintenance();
        list.wait_step(now_ms);
        Ok(list)
    }

    pub fn options(&self) -> &SlidingListOptions<S::Id, S::Item> {
        &self.options
    }

    pub fn geometry(&self) -> &Geometry {
        self.view.geometry()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// The handle items use to request a re-layout. Hosts may use it too.
    pub fn refresh_handle(&self) -> &RefreshHandle {
        &self.context.refresh
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Direction the next automatic step will take.
    pub fn step_direction(&self) -> Direction {
        self.step_direction
    }

    /// When the host should call [`SlidingList::tick`] next, or `None` when idle.
    pub fn next_wakeup(&self) -> Option<Wakeup> {
        if self.removed {
            return None;
        }
        if self.animation.is_some()
            || self.maintenance_pending
            || self.context.refresh.is_requested()
            || !self.inbox.borrow().is_empty()
        {
            return Some(Wakeup::Frame);
        }
        self.step_deadline.map(Wakeup::At)
    }

    /// Advances the list: applies finished loads and refresh requests, moves the current
    /// animation, fires a due auto step and runs the pending load/unload pass.
    pub fn tick(&mut self, now_ms: u64) {
        if self.removed {
            return;
        }
        self.drain_loads();
        if self.context.refresh.take() {
            self.refresh();
        }
        if self.animation.is_some() {
            self.animate(now_ms);
        }
        if self.step_deadline.is_some_and(|deadline| now_ms >= deadline) {
            self.auto_step(now_ms);
        }
        if self.maintenance_pending {
            self.update_loaded_segments();
        }
    }

    /// Applies stream results that arrived since the last call without advancing anything else.
    pub fn poll_loads(&mut self) {
        if !self.removed {
            self.drain_loads();
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = SegmentState<'_, S::Id>> + '_ {
        self.segments.iter().map(|segment| SegmentState {
            id: &segment.id,
            x: segment.x,
            end_x: segment.end_x,
            width: segment.width,
            len: segment.items.len(),
            loaded: segment.is_loaded(),
        })
    }

    /// Calls `f(segment id, index, item, placement)` for every item currently on screen.
    pub fn for_each_placement(&self, mut f: impl FnMut(&S::Id, usize, &S::Item, &Placement)) {
        for segment in &self.segments {
            if !segment.view.is_visible() {
                continue;
            }
            for (index, (placement, item)) in segment
                .view
                .placements()
                .iter()
                .zip(&segment.items)
                .enumerate()
            {
                if placement.visible {
                    f(&segment.id, index, item, placement);
                }
            }
        }
    }

    /// Calls `f(segment id, placement)` for every visible loading indicator.
    pub fn for_each_placeholder(&self, mut f: impl FnMut(&S::Id, &Placement)) {
        for segment in &self.segments {
            if let Some(placement) = segment.view.placeholder().filter(|p| p.visible) {
                f(&segment.id, placement);
            }
        }
    }

    /// The item at the viewport centre as of the last position update.
    pub fn focused(&self) -> Option<(&S::Id, usize, &S::Item)> {
        let (serial, index) = self.focused?;
        let segment = self.segments.iter().find(|s| s.serial == serial)?;
        let item = segment.items.get(index)?;
        Some((&segment.id, index, item))
    }

    pub fn pointer_start(&mut self, _event: &PointerEvent, _now_ms: u64) {
        let Some(first) = self.segments.front() else {
            return;
        };
        self.grabbed = self.segments.len() > 1 || first.is_loaded();
        if self.grabbed {
            self.start_move();
        }
    }

    pub fn pointer_move(&mut self, event: &PointerEvent, _now_ms: u64) {
        if self.grabbed {
            self.do_move(event.offset_x());
        }
    }

    pub fn pointer_end(&mut self, event: &PointerEvent, now_ms: u64) {
        if !self.grabbed {
            return;
        }
        let max = self.options.max_throw_velocity();
        self.do_throw(event.vel_x.clamp(-max, max), now_ms);
        self.grabbed = false;
        self.wait_step(now_ms);
    }

    /// Scrolls by the wheel's notch count, in items.
    pub fn wheel(&mut self, event: &WheelEvent, now_ms: u64) {
        if self.grabbed {
            return;
        }
        let Some(first) = self.segments.front() else {
            return;
        };
        let scroll = if event.step.abs() >= event.step_x.abs() {
            event.step
        } else {
            event.step_x
        };
        let distance = first.end_x - first.x + scroll * self.geometry().item_spacing;
        let max = self.options.max_throw_velocity();
        let velocity = throw_velocity(distance, self.options.drag).clamp(-max, max);
        self.do_throw(velocity, now_ms);
    }

    /// Restarts the auto-step countdown.
    pub fn hover_move(&mut self, now_ms: u64) {
        self.step_deadline = None;
        self.wait_step(now_ms);
    }

    /// Moves `step` items forward (positive) or backward, aligning to the side moved towards.
    pub fn step_item(&mut self, step: i32, now_ms: u64) {
        if self.grabbed || step == 0 {
            return;
        }
        let Some(first) = self.segments.front() else {
            return;
        };
        let g = *self.geometry();
        let side = if step > 0 {
            g.view_width + g.item_spacing - g.item_width - g.margin_width
        } else {
            g.margin_width
        };
        // A current item showing less than the tolerance counts as already passed.
        let tolerance = f64::from(Direction::from_step(step).signum()) * g.step_tolerance;
        let cell = (first.end_x - side) / g.item_spacing - f64::from(step) + tolerance;
        let cell = if step > 0 { cell.floor() } else { cell.ceil() };
        let distance = cell * g.item_spacing + side - first.x;
        strace!(step, distance, "step_item");
        self.do_throw(throw_velocity(distance, self.options.drag), now_ms);
    }

    /// Moves `step` pages, a page being the whole items between the margins.
    pub fn step_page(&mut self, step: i32, now_ms: u64) {
        let page = self.geometry().page_items();
        let items = i64::from(step) * i64::from(page);
        let items = items.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        self.step_item(items, now_ms);
    }

    /// Re-lays out every segment. Does nothing while animating: the next frame does it anyway.
    pub fn refresh(&mut self) {
        if self.removed || self.animation.is_some() {
            return;
        }
        self.update_positions();
        self.schedule_maintenance();
    }

    /// Applies a new container size. Item sizes and spacing are kept.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.view.resize(viewport)?;
        sdebug!(
            width = viewport.width,
            height = viewport.height,
            view_width = self.geometry().view_width,
            "resize"
        );
        self.refresh();
        Ok(())
    }

    /// Cancels every timer and animation and releases all segments. Idempotent.
    pub fn remove(&mut self) {
        if self.removed {
            return;
        }
        sdebug!(segments = self.segments.len(), "remove");
        self.cancel_animation();
        self.maintenance_pending = false;
        self.grabbed = false;
        while let Some(mut segment) = self.segments.pop_back() {
            segment.remove();
        }
        self.inbox.borrow_mut().clear();
        self.context.refresh.take();
        self.focused = None;
        self.removed = true;
    }

    fn schedule_maintenance(&mut self) {
        self.maintenance_pending = true;
    }

    fn position_of(&self, serial: u64) -> Option<usize> {
        self.segments.iter().position(|s| s.serial == serial)
    }

    fn insert_segment(&mut self, id: S::Id, index: usize) {
        let serial = self.next_serial;
        self.next_serial += 1;
        let alive = Rc::new(Cell::new(true));
        let width = self.view.geometry().item_spacing;
        let placeholder = self.view.create_placeholder_segment();
        self.segments.insert(
            index,
            Segment::placeholder(id.clone(), serial, Rc::clone(&alive), width, placeholder),
        );

        sdebug!(?id, serial, index, "load_segment");
        let loader = SegmentLoader::new(serial, alive, Rc::clone(&self.inbox));
        self.stream.load_segment(&id, &self.context, loader);
        self.drain_loads();

        if let Some(index) = self.position_of(serial) {
            if !self.segments[index].is_loaded() {
                self.init_position(index);
            }
        }
    }

    fn drain_loads(&mut self) {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some((serial, loaded)) = next else {
                break;
            };
            self.promote(serial, loaded);
        }
    }

    fn promote(&mut self, serial: u64, mut loaded: LoadedSegment<S::Id, S::Data>) {
        let Some(index) = self.position_of(serial) else {
            strace!(serial, "dropping load for a pruned segment");
            return;
        };
        let spacing = self.view.geometry().item_spacing;
        let forward = index + 1 == self.segments.len();
        let segment = &mut self.segments[index];

        let len = loaded.len;
        if len == 0 {
            if loaded.next.as_ref() == Some(&segment.id) {
                swarn!(id = ?segment.id, "empty segment links to itself; dropping next");
                loaded.next = None;
            }
            if loaded.prev.as_ref() == Some(&segment.id) {
                swarn!(id = ?segment.id, "empty segment links to itself; dropping prev");
                loaded.prev = None;
            }
        }
        sdebug!(id = ?segment.id, serial, len, "segment loaded");

        segment.view.remove();
        segment.view = self.view.create_segment(len);
        segment.width = len as f64 * spacing;
        segment.prev = loaded.prev.clone();
        segment.next = loaded.next.clone();

        // Create items nearest the current position first so their content loads first.
        let mut items = Vec::with_capacity(len);
        if forward {
            for i in 0..len {
                items.push(self.stream.create_item(&loaded, i, &self.context));
            }
        } else {
            for i in (0..len).rev() {
                items.push(self.stream.create_item(&loaded, i, &self.context));
            }
            items.reverse();
        }
        for (i, item) in items.iter().enumerate() {
            self.view.init_item(&mut segment.view, item, i);
        }
        segment.items = items;
        segment.source = Some(loaded);

        self.init_position(index);
        self.start_pending = false;
        self.schedule_maintenance();
    }

    fn init_position(&mut self, index: usize) {
        let g = *self.view.geometry();
        let len = self.segments.len();
        let segment = &self.segments[index];

        let (x, start_x, end_x) = if self.start_pending && segment.is_loaded() {
            self.start_pending = false;
            let start = self
                .options
                .start_item
                .as_ref()
                .and_then(|start| start.resolve(&segment.items))
                .filter(|&i| i < segment.items.len());
            let x = match start {
                Some(i) => (g.view_width - g.item_spacing) / 2.0 - i as f64 * g.item_spacing,
                None => g.left_stop(),
            };
            (x, x, x)
        } else if index == 0 && len > 1 && self.segments[1].is_loaded() {
            let first = &self.segments[1];
            let w = segment.width;
            (first.x - w, first.start_x - w, first.end_x - w)
        } else if index + 1 == len && len > 1 && self.segments[len - 2].is_loaded() {
            let last = &self.segments[len - 2];
            let w = last.width;
            (last.x + w, last.start_x + w, last.end_x + w)
        } else {
            let m = g.left_stop();
            (m, m, m)
        };

        self.segments[index].set_all(x, start_x, end_x);
        self.update_position(index);
    }

    fn update_position(&mut self, index: usize) {
        let g = *self.view.geometry();
        let segment = &mut self.segments[index];
        self.view
            .set_position(&mut segment.view, segment.x, &segment.items);

        let Some(focused) = g
            .focused_index(segment.x)
            .filter(|&i| i < segment.items.len())
        else {
            return;
        };
        let identity = (segment.serial, focused);
        if self.focused == Some(identity) {
            return;
        }
        self.focused = Some(identity);
        strace!(id = ?segment.id, index = focused, "item focused");
        if let Some(on_item_focused) = &self.options.on_item_focused {
            on_item_focused(&segment.items[focused], &segment.id, focused);
        }
    }

    fn update_positions(&mut self) {
        for index in 0..self.segments.len() {
            self.update_position(index);
        }
    }

    /// Prunes segments outside the retention window and loads one neighbour per side when the
    /// loaded edge comes within the preload distance.
    fn update_loaded_segments(&mut self) {
        self.maintenance_pending = false;
        if self.segments.is_empty() {
            return;
        }
        let g = *self.view.geometry();
        let preload = g.item_spacing * self.options.preload as f64;
        let retain = preload * 1.5;

        while self.segments.len() > 1 {
            let Some(first) = self.segments.front() else {
                break;
            };
            if first.max_x() + first.width >= -retain {
                break;
            }
            if let Some(mut segment) = self.segments.pop_front() {
                sdebug!(id = ?segment.id, "pruning first segment");
                segment.remove();
            }
        }
        while self.segments.len() > 1 {
            let Some(last) = self.segments.back() else {
                break;
            };
            if last.min_x() <= g.view_width + retain {
                break;
            }
            if let Some(mut segment) = self.segments.pop_back() {
                sdebug!(id = ?segment.id, "pruning last segment");
                segment.remove();
            }
        }

        let prev = self
            .segments
            .front()
            .filter(|first| first.max_x() > -preload)
            .and_then(|first| first.prev.clone());
        let next = self
            .segments
            .back()
            .filter(|last| last.min_x() + last.width < g.view_width + preload)
            .and_then(|last| last.next.clone());
        if let Some(prev) = prev {
            self.insert_segment(prev, 0);
        }
        if let Some(next) = next {
            let end = self.segments.len();
            self.insert_segment(next, end);
        }
    }

    fn begin_animation(&mut self, distance: f64, duration_ms: f64, motion: Motion, now_ms: u64) {
        self.cancel_animation();
        let Some(first) = self.segments.front() else {
            return;
        };
        let mut end_x = (first.x + distance).round();
        for segment in &mut self.segments {
            segment.start_x = segment.x;
            segment.end_x = end_x;
            end_x += segment.width;
        }
        strace!(distance, duration_ms, "begin_animation");
        self.schedule_maintenance();
        self.animation = Some(Animation::new(now_ms, duration_ms, motion));
    }

    fn end_animation(&mut self, now_ms: u64) {
        for segment in &mut self.segments {
            segment.x = segment.end_x;
            segment.start_x = segment.end_x;
        }
        self.animation = None;
        self.schedule_maintenance();
        self.wait_step(now_ms);
    }

    /// Drops the schedule only. Positions stay where they are.
    fn cancel_animation(&mut self) {
        self.step_deadline = None;
        self.animation = None;
    }

    fn animate(&mut self, now_ms: u64) {
        let Some(animation) = self.animation else {
            return;
        };
        if animation.is_done(now_ms) {
            self.end_animation(now_ms);
        } else {
            let t = animation.elapsed(now_ms);
            for segment in &mut self.segments {
                segment.x = animation.sample(segment.start_x, segment.end_x, t);
            }

            let g = *self.view.geometry();
            let past_left = self
                .segments
                .front()
                .is_some_and(|first| first.x > g.left_stop());
            let past_right = self
                .segments
                .back()
                .is_some_and(|last| last.x + last.width < g.right_stop());
            if past_left {
                let mut x = g.left_stop();
                for segment in &mut self.segments {
                    segment.end_x = x;
                    x += segment.width;
                }
                strace!("animation hit the left stop");
                self.end_animation(now_ms);
            } else if past_right {
                let mut x = g.right_stop();
                for segment in self.segments.iter_mut().rev() {
                    x -= segment.width;
                    segment.end_x = x;
                }
                strace!("animation hit the right stop");
                self.end_animation(now_ms);
            }
        }
        self.update_positions();
    }

    /// Arms the auto-step timer if nothing is moving or holding the list.
    fn wait_step(&mut self, now_ms: u64) {
        if self.animation.is_some()
            || self.step_deadline.is_some()
            || self.segments.is_empty()
            || self.grabbed
        {
            return;
        }
        if let Some(interval) = self.options.step_interval_ms {
            self.step_deadline = Some(now_ms.saturating_add(interval));
        }
    }

    fn auto_step(&mut self, now_ms: u64) {
        self.step_deadline = None;
        let Some(first) = self.segments.front() else {
            return;
        };
        let g = *self.view.geometry();
        let mut step = (g.margin_width - first.x) % g.item_spacing;
        // Already this close to aligned: go on to the next item.
        let tolerance = 0.25 * g.item_width;
        match self.step_direction {
            Direction::Backward => {
                while step <= tolerance {
                    step += g.item_spacing;
                }
            }
            Direction::Forward => {
                while step >= -tolerance {
                    step -= g.item_spacing;
                }
            }
        }
        strace!(step, direction = ?self.step_direction, "auto_step");
        self.begin_animation(
            step,
            self.options.step_duration_ms as f64,
            Motion::Eased(self.options.step_easing),
            now_ms,
        );
    }

    fn do_throw(&mut self, velocity: f64, now_ms: u64) {
        // Keep auto-stepping the way the user went.
        self.step_direction = if velocity > 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        };
        let Some(first) = self.segments.front() else {
            return;
        };
        let g = *self.view.geometry();
        let drag = self.options.drag;
        let offset = first.x - g.margin_width;

        let mut distance = throw_distance(velocity, drag);
        if self.options.rounding() {
            distance = round_to_item(distance, offset, g.item_spacing);
        }
        distance = clamp_to_items(distance, offset, g.item_spacing, self.options.max_throw_items);

        if let Some(throw) = Throw::for_distance(distance, drag) {
            strace!(velocity = throw.velocity, distance, "throw");
            self.begin_animation(distance, throw.duration_ms, Motion::Throw(throw), now_ms);
        }
    }

    fn start_move(&mut self) {
        self.cancel_animation();
        for segment in &mut self.segments {
            segment.start_x = segment.x;
            segment.end_x = segment.x;
        }
    }

    /// Moves every segment by `offset` from where [`Self::start_move`] left it, clamped to the
    /// loaded content plus one cell where more is on its way.
    fn do_move(&mut self, offset: f64) {
        let g = *self.view.geometry();
        let (Some(first), Some(last)) = (self.segments.front(), self.segments.back()) else {
            return;
        };
        let mut min_x = first.start_x;
        if first.prev.is_some() {
            min_x -= g.item_spacing;
        }
        let mut max_x = last.start_x + last.width;
        if last.next.is_some() {
            max_x += g.item_spacing;
        }
        let offset = offset
            .max(g.right_stop() - max_x)
            .min(g.left_stop() - min_x);

        for segment in &mut self.segments {
            segment.x = segment.start_x + offset;
            segment.end_x = segment.x;
        }
        self.update_positions();
        self.schedule_maintenance();
    }
}

impl<S: Stream, V: View<S::Item>> Drop for SlidingList<S, V> {
    fn drop(&mut self) {
        self.remove();
    }
}

impl<S: Stream, V: View<S::Item> + fmt::Debug> fmt::Debug for SlidingList<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlidingList")
            .field("view", &self.view)
            .field("segments", &self.segments.len())
            .field("animation", &self.animation)
            .field("step_deadline", &self.step_deadline)
            .field("grabbed", &self.grabbed)
            .field("removed", &self.removed)
            .finish_non_exhaustive()
    }
}
