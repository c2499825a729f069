use crate::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use slidelist::{
    Direction, FlatOptions, FlatView, HoverEvent, Item, PointerEvent, Size, SlidingList,
    SlidingListOptions, Stream, StreamContext, View, Viewport, Wakeup, WheelEvent,
};

#[derive(Debug, Default)]
struct Recorder {
    starts: Vec<PointerEvent>,
    moves: Vec<PointerEvent>,
    ends: Vec<PointerEvent>,
    wheels: Vec<WheelEvent>,
    hovers: Vec<&'static str>,
}

impl PointerHandler for Recorder {
    fn pointer_start(&mut self, event: &PointerEvent, _now_ms: u64) {
        self.starts.push(*event);
    }

    fn pointer_move(&mut self, event: &PointerEvent, _now_ms: u64) {
        self.moves.push(*event);
    }

    fn pointer_end(&mut self, event: &PointerEvent, _now_ms: u64) {
        self.ends.push(*event);
    }

    fn wheel(&mut self, event: &WheelEvent, _now_ms: u64) {
        self.wheels.push(*event);
    }

    fn hover_start(&mut self, _event: &HoverEvent, _now_ms: u64) {
        self.hovers.push("start");
    }

    fn hover_move(&mut self, _event: &HoverEvent, _now_ms: u64) {
        self.hovers.push("move");
    }

    fn hover_end(&mut self, _event: &HoverEvent, _now_ms: u64) {
        self.hovers.push("end");
    }
}

fn touch(x: f64, y: f64) -> [Touch; 1] {
    [Touch {
        id: 7,
        page_x: x,
        page_y: y,
    }]
}

fn touch_start(
    listener: &mut PointerListener,
    recorder: &mut Recorder,
    x: f64,
    y: f64,
    now: u64,
) -> EventResponse {
    let touches = touch(x, y);
    let event = RawEvent::TouchStart {
        changed: &touches,
        touches: &touches,
        default_prevented: false,
    };
    listener.handle(&event, now, recorder)
}

fn touch_move(
    listener: &mut PointerListener,
    recorder: &mut Recorder,
    x: f64,
    y: f64,
    now: u64,
) -> EventResponse {
    let touches = touch(x, y);
    listener.handle(&RawEvent::TouchMove { changed: &touches }, now, recorder)
}

fn mouse_down(
    x: f64,
    now: u64,
    listener: &mut PointerListener,
    recorder: &mut Recorder,
) -> EventResponse {
    let event = RawEvent::MouseDown {
        button: 1,
        page_x: x,
        page_y: 0.0,
        default_prevented: false,
    };
    listener.handle(&event, now, recorder)
}

fn mouse_move(
    x: f64,
    now: u64,
    listener: &mut PointerListener,
    recorder: &mut Recorder,
) -> EventResponse {
    let event = RawEvent::MouseMove {
        page_x: x,
        page_y: 0.0,
        inside: true,
    };
    listener.handle(&event, now, recorder)
}

fn mouse_up(x: f64, now: u64, listener: &mut PointerListener, recorder: &mut Recorder) {
    let event = RawEvent::MouseUp {
        button: 1,
        page_x: x,
        page_y: 0.0,
    };
    listener.handle(&event, now, recorder);
}

#[test]
fn small_touch_drag_is_not_committed() {
    let mut listener = PointerListener::new(PointerOptions::default().with_touch(true));
    let mut recorder = Recorder::default();

    let response = touch_start(&mut listener, &mut recorder, 100.0, 50.0, 0);
    assert!(!response.prevent_default);
    assert_eq!(recorder.starts.len(), 1);

    let response = touch_move(&mut listener, &mut recorder, 104.0, 50.0, 16);
    assert!(!response.prevent_default);
    assert!(!listener.is_dragging());
    assert_eq!(recorder.moves.len(), 1);
    assert_eq!(recorder.moves[0].offset_x(), 4.0);

    let response = touch_move(&mut listener, &mut recorder, 110.0, 50.0, 32);
    assert!(response.prevent_default);
    assert!(listener.is_dragging());
}

#[test]
fn touch_drag_on_the_other_axis_goes_back_to_the_platform() {
    let mut listener = PointerListener::new(PointerOptions::default().with_touch(true));
    let mut recorder = Recorder::default();

    touch_start(&mut listener, &mut recorder, 100.0, 50.0, 0);
    let response = touch_move(&mut listener, &mut recorder, 101.0, 80.0, 16);

    assert!(!response.prevent_default);
    assert_eq!(listener.pointer(), None);
    assert_eq!(recorder.ends.len(), 1);
    assert_eq!(recorder.ends[0].vel_x, 0.0);
    assert_eq!(recorder.ends[0].vel_y, 0.0);
    // Nothing more is reported for that touch.
    touch_move(&mut listener, &mut recorder, 101.0, 120.0, 32);
    assert_eq!(recorder.moves.len(), 0);
}

#[test]
fn vanished_touch_ends_without_flick() {
    let mut listener = PointerListener::new(PointerOptions::default().with_touch(true));
    let mut recorder = Recorder::default();

    touch_start(&mut listener, &mut recorder, 0.0, 0.0, 0);
    touch_move(&mut listener, &mut recorder, 40.0, 0.0, 20);

    let other = [Touch {
        id: 9,
        page_x: 10.0,
        page_y: 10.0,
    }];
    let event = RawEvent::TouchStart {
        changed: &other,
        touches: &other,
        default_prevented: false,
    };
    listener.handle(&event, 40, &mut recorder);

    assert_eq!(recorder.ends.len(), 1);
    assert_eq!(recorder.ends[0].vel_x, 0.0);
    assert_eq!(recorder.starts.len(), 2);
    assert_eq!(listener.pointer(), Some(PointerId::Touch(9)));
}

#[test]
fn velocity_covers_the_recent_interval() {
    let mut listener = PointerListener::default();
    let mut recorder = Recorder::default();

    let response = mouse_down(0.0, 0, &mut listener, &mut recorder);
    assert!(response.prevent_default);
    assert!(listener.is_capturing());

    mouse_move(50.0, 50, &mut listener, &mut recorder);
    mouse_move(100.0, 100, &mut listener, &mut recorder);
    assert_eq!(recorder.moves[1].vel_x, 1.0);

    mouse_up(100.0, 100, &mut listener, &mut recorder);
    assert!(!listener.is_capturing());
    assert_eq!(recorder.ends[0].vel_x, 1.0);
    assert_eq!(recorder.ends[0].offset_x(), 100.0);
}

#[test]
fn pause_before_release_drops_the_velocity() {
    let mut listener = PointerListener::default();
    let mut recorder = Recorder::default();

    mouse_down(0.0, 0, &mut listener, &mut recorder);
    mouse_move(50.0, 50, &mut listener, &mut recorder);
    mouse_move(100.0, 100, &mut listener, &mut recorder);
    mouse_up(101.0, 700, &mut listener, &mut recorder);

    assert_eq!(recorder.ends[0].vel_x, 0.0);
}

#[test]
fn click_after_a_drag_is_swallowed_once() {
    let mut listener = PointerListener::default();
    let mut recorder = Recorder::default();

    mouse_down(0.0, 0, &mut listener, &mut recorder);
    assert!(listener.clicks_suppressed(0));
    mouse_move(30.0, 16, &mut listener, &mut recorder);
    mouse_up(30.0, 32, &mut listener, &mut recorder);

    let response = listener.handle(&RawEvent::Click, 33, &mut recorder);
    assert!(response.prevent_default);
    assert!(response.stop_propagation);
    assert!(!listener.clicks_suppressed(34));

    // A plain press and release is a normal click.
    mouse_down(0.0, 100, &mut listener, &mut recorder);
    mouse_up(0.0, 120, &mut listener, &mut recorder);
    let response = listener.handle(&RawEvent::Click, 120, &mut recorder);
    assert_eq!(response, EventResponse::default());
}

#[test]
fn hover_follows_the_pointer() {
    let mut listener = PointerListener::default();
    let mut recorder = Recorder::default();

    mouse_move(10.0, 0, &mut listener, &mut recorder);
    mouse_move(20.0, 16, &mut listener, &mut recorder);
    let leave = RawEvent::MouseLeave {
        page_x: 20.0,
        page_y: 0.0,
    };
    listener.handle(&leave, 32, &mut recorder);
    assert_eq!(recorder.hovers, ["start", "move", "end"]);

    // While captured, leaving is derived from the moves themselves.
    mouse_down(20.0, 48, &mut listener, &mut recorder);
    mouse_move(30.0, 64, &mut listener, &mut recorder);
    let outside = RawEvent::MouseMove {
        page_x: 400.0,
        page_y: 0.0,
        inside: false,
    };
    listener.handle(&outside, 80, &mut recorder);
    assert_eq!(recorder.hovers, ["start", "move", "end", "start", "end"]);
}

#[test]
fn wheel_is_normalized_to_notches() {
    let mut listener = PointerListener::default();
    let mut recorder = Recorder::default();

    let lines = RawWheel {
        detail: 3.0,
        ..RawWheel::default()
    };
    let response = listener.handle(&RawEvent::Wheel(lines), 0, &mut recorder);
    assert!(response.prevent_default);
    assert_eq!(recorder.wheels[0].delta, -3.0);
    assert_eq!(recorder.wheels[0].step, -1.0);

    let notch = RawWheel {
        wheel_delta: 120.0,
        ..RawWheel::default()
    };
    listener.handle(&RawEvent::Wheel(notch), 16, &mut recorder);
    assert_eq!(recorder.wheels[1].delta, 1.0);
    assert_eq!(recorder.wheels[1].step_y, 1.0);

    // The smaller notch now also rescales larger deltas.
    listener.handle(&RawEvent::Wheel(lines), 32, &mut recorder);
    assert_eq!(recorder.wheels[2].step, -3.0);

    let sideways = RawWheel {
        wheel_delta: -240.0,
        horizontal_axis: true,
        ..RawWheel::default()
    };
    listener.handle(&RawEvent::Wheel(sideways), 48, &mut recorder);
    assert_eq!(recorder.wheels[3].step_x, -2.0);
    assert_eq!(recorder.wheels[3].step_y, 0.0);
}

#[test]
fn removed_listener_ignores_input() {
    let mut listener = PointerListener::default();
    let mut recorder = Recorder::default();

    mouse_down(0.0, 0, &mut listener, &mut recorder);
    listener.remove();
    assert!(!listener.is_capturing());

    mouse_move(50.0, 16, &mut listener, &mut recorder);
    let response = listener.handle(&RawEvent::SelectStart, 20, &mut recorder);
    assert_eq!(response, EventResponse::default());
    assert!(recorder.moves.is_empty());
}

#[derive(Debug, Default)]
struct Stage {
    shown: Vec<&'static str>,
    log: Vec<String>,
    opacity: HashMap<&'static str, f64>,
}

impl FadeContainer for Stage {
    type Element = &'static str;

    fn append(&mut self, element: &&'static str) {
        self.shown.push(element);
        self.log.push(format!("+{element}"));
    }

    fn remove(&mut self, element: &&'static str) {
        self.shown.retain(|e| e != element);
        self.log.push(format!("-{element}"));
    }

    fn set_opacity(&mut self, element: &&'static str, opacity: f64) {
        self.opacity.insert(element, opacity);
    }
}

fn run_fade(fade: &mut FadeTransition<Stage>, mut now: u64, until: u64) {
    while let Some(wakeup) = fade.next_wakeup() {
        now = match wakeup {
            Wakeup::Frame => now + 10,
            Wakeup::At(at) => at,
        };
        if now > until {
            return;
        }
        fade.tick(now);
    }
}

fn frame_at(fade: &mut FadeTransition<Stage>, now: u64) {
    assert_eq!(fade.next_wakeup(), Some(Wakeup::Frame));
    fade.tick(now);
}

#[test]
fn fade_in_waits_for_its_delay() {
    let mut fade = FadeTransition::new(Stage::default(), 100, 50, None, 0);
    fade.show("a", 0);
    assert!(fade.container().shown.is_empty());
    assert_eq!(fade.next_wakeup(), Some(Wakeup::At(50)));

    fade.tick(50);
    assert_eq!(fade.container().shown, ["a"]);
    assert_eq!(fade.container().opacity["a"], 0.01);

    frame_at(&mut fade, 100);
    assert_eq!(fade.container().opacity["a"], 0.5);
    frame_at(&mut fade, 150);
    assert_eq!(fade.container().opacity["a"], 1.0);
    assert_eq!(fade.next_wakeup(), None);
}

#[test]
fn superseded_element_is_never_appended() {
    let mut fade = FadeTransition::new(Stage::default(), 100, 50, None, 0);
    fade.show("a", 0);
    fade.show("b", 20);
    run_fade(&mut fade, 20, 1000);

    assert_eq!(fade.container().log, ["+b"]);
    assert_eq!(fade.target(), Some(&"b"));
}

#[test]
fn crossfade_starts_from_the_current_opacity() {
    let mut fade = FadeTransition::new(Stage::default(), 100, 50, None, 0);
    fade.show("a", 0);
    fade.tick(50);
    frame_at(&mut fade, 100);
    assert_eq!(fade.container().opacity["a"], 0.5);

    fade.show("b", 100);
    assert_eq!(fade.container().opacity["a"], 0.5);
    frame_at(&mut fade, 125);
    assert_eq!(fade.container().opacity["a"], 0.25);
    frame_at(&mut fade, 150);
    assert_eq!(fade.container().log, ["+a", "-a"]);

    // `b` waits for the delay after `a` is gone.
    assert_eq!(fade.next_wakeup(), Some(Wakeup::At(200)));
    fade.tick(200);
    assert_eq!(fade.container().shown, ["b"]);
    frame_at(&mut fade, 300);
    assert_eq!(fade.container().opacity["b"], 1.0);
    assert_eq!(fade.next_wakeup(), None);
}

#[test]
fn removed_fade_stops_ticking() {
    let mut fade = FadeTransition::new(Stage::default(), 100, 0, Some(200), 0);
    fade.show("a", 0);
    assert_eq!(fade.next_wakeup(), Some(Wakeup::Frame));
    fade.remove();
    assert_eq!(fade.next_wakeup(), None);
    fade.tick(100);
    assert_eq!(fade.container().opacity["a"], 0.01);
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tile(u32);

impl Item for Tile {
    fn width(&self) -> f64 {
        100.0
    }

    fn height(&self) -> f64 {
        100.0
    }
}

fn flat(view_width: f64) -> FlatView {
    let options = FlatOptions::default().with_item_size(100.0, 100.0);
    FlatView::new(Viewport::new(view_width, 100.0), options).unwrap()
}

fn settle<S: Stream, V: View<S::Item>>(list: &mut SlidingList<S, V>, now: &mut u64) {
    for _ in 0..500 {
        match list.next_wakeup() {
            Some(Wakeup::Frame) => {
                *now += 16;
                list.tick(*now);
            }
            _ => return,
        }
    }
    panic!("list never settled");
}

fn tiles(n: u32) -> ArrayStream<u32, impl FnMut(&u32, &StreamContext) -> Tile> {
    ArrayStream::new((0..n).collect(), |n: &u32, _: &StreamContext| Tile(*n))
}

#[test]
fn looping_array_repeats_itself() {
    let options = SlidingListOptions::new(0).with_step_interval_ms(None);
    let mut list = SlidingList::new(tiles(3), flat(300.0), options, 0).unwrap();
    let mut now = 0;
    settle(&mut list, &mut now);

    let segments: Vec<_> = list.segments().map(|s| (*s.id, s.len)).collect();
    assert!(segments.len() > 2);
    assert!(segments.iter().all(|&s| s == (0, 3)));

    let mut seen = Vec::new();
    list.for_each_placement(|_, _, tile, placement| {
        if placement.visible {
            seen.push((placement.x, tile.0));
        }
    });
    seen.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert_eq!(seen, [(0.0, 0), (100.0, 1), (200.0, 2)]);
}

#[test]
fn non_looping_array_is_a_single_segment() {
    let options = SlidingListOptions::new(0).with_step_interval_ms(None);
    let stream = tiles(3).with_looping(false);
    let mut list = SlidingList::new(stream, flat(300.0), options, 0).unwrap();
    let mut now = 0;
    settle(&mut list, &mut now);
    assert_eq!(list.segments().count(), 1);
}

#[test]
fn empty_looping_array_does_not_spin() {
    let options = SlidingListOptions::new(0).with_step_interval_ms(None);
    let mut list = SlidingList::new(tiles(0), flat(300.0), options, 0).unwrap();
    let mut now = 0;
    settle(&mut list, &mut now);
    assert_eq!(list.segments().count(), 1);
}

#[cfg(feature = "json")]
#[derive(Debug, Default)]
struct Requests {
    pending: Vec<(String, FetchResponse<u32, String>)>,
}

#[cfg(feature = "json")]
impl Fetch<u32, String> for Requests {
    fn fetch(&mut self, url: String, response: FetchResponse<u32, String>) {
        self.pending.push((url, response));
    }
}

#[cfg(feature = "json")]
#[test]
fn json_segments_resolve_and_link() {
    let stream = JsonStream::<u32, String, _, _>::new(
        "https://shelf.test/segments/",
        Requests::default(),
        |s: &String, _: &StreamContext| Tile(s.len() as u32),
    );
    let options = SlidingListOptions::new(7).with_step_interval_ms(None);
    let mut list = SlidingList::new(stream, flat(300.0), options, 0).unwrap();

    let (url, response) = list.stream_mut().fetch_mut().pending.remove(0);
    assert_eq!(url, "https://shelf.test/segments/7");
    response
        .complete(r#"{ "prev": null, "next": 8, "items": ["a", "bb", "ccc"] }"#)
        .unwrap();

    let mut now = 0;
    list.tick(now);
    settle(&mut list, &mut now);

    let first = list.segments().next().unwrap();
    assert_eq!((*first.id, first.len, first.loaded), (7, 3, true));
    let mut lengths = Vec::new();
    list.for_each_placement(|_, _, tile, _| lengths.push(tile.0));
    assert_eq!(lengths, [1, 2, 3]);

    let (url, response) = list.stream_mut().fetch_mut().pending.remove(0);
    assert_eq!(url, "https://shelf.test/segments/8");
    let err = response.complete("{ \"items\": [1, ").unwrap_err();
    assert!(matches!(err, JsonStreamError::Parse { ref id, .. } if id == "8"));

    list.tick(now + 16);
    let states: Vec<_> = list.segments().map(|s| (*s.id, s.loaded)).collect();
    assert_eq!(states, [(7, true), (8, false)]);
}

#[cfg(feature = "json")]
#[test]
fn segment_documents_default_missing_links() {
    let doc: SegmentDocument<String, u8> =
        serde_json::from_str(r#"{ "items": [1, 2] }"#).unwrap();
    assert_eq!(doc.prev, None);
    assert_eq!(doc.next, None);
    assert_eq!(doc.items, [1, 2]);
}

#[test]
fn task_queue_runs_one_task_per_tick() {
    let queue = TaskQueue::new();
    let ran = Rc::new(RefCell::new(Vec::new()));
    assert_eq!(queue.next_wakeup(), None);

    for n in 0..3 {
        let ran = ran.clone();
        queue.push(10, move || ran.borrow_mut().push(n));
    }
    assert_eq!(queue.next_wakeup(), Some(Wakeup::At(11)));
    assert!(!queue.tick(10));

    assert!(queue.tick(11));
    assert_eq!(*ran.borrow(), [0]);
    assert!(!queue.tick(11));
    assert!(queue.tick(12));
    assert!(queue.tick(13));
    assert_eq!(*ran.borrow(), [0, 1, 2]);
    assert!(queue.is_empty());
    assert_eq!(queue.next_wakeup(), None);
}

#[test]
fn lehmer_sequence_is_deterministic() {
    let mut a = LehmerRng::new(1);
    let first = a.next_f64();
    assert!((first - 0.065_069_243_620_463_24).abs() < 1e-12);

    let mut b = LehmerRng::new(1);
    assert_eq!(b.next_f64(), first);
    assert_eq!(a.next_f64(), b.next_f64());

    assert_eq!(cover_colour(1), [109, 130, 145]);
    assert_eq!(cover_colour(42), [177, 173, 160]);
}

/// Characters are half the font size wide; lines are 1.25 font sizes tall.
#[derive(Debug)]
struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn measure(&self, lines: &[&str], font_size: u32, _max_width: f64) -> Size {
        let size = f64::from(font_size);
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(widest as f64 * size * 0.5, lines.len() as f64 * size * 1.25)
    }
}

#[test]
fn substitute_text_shrinks_to_fit() {
    let spec = CoverSpec {
        title: "A Rather Long Title".into(),
        subtitle: Some("Sub".into()),
        authors: vec!["First Author".into(), "Second".into()],
        colour_seed: 1,
        ..CoverSpec::default()
    };
    let layout = layout_substitute(
        &spec,
        &SubstituteOptions::default(),
        Size::new(100.0, 150.0),
        &FixedMeasure,
    );

    // 19 characters must fit in 100px: 10px font is the largest that does.
    assert_eq!(layout.title.font_size, 10);
    // Two lines at 12px are 30px, under the 40px limit.
    assert_eq!(layout.authors.font_size, 12);
    assert_eq!(layout.authors.y, 120.0);
    assert_eq!(layout.subtitle.as_ref().map(|s| s.font_size), Some(12));
    // (150 - 12.5 - 15) * 0.2 = 24.5, tighter than the centre of the free space.
    assert_eq!(layout.title.y, 24.0);
    assert_eq!(layout.subtitle.as_ref().map(|s| s.y), Some(36.5));
    assert_eq!(layout.colour, [109, 130, 145]);
}

#[test]
fn cover_images_fit_and_rest_on_the_bottom() {
    let bounds = Size::new(100.0, 150.0);
    assert_eq!(fit_cover_image(Size::new(1.0, 1.0), bounds), None);
    assert_eq!(
        fit_cover_image(Size::new(200.0, 300.0), bounds),
        Some((Size::new(100.0, 150.0), 0.0))
    );
    assert_eq!(
        fit_cover_image(Size::new(400.0, 200.0), bounds),
        Some((Size::new(100.0, 50.0), 100.0))
    );
}

fn context() -> StreamContext {
    StreamContext {
        item_width: 100.0,
        item_height: 150.0,
        item_spacing: 110.0,
        refresh: Default::default(),
    }
}

#[test]
fn cover_without_image_is_substituted_through_the_queue() {
    let queue = TaskQueue::new();
    let context = context();
    let spec = CoverSpec {
        title: "Dune".into(),
        ..CoverSpec::default()
    };
    let options = Rc::new(SubstituteOptions::default());
    let (cover, load) =
        SubstituteCover::new(spec, &context, options, Rc::new(FixedMeasure), &queue, 0);

    assert!(load.is_none());
    assert!(!cover.is_ready());
    assert_eq!(cover.width(), 0.0);

    assert!(queue.tick(1));
    assert!(cover.is_ready());
    assert_eq!(cover.size(), Size::new(100.0, 150.0));
    assert!(context.refresh.is_requested());
}

#[test]
fn blank_cover_image_falls_back_to_a_substitute() {
    let queue = TaskQueue::new();
    let context = context();
    let spec = CoverSpec {
        image_url: Some("https://covers.test/1.jpg".into()),
        title: "Emma".into(),
        ..CoverSpec::default()
    };
    let options = Rc::new(SubstituteOptions::default());
    let measure = Rc::new(FixedMeasure);

    let (good, load) = SubstituteCover::new(
        spec.clone(),
        &context,
        options.clone(),
        measure.clone(),
        &queue,
        0,
    );
    load.unwrap().finish(Some(Size::new(300.0, 300.0)), 5);
    assert_eq!(
        good.content(),
        Some(CoverContent::Image {
            url: "https://covers.test/1.jpg".into(),
            size: Size::new(100.0, 100.0),
            top: 50.0,
        })
    );
    assert!(queue.is_empty());

    let (blank, load) = SubstituteCover::new(spec, &context, options, measure, &queue, 0);
    load.unwrap().finish(Some(Size::new(1.0, 1.0)), 5);
    assert!(!blank.is_ready());
    assert!(queue.tick(6));
    assert!(matches!(blank.content(), Some(CoverContent::Substitute(_))));
}

#[test]
fn dropped_cover_skips_its_substitute() {
    let queue = TaskQueue::new();
    let (cover, _) = SubstituteCover::new(
        CoverSpec::default(),
        &context(),
        Rc::new(SubstituteOptions::default()),
        Rc::new(FixedMeasure),
        &queue,
        0,
    );
    drop(cover);
    assert!(queue.tick(1));
    assert!(queue.is_empty());
}

fn first_x<S: Stream, V: View<S::Item>>(list: &SlidingList<S, V>) -> Option<f64> {
    list.segments().next().map(|s| s.x)
}

#[test]
fn widget_drags_and_steps_the_list() {
    let options = SlidingListOptions::new(0).with_step_interval_ms(None);
    let pointer = PointerOptions::default().with_touch(true);
    let mut widget = Widget::bookshelf(
        tiles(5).with_looping(false),
        Viewport::new(300.0, 100.0),
        FlatOptions::default().with_item_size(100.0, 100.0),
        options,
        pointer,
        0,
    )
    .unwrap();
    let mut now = 0;
    while widget.next_wakeup() == Some(Wakeup::Frame) {
        now += 16;
        widget.tick(now);
    }
    assert_eq!(first_x(widget.list()), Some(0.0));

    let start = touch(200.0, 0.0);
    let event = RawEvent::TouchStart {
        changed: &start,
        touches: &start,
        default_prevented: false,
    };
    widget.handle(&event, now);
    let moved = touch(150.0, 0.0);
    let response = widget.handle(&RawEvent::TouchMove { changed: &moved }, now + 16);
    assert!(response.prevent_default);
    assert_eq!(first_x(widget.list()), Some(-50.0));

    widget.handle(&RawEvent::TouchCancel { changed: &moved }, now + 32);
    assert!(!widget.list().is_grabbed());

    now += 32;
    widget.step(Direction::Backward, now);
    while widget.next_wakeup() == Some(Wakeup::Frame) {
        now += 16;
        widget.tick(now);
    }
    assert_eq!(first_x(widget.list()), Some(0.0));

    widget.remove();
    assert!(widget.list().is_removed());
    assert_eq!(widget.handle(&RawEvent::SelectStart, now), EventResponse::default());
    assert_eq!(widget.next_wakeup(), None);
}
