use std::collections::VecDeque;

use slidelist::{HoverEvent, PointerEvent, WheelEvent};

/// Which physical pointer is being tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerId {
    /// The primary mouse button.
    Mouse,
    Touch(u64),
}

/// One touch point as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Touch {
    pub id: u64,
    pub page_x: f64,
    pub page_y: f64,
}

/// A legacy wheel event: `detail` lines (negative is up) or `wheel_delta` in 120ths of a notch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawWheel {
    pub detail: f64,
    pub wheel_delta: f64,
    /// Set when the platform reports the whole delta on the horizontal axis.
    pub horizontal_axis: bool,
    pub wheel_delta_x: Option<f64>,
    pub wheel_delta_y: Option<f64>,
    pub default_prevented: bool,
}

/// Raw platform input for one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawEvent<'a> {
    TouchStart {
        /// Touches that started with this event.
        changed: &'a [Touch],
        /// Every touch currently down.
        touches: &'a [Touch],
        default_prevented: bool,
    },
    TouchMove {
        changed: &'a [Touch],
    },
    TouchEnd {
        changed: &'a [Touch],
    },
    TouchCancel {
        changed: &'a [Touch],
    },
    MouseEnter {
        page_x: f64,
        page_y: f64,
    },
    MouseLeave {
        page_x: f64,
        page_y: f64,
    },
    MouseDown {
        /// `1` is the primary button.
        button: u16,
        page_x: f64,
        page_y: f64,
        default_prevented: bool,
    },
    MouseMove {
        page_x: f64,
        page_y: f64,
        /// Whether the pointer is over the element. Only consulted while capturing.
        inside: bool,
    },
    MouseUp {
        button: u16,
        page_x: f64,
        page_y: f64,
    },
    Wheel(RawWheel),
    Click,
    ContextMenu,
    LoseCapture,
    DragStart,
    SelectStart,
}

/// What the host should do with the raw event after the listener saw it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the platform default (scrolling, selection, drag-and-drop).
    pub prevent_default: bool,
    /// Keep the event from reaching other listeners.
    pub stop_propagation: bool,
}

impl EventResponse {
    const IGNORED: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    const PREVENT: Self = Self {
        prevent_default: true,
        stop_propagation: false,
    };

    const SWALLOW: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}

/// Receives normalized pointer input.
pub trait PointerHandler {
    fn pointer_start(&mut self, event: &PointerEvent, now_ms: u64);
    fn pointer_move(&mut self, event: &PointerEvent, now_ms: u64);
    fn pointer_end(&mut self, event: &PointerEvent, now_ms: u64);
    fn wheel(&mut self, event: &WheelEvent, now_ms: u64);

    fn hover_start(&mut self, event: &HoverEvent, now_ms: u64) {
        let _ = (event, now_ms);
    }

    fn hover_move(&mut self, event: &HoverEvent, now_ms: u64) {
        let _ = (event, now_ms);
    }

    fn hover_end(&mut self, event: &HoverEvent, now_ms: u64) {
        let _ = (event, now_ms);
    }
}

/// Options for [`PointerListener`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerOptions {
    /// Horizontal drags are ours: once committed, scrolling is prevented.
    pub drag_horizontal: bool,
    pub drag_vertical: bool,
    /// The device delivers touch events. Touch drags on an axis we do not handle are given
    /// back to the platform; mouse capture is only used without touch.
    pub touch: bool,
    /// Movement (px) before a drag commits.
    pub drag_tolerance: f64,
    /// Velocity is measured over roughly this much trailing time.
    pub velocity_interval_ms: u64,
    /// A pause this long between samples zeroes the velocity.
    pub idle_interval_ms: u64,
}

impl Default for PointerOptions {
    fn default() -> Self {
        Self {
            drag_horizontal: true,
            drag_vertical: false,
            touch: false,
            drag_tolerance: 6.0,
            velocity_interval_ms: 100,
            idle_interval_ms: 500,
        }
    }
}

impl PointerOptions {
    pub fn with_drag_axes(mut self, horizontal: bool, vertical: bool) -> Self {
        self.drag_horizontal = horizontal;
        self.drag_vertical = vertical;
        self
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn with_drag_tolerance(mut self, tolerance: f64) -> Self {
        self.drag_tolerance = tolerance;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    x: f64,
    y: f64,
    time: u64,
}

/// Turns raw touch/mouse streams into single-pointer start/move/end events with velocity, plus
/// hover and notch-normalized wheel events.
///
/// The listener holds no platform objects. Hosts feed every raw event through
/// [`PointerListener::handle`], apply the returned [`EventResponse`], and route window-level
/// mouse events to it while [`PointerListener::is_capturing`] is set.
#[derive(Clone, Debug)]
pub struct PointerListener {
    options: PointerOptions,
    pointer: Option<PointerId>,
    dragging: bool,
    capturing: bool,
    suppressing_clicks: bool,
    suppress_clicks_until: Option<u64>,
    start: Sample,
    recent: VecDeque<Sample>,
    vel_x: f64,
    vel_y: f64,
    hovering: bool,
    wheel_step: f64,
    removed: bool,
}

impl PointerListener {
    pub fn new(options: PointerOptions) -> Self {
        Self {
            options,
            pointer: None,
            dragging: false,
            capturing: false,
            suppressing_clicks: false,
            suppress_clicks_until: None,
            start: Sample {
                x: 0.0,
                y: 0.0,
                time: 0,
            },
            recent: VecDeque::new(),
            vel_x: 0.0,
            vel_y: 0.0,
            hovering: false,
            wheel_step: f64::INFINITY,
            removed: false,
        }
    }

    pub fn options(&self) -> &PointerOptions {
        &self.options
    }

    pub fn pointer(&self) -> Option<PointerId> {
        self.pointer
    }

    /// A drag has passed the tolerance on a handled axis.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// A mouse press is being tracked outside the element too.
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Stops tracking and ignores all further input.
    pub fn remove(&mut self) {
        self.end_capture();
        self.suppressing_clicks = false;
        self.suppress_clicks_until = None;
        self.pointer = None;
        self.removed = true;
    }

    pub fn handle(
        &mut self,
        event: &RawEvent<'_>,
        now_ms: u64,
        handler: &mut impl PointerHandler,
    ) -> EventResponse {
        if self.removed {
            return EventResponse::IGNORED;
        }
        match *event {
            RawEvent::TouchStart {
                changed,
                touches,
                default_prevented,
            } => {
                self.touch_start(changed, touches, default_prevented, now_ms, handler);
                EventResponse::IGNORED
            }
            RawEvent::TouchMove { changed } => match self.tracked_touch(changed) {
                Some(touch) => self.move_point(touch.page_x, touch.page_y, now_ms, handler),
                None => EventResponse::IGNORED,
            },
            RawEvent::TouchEnd { changed } => {
                if let Some(touch) = self.tracked_touch(changed) {
                    self.end_point(Some((touch.page_x, touch.page_y)), false, now_ms, handler);
                }
                EventResponse::IGNORED
            }
            RawEvent::TouchCancel { changed } => {
                if let Some(touch) = self.tracked_touch(changed) {
                    self.end_point(Some((touch.page_x, touch.page_y)), true, now_ms, handler);
                }
                EventResponse::IGNORED
            }
            RawEvent::MouseEnter { page_x, page_y } => {
                if !self.capturing {
                    self.move_hover(page_x, page_y, now_ms, handler);
                }
                EventResponse::IGNORED
            }
            RawEvent::MouseLeave { page_x, page_y } => {
                if !self.capturing {
                    self.end_hover(page_x, page_y, now_ms, handler);
                }
                EventResponse::IGNORED
            }
            RawEvent::MouseDown {
                button,
                page_x,
                page_y,
                default_prevented,
            } => {
                if button != 1 || self.pointer.is_some() || default_prevented {
                    return EventResponse::IGNORED;
                }
                self.start_point(PointerId::Mouse, page_x, page_y, now_ms);
                self.dispatch(now_ms, handler, PointerHandler::pointer_start);
                self.suppressing_clicks = true;
                self.suppress_clicks_until = None;
                // Keeps the press from starting a text selection.
                EventResponse::PREVENT
            }
            RawEvent::MouseMove {
                page_x,
                page_y,
                inside,
            } => match self.pointer {
                Some(PointerId::Mouse) => {
                    if self.capturing {
                        if inside {
                            self.move_hover(page_x, page_y, now_ms, handler);
                        } else {
                            self.end_hover(page_x, page_y, now_ms, handler);
                        }
                    }
                    self.move_point(page_x, page_y, now_ms, handler)
                }
                None => {
                    self.move_hover(page_x, page_y, now_ms, handler);
                    EventResponse::IGNORED
                }
                Some(PointerId::Touch(_)) => EventResponse::IGNORED,
            },
            RawEvent::MouseUp {
                button,
                page_x,
                page_y,
            } => {
                if button == 1 && self.pointer == Some(PointerId::Mouse) {
                    self.end_point(Some((page_x, page_y)), false, now_ms, handler);
                }
                EventResponse::IGNORED
            }
            RawEvent::Wheel(wheel) => self.wheel(&wheel, now_ms, handler),
            RawEvent::Click => {
                if self.clicks_suppressed(now_ms) {
                    EventResponse::SWALLOW
                } else {
                    EventResponse::IGNORED
                }
            }
            RawEvent::ContextMenu | RawEvent::LoseCapture => {
                if self.pointer.is_some() {
                    self.end_point(None, true, now_ms, handler);
                }
                EventResponse::IGNORED
            }
            RawEvent::DragStart | RawEvent::SelectStart => EventResponse::PREVENT,
        }
    }

    /// Whether a click arriving now follows one of our drags and should be swallowed.
    pub fn clicks_suppressed(&self, now_ms: u64) -> bool {
        self.suppressing_clicks || self.suppress_clicks_until.is_some_and(|until| now_ms <= until)
    }

    fn tracked_touch(&self, changed: &[Touch]) -> Option<Touch> {
        let Some(PointerId::Touch(id)) = self.pointer else {
            return None;
        };
        changed.iter().copied().find(|touch| touch.id == id)
    }

    fn touch_start(
        &mut self,
        changed: &[Touch],
        touches: &[Touch],
        default_prevented: bool,
        now_ms: u64,
        handler: &mut impl PointerHandler,
    ) {
        // A tracked touch that is no longer down was lost somewhere.
        if let Some(PointerId::Touch(id)) = self.pointer {
            if !touches.iter().any(|touch| touch.id == id) {
                atrace!(id, "tracked touch vanished");
                self.end_point(None, true, now_ms, handler);
            }
        }
        if self.pointer.is_some() || default_prevented {
            return;
        }
        let Some(touch) = changed.first() else {
            return;
        };
        self.start_point(PointerId::Touch(touch.id), touch.page_x, touch.page_y, now_ms);
        self.dispatch(now_ms, handler, PointerHandler::pointer_start);
    }

    fn start_point(&mut self, id: PointerId, x: f64, y: f64, now_ms: u64) {
        self.pointer = Some(id);
        self.start = Sample { x, y, time: now_ms };
        self.recent.clear();
        self.recent.push_back(self.start);
        self.vel_x = 0.0;
        self.vel_y = 0.0;
        self.start_capture();
    }

    /// Records a sample and refreshes the velocity. Returns whether the position changed.
    fn update_point(&mut self, x: f64, y: f64, now_ms: u64) -> bool {
        let prev = self.recent.back().copied();
        let cur = Sample { x, y, time: now_ms };
        self.recent.push_back(cur);
        while self.recent.len() > 2
            && self.recent.front().is_some_and(|first| {
                cur.time.saturating_sub(first.time) > self.options.velocity_interval_ms
            })
        {
            self.recent.pop_front();
        }

        if let Some(from) = self.recent.front().copied() {
            let dt = cur.time.saturating_sub(from.time);
            if dt >= self.options.idle_interval_ms {
                self.recent.pop_front();
                self.vel_x = 0.0;
                self.vel_y = 0.0;
            } else if dt > 0 {
                self.vel_x = (cur.x - from.x) / dt as f64;
                self.vel_y = (cur.y - from.y) / dt as f64;
            }
        }

        prev.is_none_or(|prev| prev.x != cur.x || prev.y != cur.y)
    }

    fn move_point(
        &mut self,
        x: f64,
        y: f64,
        now_ms: u64,
        handler: &mut impl PointerHandler,
    ) -> EventResponse {
        if !self.update_point(x, y, now_ms) {
            return EventResponse::IGNORED;
        }

        if !self.dragging {
            let tolerance = self.options.drag_tolerance;
            let horizontal = (x - self.start.x).abs() >= tolerance;
            let vertical = (y - self.start.y).abs() >= tolerance;
            let (drag_h, drag_v) = (self.options.drag_horizontal, self.options.drag_vertical);
            if (drag_h && horizontal) || (drag_v && vertical) {
                atrace!(x, y, "drag committed");
                self.dragging = true;
            } else if self.options.touch && ((!drag_h && horizontal) || (!drag_v && vertical)) {
                // Let the platform scroll instead.
                atrace!(x, y, "touch released to native scrolling");
                self.end_point(Some((x, y)), true, now_ms, handler);
            }
        }

        if self.pointer.is_some() {
            self.dispatch(now_ms, handler, PointerHandler::pointer_move);
        }

        if self.dragging {
            EventResponse::PREVENT
        } else {
            EventResponse::IGNORED
        }
    }

    fn end_point(
        &mut self,
        at: Option<(f64, f64)>,
        no_flick: bool,
        now_ms: u64,
        handler: &mut impl PointerHandler,
    ) {
        self.end_capture();
        self.pointer = None;
        if self.suppressing_clicks {
            self.suppressing_clicks = false;
            // The click that follows a drag's release is still ours.
            self.suppress_clicks_until = self.dragging.then_some(now_ms.saturating_add(1));
        }
        self.dragging = false;
        if let Some((x, y)) = at {
            self.update_point(x, y, now_ms);
        }
        if no_flick {
            self.vel_x = 0.0;
            self.vel_y = 0.0;
        }
        self.dispatch(now_ms, handler, PointerHandler::pointer_end);
    }

    fn dispatch<H: PointerHandler>(
        &self,
        now_ms: u64,
        handler: &mut H,
        f: fn(&mut H, &PointerEvent, u64),
    ) {
        let last = self.recent.back().copied().unwrap_or(self.start);
        let event = PointerEvent {
            page_x: last.x,
            page_y: last.y,
            start_x: self.start.x,
            start_y: self.start.y,
            vel_x: self.vel_x,
            vel_y: self.vel_y,
        };
        f(handler, &event, now_ms);
    }

    fn start_capture(&mut self) {
        if !self.options.touch && !self.capturing {
            self.capturing = true;
        }
    }

    fn end_capture(&mut self) {
        self.capturing = false;
    }

    fn move_hover(&mut self, x: f64, y: f64, now_ms: u64, handler: &mut impl PointerHandler) {
        let event = HoverEvent {
            page_x: x,
            page_y: y,
        };
        if self.hovering {
            handler.hover_move(&event, now_ms);
        } else {
            self.hovering = true;
            handler.hover_start(&event, now_ms);
        }
    }

    fn end_hover(&mut self, x: f64, y: f64, now_ms: u64, handler: &mut impl PointerHandler) {
        if self.hovering {
            self.hovering = false;
            handler.hover_end(
                &HoverEvent {
                    page_x: x,
                    page_y: y,
                },
                now_ms,
            );
        }
    }

    fn wheel(
        &mut self,
        wheel: &RawWheel,
        now_ms: u64,
        handler: &mut impl PointerHandler,
    ) -> EventResponse {
        if wheel.default_prevented {
            return EventResponse::IGNORED;
        }
        let delta = if wheel.detail != 0.0 {
            -wheel.detail
        } else {
            wheel.wheel_delta / 120.0
        };
        if delta == 0.0 || !delta.is_finite() {
            return EventResponse::IGNORED;
        }

        let (delta_x, delta_y) = if wheel.horizontal_axis {
            (delta, 0.0)
        } else if let (Some(x), Some(y)) = (wheel.wheel_delta_x, wheel.wheel_delta_y) {
            (x / 120.0, y / 120.0)
        } else {
            (0.0, delta)
        };

        // The smallest delta seen so far is our best guess at one notch.
        self.wheel_step = delta.abs().min(self.wheel_step).max(1.0);
        let step = self.wheel_step;
        handler.wheel(
            &WheelEvent {
                delta,
                delta_x,
                delta_y,
                step: delta / step,
                step_x: delta_x / step,
                step_y: delta_y / step,
            },
            now_ms,
        );
        EventResponse::PREVENT
    }
}

impl Default for PointerListener {
    fn default() -> Self {
        Self::new(PointerOptions::default())
    }
}
