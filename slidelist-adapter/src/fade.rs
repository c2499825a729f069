use slidelist::Wakeup;

/// Where faded elements live.
///
/// Elements are handles: the transition keeps its own copies and passes references back.
pub trait FadeContainer {
    type Element;

    fn append(&mut self, element: &Self::Element);
    fn remove(&mut self, element: &Self::Element);
    fn set_opacity(&mut self, element: &Self::Element, opacity: f64);
}

const MIN_OPACITY: f64 = 0.01;

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else if num > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Cross-fades one element into a container in place of another.
///
/// `show` may be called at any time, including mid-transition: an element that is fading in
/// starts fading out from its current opacity, and an element that never got to fade in is
/// never appended.
#[derive(Debug)]
pub struct FadeTransition<C: FadeContainer> {
    container: C,
    out_duration: f64,
    in_delay: f64,
    in_duration: f64,
    prev: Option<C::Element>,
    /// When `prev` is fully faded out.
    prev_fade_time: f64,
    current: Option<C::Element>,
    /// Without `next`, when `current` is fully in; with `next`, when it is fully out.
    current_fade_time: f64,
    current_added: bool,
    next: Option<C::Element>,
    wakeup: Option<Wakeup>,
}

impl<C: FadeContainer> FadeTransition<C> {
    /// `in_duration` defaults to `out_duration`.
    pub fn new(
        container: C,
        out_duration_ms: u64,
        in_delay_ms: u64,
        in_duration_ms: Option<u64>,
        now_ms: u64,
    ) -> Self {
        let now = now_ms as f64;
        Self {
            container,
            out_duration: out_duration_ms as f64,
            in_delay: in_delay_ms as f64,
            in_duration: in_duration_ms.unwrap_or(out_duration_ms) as f64,
            prev: None,
            prev_fade_time: now,
            current: None,
            current_fade_time: now,
            current_added: false,
            next: None,
            wakeup: None,
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// The element that is (or will be) fully shown.
    pub fn target(&self) -> Option<&C::Element> {
        self.next.as_ref().or(self.current.as_ref())
    }

    pub fn next_wakeup(&self) -> Option<Wakeup> {
        self.wakeup
    }

    /// Starts transitioning to `element`.
    pub fn show(&mut self, element: C::Element, now_ms: u64) {
        self.wakeup = None;
        let t = now_ms as f64;
        if self.next.is_none() {
            // Fade out for as long as it has been fading in.
            let shown = 1.0 - ratio(self.current_fade_time - t, self.in_duration);
            self.current_fade_time = t + shown.min(1.0) * self.out_duration;
        }
        self.next = Some(element);
        if self.prev.is_none() {
            if self.current_added {
                self.prev = self.current.take();
                self.prev_fade_time = self.current_fade_time;
                self.current_added = false;
            }
            self.current = None;
        }
        // Otherwise `next` waits until both `prev` and `current` have gone.
        self.update(t);
    }

    pub fn tick(&mut self, now_ms: u64) {
        let due = match self.wakeup {
            Some(Wakeup::Frame) => true,
            Some(Wakeup::At(at)) => now_ms >= at,
            None => false,
        };
        if due {
            self.update(now_ms as f64);
        }
    }

    /// Stops animating. Elements stay in the container as they are.
    pub fn remove(&mut self) {
        self.wakeup = None;
    }

    fn set_opacity(container: &mut C, element: &C::Element, opacity: f64) {
        container.set_opacity(element, opacity.clamp(MIN_OPACITY, 1.0));
    }

    fn update(&mut self, t: f64) {
        self.wakeup = None;

        if self.next.is_some() {
            if self.current_added {
                if let Some(current) = &self.current {
                    if t < self.current_fade_time {
                        let opacity = ratio(self.current_fade_time - t, self.out_duration);
                        Self::set_opacity(&mut self.container, current, opacity);
                    } else {
                        self.container.remove(current);
                        self.current_added = false;
                    }
                }
            }
            if !self.current_added {
                self.current = self.next.take();
                self.current_fade_time =
                    t.max(t.max(self.prev_fade_time) + self.in_delay) + self.in_duration;
            }
        }

        if self.next.is_none() && t >= self.current_fade_time - self.in_duration {
            if let Some(current) = &self.current {
                let opacity = 1.0 - ratio(self.current_fade_time - t, self.in_duration);
                Self::set_opacity(&mut self.container, current, opacity);
                if !self.current_added {
                    self.container.append(current);
                    self.current_added = true;
                }
            }
        }

        if let Some(prev) = &self.prev {
            if t < self.prev_fade_time {
                let opacity = ratio(self.prev_fade_time - t, self.out_duration);
                Self::set_opacity(&mut self.container, prev, opacity);
            } else {
                self.container.remove(prev);
                self.prev = None;
            }
        }

        let fading_in = t >= self.current_fade_time - self.in_duration && t < self.current_fade_time;
        if self.prev.is_some() || fading_in {
            self.wakeup = Some(Wakeup::Frame);
        } else if t < self.current_fade_time {
            let at = (self.current_fade_time - self.in_duration).ceil().max(0.0);
            self.wakeup = Some(Wakeup::At(at as u64));
        }
    }
}
