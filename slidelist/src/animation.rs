use crate::physics::Throw;

/// Easing curve for timed (non-physical) steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    #[default]
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SmoothStep => smoothstep(t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// `3t² − 2t³`, the curve used for eased steps and train focus blending.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Motion {
    Throw(Throw),
    Eased(Easing),
}

/// An in-flight move of every segment from `start_x` to `end_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Animation {
    pub(crate) start_ms: u64,
    pub(crate) duration_ms: f64,
    pub(crate) motion: Motion,
}

impl Animation {
    pub(crate) fn new(start_ms: u64, duration_ms: f64, motion: Motion) -> Self {
        Self {
            start_ms,
            duration_ms: duration_ms.max(0.0),
            motion,
        }
    }

    pub(crate) fn elapsed(&self, now_ms: u64) -> f64 {
        now_ms.saturating_sub(self.start_ms) as f64
    }

    pub(crate) fn is_done(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms) >= self.duration_ms
    }

    /// Position of a segment `t` milliseconds in.
    pub(crate) fn sample(&self, start_x: f64, end_x: f64, t: f64) -> f64 {
        match self.motion {
            Motion::Throw(throw) => start_x + throw.travel(t),
            Motion::Eased(easing) => {
                if self.duration_ms <= 0.0 {
                    return end_x;
                }
                let e = easing.sample(t / self.duration_ms);
                start_x + e * (end_x - start_x)
            }
        }
    }
}
