/// A time-based tween over signed pixel values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: i32,
    pub to: i32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: i32, to: i32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        self.easing.sample(t)
    }

    pub fn sample(&self, now_ms: u64) -> i32 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let from = self.from as f32;
        let to = self.to as f32;
        (from + (to - from) * self.progress(now_ms)).round() as i32
    }

    pub fn retarget(&mut self, now_ms: u64, new_to: i32, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
    /// Cosine ease used for app-bar offset animations.
    AccelerateDecelerate,
    /// Exponential approach used for programmatic scrolls.
    ViscousFluid,
}

const VISCOUS_FLUID_SCALE: f32 = 8.0;

fn viscous_fluid(t: f32) -> f32 {
    let x = t * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        let start = 0.367_879_44; // 1/e
        let x = 1.0 - (1.0 - x).exp();
        start + x * (1.0 - start)
    }
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
            Self::AccelerateDecelerate => ((t + 1.0) * core::f32::consts::PI).cos() / 2.0 + 0.5,
            Self::ViscousFluid => {
                if t >= 1.0 {
                    return 1.0;
                }
                (viscous_fluid(t) / viscous_fluid(1.0)).clamp(0.0, 1.0)
            }
        }
    }
}
