//! Ballistic fling and timed scroll in one scroller.
//!
//! Flings follow the Android deceleration spline: duration and distance come from the release
//! velocity, friction and display density, and progress along the distance is read from a
//! precomputed spline table. Timed scrolls reuse [`Easing`].

use std::sync::LazyLock;

use crate::tween::Easing;

const INFLEXION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLEXION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLEXION);
const NB_SAMPLES: usize = 100;

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
const DECELERATION_RATE: f64 = 2.358_201_6;

static SPLINE_POSITION: LazyLock<[f32; NB_SAMPLES + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; NB_SAMPLES + 1];
    let mut x_min = 0.0f32;
    for (i, slot) in positions.iter_mut().enumerate().take(NB_SAMPLES) {
        let alpha = i as f32 / NB_SAMPLES as f32;
        let mut x_max = 1.0f32;
        let mut x = x_min;
        let mut coef = 0.0;
        for _ in 0..64 {
            x = x_min + (x_max - x_min) / 2.0;
            coef = 3.0 * x * (1.0 - x);
            let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
            if (tx - alpha).abs() < 1e-5 {
                break;
            }
            if tx > alpha {
                x_max = x;
            } else {
                x_min = x;
            }
        }
        *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }
    positions[NB_SAMPLES] = 1.0;
    positions
});

/// Fraction of the fling distance covered at normalized time `t`.
fn spline_distance(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let index = (NB_SAMPLES as f32 * t) as usize;
    if index >= NB_SAMPLES {
        return 1.0;
    }
    let t_inf = index as f32 / NB_SAMPLES as f32;
    let t_sup = (index + 1) as f32 / NB_SAMPLES as f32;
    let d_inf = SPLINE_POSITION[index];
    let d_sup = SPLINE_POSITION[index + 1];
    d_inf + (t - t_inf) * (d_sup - d_inf) / (t_sup - t_inf)
}

/// Duration and distance of a fling for a given release velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84,
        }
    }

    fn deceleration(&self, velocity: f32) -> f64 {
        (INFLEXION as f64 * velocity.abs() as f64
            / (self.friction as f64 * self.physical_coefficient as f64))
            .ln()
    }

    pub fn duration_ms(&self, velocity: f32) -> u64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as u64
    }

    /// Unsigned distance in pixels.
    pub fn distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.deceleration(velocity);
        let coefficient = self.friction as f64 * self.physical_coefficient as f64;
        (coefficient * (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp()) as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Fling { distance: f32, sign: f32, min: i32, max: i32 },
    Scroll { delta: i32, easing: Easing },
}

/// One-dimensional scroller driven by explicit timestamps.
///
/// Call [`Scroller::compute_scroll_offset`] once per frame. It returns `true` while there is a
/// position to apply (including the frame that lands on the final position) and `false` once
/// the motion has been consumed.
#[derive(Clone, Debug)]
pub struct Scroller {
    calculator: FlingCalculator,
    motion: Option<Motion>,
    start: i32,
    current: i32,
    final_position: i32,
    start_ms: u64,
    duration_ms: u64,
    finished: bool,
}

impl Scroller {
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            calculator: FlingCalculator::new(friction, density),
            motion: None,
            start: 0,
            current: 0,
            final_position: 0,
            start_ms: 0,
            duration_ms: 0,
            finished: true,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn final_position(&self) -> i32 {
        self.final_position
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Starts a ballistic fling from `start`. The target is clamped into `[min, max]` and the
    /// motion stops early when it reaches a bound.
    pub fn fling(&mut self, start: i32, velocity: f32, min: i32, max: i32, now_ms: u64) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let distance = self.calculator.distance(velocity);
        let sign = velocity.signum();
        let unclamped = (start as f32 + sign * distance).round() as i32;

        self.motion = Some(Motion::Fling {
            distance,
            sign,
            min,
            max,
        });
        self.start = start;
        self.current = start;
        self.final_position = unclamped.clamp(min, max);
        self.start_ms = now_ms;
        self.duration_ms = self.calculator.duration_ms(velocity);
        self.finished = false;
        ndebug!(
            start,
            velocity,
            final_position = self.final_position,
            duration_ms = self.duration_ms,
            "fling"
        );
    }

    /// Starts a timed scroll of `delta` pixels from `start`.
    pub fn start_scroll(
        &mut self,
        start: i32,
        delta: i32,
        duration_ms: u64,
        easing: Easing,
        now_ms: u64,
    ) {
        self.motion = Some(Motion::Scroll { delta, easing });
        self.start = start;
        self.current = start;
        self.final_position = start + delta;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms;
        self.finished = false;
    }

    /// Advances to `now_ms`. See the type docs for the return value.
    pub fn compute_scroll_offset(&mut self, now_ms: u64) -> bool {
        if self.finished {
            return false;
        }
        let Some(motion) = self.motion else {
            self.finished = true;
            return false;
        };

        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed >= self.duration_ms {
            self.current = self.final_position;
            self.finished = true;
            return true;
        }
        let t = elapsed as f32 / self.duration_ms as f32;

        match motion {
            Motion::Fling {
                distance,
                sign,
                min,
                max,
            } => {
                let travelled = (sign * distance * spline_distance(t)).round() as i32;
                self.current = (self.start + travelled).clamp(min, max);
                if self.current == self.final_position {
                    self.finished = true;
                }
            }
            Motion::Scroll { delta, easing } => {
                self.current = self.start + (delta as f32 * easing.sample(t)).round() as i32;
            }
        }
        true
    }

    /// Stops in place.
    pub fn abort(&mut self) {
        self.finished = true;
        self.motion = None;
    }

    /// Jumps to the final position and stops.
    pub fn force_finished(&mut self) {
        self.current = self.final_position;
        self.finished = true;
        self.motion = None;
    }
}
