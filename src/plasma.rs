//! The plasma field: superposed sinusoids sampled per LED, and the clock that drives them.
//!
//! See [`intensity`] for the field itself and [`AnimationClock`] for how time advances.

use core::f32::consts::PI;
use libm::{cosf, sinf, sqrtf};

/// Time at which the animation clock wraps back to zero (`12π`).
pub const PLASMA_PERIOD: f32 = 12.0 * PI;

/// Plasma intensity at LED `(x, y)` for animation time `t`.
///
/// Sums a bias of 4 with four sine terms (horizontal, vertical, diagonal and a radial term
/// whose center wobbles with `t`) and divides by 8, so results land roughly in `0.0..=1.0`.
/// The value is not clamped; [`crate::color`] handles anything slightly outside that range.
///
/// Single-precision `libm` trig keeps host previews identical to the FPU-less RP2040.
#[must_use]
pub fn intensity(x: f32, y: f32, t: f32) -> f32 {
    let mut value = 4.0;
    value += sinf((x - t) / 1.5);
    value += sinf((y + t) / 1.5);
    value += sinf((x - y + t) / 2.0);
    let wobble_x = x + sinf(t / 5.0) / 2.0;
    let wobble_y = y + cosf(t / 3.0) / 2.0;
    value += sinf((sqrtf(wobble_x * wobble_x + wobble_y * wobble_y + 1.0) + t) / 2.0);
    value / 8.0
}

/// Animation time `t` and the step `ti` added to it once per tick.
///
/// `t` wraps to `0.0` as soon as it reaches [`PLASMA_PERIOD`], so it never grows large
/// enough to lose precision.
///
/// # Example
///
/// ```rust
/// use picoplasma::plasma::AnimationClock;
///
/// let mut clock = AnimationClock::new(0.5);
/// clock.advance();
/// assert_eq!(clock.t(), 0.5);
/// clock.rewind(); // hold-to-pause undoes the tick's advance
/// assert_eq!(clock.t(), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationClock {
    t: f32,
    step: f32,
}

impl AnimationClock {
    /// Start at `t = 0` advancing by `step` per tick.
    #[must_use]
    pub const fn new(step: f32) -> Self {
        Self { t: 0.0, step }
    }

    /// Add one step. Returns `true` when this advance wrapped `t` back to zero.
    pub fn advance(&mut self) -> bool {
        self.t += self.step;
        if self.t >= PLASMA_PERIOD {
            self.t = 0.0;
            return true;
        }
        false
    }

    /// Subtract one step, undoing the advance of the current tick.
    ///
    /// Right after a wrap this leaves `t` at `-step`; the next [`advance`](Self::advance)
    /// brings it back to zero.
    pub fn rewind(&mut self) {
        self.t -= self.step;
    }

    /// Current animation time.
    #[must_use]
    pub const fn t(&self) -> f32 {
        self.t
    }

    /// Amount added per tick. Zero means paused.
    #[must_use]
    pub const fn step(&self) -> f32 {
        self.step
    }

    /// Change the amount added per tick. Takes effect on the next advance.
    pub const fn set_step(&mut self, step: f32) {
        self.step = step;
    }
}
