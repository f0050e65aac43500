//! Map plasma intensity to LED colors.
//!
//! A [`ColorScheme`] combines three independent axes:
//! - [`ColorFamily`]: rainbow, vivid rainbow, or monochrome
//! - [`Tint`]: which monochrome ramp to use (ignored by the rainbow families)
//! - [`ChannelOrder`]: a cyclic permutation of the computed red, green and blue channels
//!
//! Buttons can step these axes one at a time or jump through a list of complete schemes;
//! see [`crate::control`].

use libm::{floorf, roundf, truncf};
use smart_leds::RGB8;

/// Which color computation turns intensity into a base color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorFamily {
    /// Intensity is a hue; channels are computed as fractions and truncated to `u8`.
    Rainbow,
    /// Same sextants as [`Rainbow`](Self::Rainbow), with the lead channel pinned at 255 and
    /// ramps rounded to the nearest step.
    VividRainbow,
    /// Intensity is a brightness, shaded by the scheme's [`Tint`].
    Monochrome,
}

/// Monochrome ramps, as ratios of red, green and blue to the intensity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tint {
    /// `(v, v, v)`
    Grey,
    /// `(v, v/2, v/4)`
    Warm,
    /// `(v/2, v, v/4)`
    Cool,
}

impl Tint {
    /// Every tint, in button-cycle order.
    pub const ALL: [Self; 3] = [Self::Grey, Self::Warm, Self::Cool];
}

/// Cyclic permutation applied to a computed color before it is emitted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// Identity.
    Rgb,
    /// Emits `(b, r, g)`.
    Brg,
    /// Emits `(g, b, r)`.
    Gbr,
}

impl ChannelOrder {
    /// Every channel order, in button-cycle order.
    pub const ALL: [Self; 3] = [Self::Rgb, Self::Brg, Self::Gbr];

    /// Permute the channels of `color`.
    #[must_use]
    pub const fn apply(self, color: RGB8) -> RGB8 {
        match self {
            Self::Rgb => color,
            Self::Brg => RGB8::new(color.b, color.r, color.g),
            Self::Gbr => RGB8::new(color.g, color.b, color.r),
        }
    }

    /// The order that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Rgb => Self::Rgb,
            Self::Brg => Self::Gbr,
            Self::Gbr => Self::Brg,
        }
    }
}

/// A complete color selection: family, monochrome tint and channel order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorScheme {
    /// Base color computation.
    pub family: ColorFamily,
    /// Monochrome ramp; only read when `family` is [`ColorFamily::Monochrome`].
    pub tint: Tint,
    /// Channel permutation applied last.
    pub order: ChannelOrder,
}

impl ColorScheme {
    /// Build a scheme from its three axes.
    #[must_use]
    pub const fn new(family: ColorFamily, tint: Tint, order: ChannelOrder) -> Self {
        Self {
            family,
            tint,
            order,
        }
    }
}

/// Split a hue into its sextant (`0..6`) and the falling ramp `1 - fraction` within it.
///
/// `floor` keeps the split well-defined for hues outside `0.0..1.0`.
fn sextant(hue: f32) -> (i32, f32) {
    let scaled = hue * 6.0;
    let floor = floorf(scaled);
    #[allow(clippy::cast_possible_truncation, reason = "floor of a small hue")]
    let sextant = (floor as i32).rem_euclid(6);
    (sextant, 1.0 - (scaled - floor))
}

/// Simplified HSV-to-RGB with full saturation and value, as `[r, g, b]` fractions.
///
/// Red → yellow → green → cyan → blue → magenta → red as `hue` goes from 0 to 1.
#[must_use]
pub fn rainbow(hue: f32) -> [f32; 3] {
    let (sextant, falling) = sextant(hue);
    let rising = 1.0 - falling;
    match sextant {
        0 => [1.0, rising, 0.0],
        1 => [falling, 1.0, 0.0],
        2 => [0.0, 1.0, rising],
        3 => [0.0, falling, 1.0],
        4 => [rising, 0.0, 1.0],
        _ => [1.0, 0.0, falling],
    }
}

/// Rainbow computed directly in `u8` with the lead channel pinned at 255.
#[must_use]
pub fn vivid_rainbow(hue: f32) -> RGB8 {
    let (sextant, falling) = sextant(hue);
    let down = ramp_to_channel(falling);
    let up = ramp_to_channel(1.0 - falling);
    match sextant {
        0 => RGB8::new(255, up, 0),
        1 => RGB8::new(down, 255, 0),
        2 => RGB8::new(0, 255, up),
        3 => RGB8::new(0, down, 255),
        4 => RGB8::new(up, 0, 255),
        _ => RGB8::new(255, 0, down),
    }
}

/// Monochrome ramp for `value` as `[r, g, b]` fractions.
#[must_use]
pub fn monochrome(value: f32, tint: Tint) -> [f32; 3] {
    match tint {
        Tint::Grey => [value, value, value],
        Tint::Warm => [value, value / 2.0, value / 4.0],
        Tint::Cool => [value / 2.0, value, value / 4.0],
    }
}

/// Scale a `0.0..=1.0` fraction to a channel, truncating toward zero.
///
/// Out-of-range inputs are clamped to `0..=255`; NaN becomes 0.
#[must_use]
pub fn fraction_to_channel(fraction: f32) -> u8 {
    clamp_to_channel(truncf(fraction * 255.0))
}

fn ramp_to_channel(fraction: f32) -> u8 {
    clamp_to_channel(roundf(fraction * 255.0))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to 0..=255 first"
)]
fn clamp_to_channel(scaled: f32) -> u8 {
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

/// Convert `[r, g, b]` fractions to an LED color.
#[must_use]
pub fn fractions_to_rgb8([red, green, blue]: [f32; 3]) -> RGB8 {
    RGB8::new(
        fraction_to_channel(red),
        fraction_to_channel(green),
        fraction_to_channel(blue),
    )
}

/// Color for plasma intensity `value` under `scheme`.
#[must_use]
pub fn map(value: f32, scheme: ColorScheme) -> RGB8 {
    let base = match scheme.family {
        ColorFamily::Rainbow => fractions_to_rgb8(rainbow(value)),
        ColorFamily::VividRainbow => vivid_rainbow(value),
        ColorFamily::Monochrome => fractions_to_rgb8(monochrome(value, scheme.tint)),
    };
    scheme.order.apply(base)
}
