//! Draw one plasma frame into a [`DisplaySink`].
//!
//! Rendering is stateless: every pixel is recomputed from `(x, y, t)` and the color
//! scheme on every call, then optionally multiplied by an overlay mask bit.

use smart_leds::RGB8;

use crate::{
    color::{self, ColorScheme},
    led2d::DisplaySink,
    overlay::{BitMatrix, TextOverlay},
    plasma,
};

/// A per-pixel mask composited over the plasma: 1 keeps the color, 0 turns the LED off.
pub trait OverlayMask {
    /// Mask bit at display coordinate `(x, y)`. Anything other than 0 keeps the color.
    fn sample(&self, x: usize, y: usize) -> u8;
}

impl<const H: usize, const MAX_COLUMNS: usize> OverlayMask for TextOverlay<H, MAX_COLUMNS> {
    fn sample(&self, x: usize, y: usize) -> u8 {
        Self::sample(self, x, y)
    }
}

impl<const H: usize, const MAX_COLUMNS: usize> OverlayMask for BitMatrix<H, MAX_COLUMNS> {
    fn sample(&self, x: usize, y: usize) -> u8 {
        self.get(x, y)
    }
}

/// Plasma color of LED `(x, y)` at time `t`, before any overlay.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "LED coordinates are tiny")]
pub fn pixel_color(x: usize, y: usize, t: f32, scheme: ColorScheme) -> RGB8 {
    color::map(plasma::intensity(x as f32, y as f32, t), scheme)
}

/// Apply one mask bit to `color`, channel by channel.
#[must_use]
pub const fn apply_mask(color: RGB8, bit: u8) -> RGB8 {
    let keep = if bit == 0 { 0 } else { 1 };
    RGB8::new(
        color.r.saturating_mul(keep),
        color.g.saturating_mul(keep),
        color.b.saturating_mul(keep),
    )
}

/// Fill every pixel of `sink` with plasma at time `t`, masked by `overlay` when given.
///
/// # Example
///
/// ```rust
/// use picoplasma::{config::MARQUEE, led2d::Frame2d, render};
///
/// let mut frame = Frame2d::<16, 7>::new();
/// render::render_frame(&mut frame, 0.0, MARQUEE.initial_scheme, None::<&render::NoMask>);
/// assert_eq!(frame[(3, 2)], render::pixel_color(3, 2, 0.0, MARQUEE.initial_scheme));
/// ```
pub fn render_frame<S, M>(sink: &mut S, t: f32, scheme: ColorScheme, overlay: Option<&M>)
where
    S: DisplaySink + ?Sized,
    M: OverlayMask + ?Sized,
{
    let (width, height) = sink.size();
    for x in 0..width {
        for y in 0..height {
            let color = pixel_color(x, y, t, scheme);
            let color = match overlay {
                Some(mask) => apply_mask(color, mask.sample(x, y)),
                None => color,
            };
            sink.set_pixel(x, y, color);
        }
    }
}

/// A mask that keeps every pixel; names the mask type when rendering without an overlay.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMask;

impl OverlayMask for NoMask {
    fn sample(&self, _x: usize, _y: usize) -> u8 {
        1
    }
}
