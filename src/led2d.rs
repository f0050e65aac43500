//! Rectangular RGB LED frames and the display boundary the renderer draws into.
//!
//! - [`Frame2d`] is an owned `W × H` frame of [`RGB8`] colors. It is also an
//!   [`embedded-graphics`](https://docs.rs/embedded-graphics) [`DrawTarget`].
//! - [`DisplaySink`] is all the renderer needs from a display: its size and a way to set
//!   one pixel.
//! - [`DrawTargetSink`] adapts any `DrawTarget<Color = Rgb888>` into a [`DisplaySink`].

// Re-export geometric types from embedded-graphics for convenience
pub use embedded_graphics::geometry::{Point, Size};

use core::{
    convert::Infallible,
    ops::{Deref, DerefMut, Index, IndexMut},
};
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};
use smart_leds::RGB8;

/// Convert RGB8 (smart-leds) to Rgb888 (embedded-graphics).
#[must_use]
pub const fn rgb8_to_rgb888(color: RGB8) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

/// Convert Rgb888 (embedded-graphics) to RGB8 (smart-leds).
#[must_use]
pub fn rgb888_to_rgb8(color: Rgb888) -> RGB8 {
    RGB8::new(color.r(), color.g(), color.b())
}

// ============================================================================
// DisplaySink - What the renderer draws into
// ============================================================================

/// A display the renderer can write to, one pixel at a time.
///
/// Writes are infallible. Implementations ignore coordinates outside [`size`](Self::size).
pub trait DisplaySink {
    /// `(width, height)` in pixels.
    fn size(&self) -> (usize, usize);

    /// Set the LED at column `x`, row `y`.
    fn set_pixel(&mut self, x: usize, y: usize, color: RGB8);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn size(&self) -> (usize, usize) {
        (**self).size()
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) {
        (**self).set_pixel(x, y, color);
    }
}

// ============================================================================
// Frame2d
// ============================================================================

/// An owned frame of LED colors, `W` columns by `H` rows, stored row-major.
///
/// Index with `(x, y)`, draw with embedded-graphics, or hand it to the renderer as a
/// [`DisplaySink`].
///
/// # Example
///
/// ```rust
/// use embedded_graphics::{
///     pixelcolor::Rgb888,
///     prelude::*,
///     primitives::{Line, PrimitiveStyle},
/// };
/// use picoplasma::led2d::Frame2d;
/// use smart_leds::RGB8;
///
/// type Frame = Frame2d<16, 7>;
///
/// let mut frame = Frame::new();
/// frame[(0, 0)] = RGB8::new(0, 255, 255);
///
/// Line::new(Frame::BOTTOM_LEFT, Frame::BOTTOM_RIGHT)
///     .into_styled(PrimitiveStyle::with_stroke(Rgb888::GREEN, 1))
///     .draw(&mut frame)
///     .expect("line draw must succeed");
///
/// assert_eq!(frame[(15, 6)], RGB8::new(0, 255, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame2d<const W: usize, const H: usize>(pub [[RGB8; W]; H]);

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "LED matrices are far smaller than i32::MAX"
)]
impl<const W: usize, const H: usize> Frame2d<W, H> {
    /// Frame2d width in pixels (columns).
    pub const WIDTH: usize = W;
    /// Frame2d height in pixels (rows).
    pub const HEIGHT: usize = H;
    /// Total number of pixels (WIDTH × HEIGHT).
    pub const LEN: usize = W * H;
    /// Frame dimensions as a [`Size`].
    pub const SIZE: Size = Size::new(W as u32, H as u32);
    /// Top-left corner coordinate as a [`Point`].
    pub const TOP_LEFT: Point = Point::new(0, 0);
    /// Bottom-left corner coordinate as a [`Point`].
    pub const BOTTOM_LEFT: Point = Point::new(0, (H - 1) as i32);
    /// Bottom-right corner coordinate as a [`Point`].
    pub const BOTTOM_RIGHT: Point = Point::new((W - 1) as i32, (H - 1) as i32);

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([[RGB8::new(0, 0, 0); W]; H])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: RGB8) -> Self {
        Self([[color; W]; H])
    }

    /// Iterate `(x, y, color)` over every pixel, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, RGB8)> + '_ {
        self.0.iter().enumerate().flat_map(|(y_index, row)| {
            row.iter()
                .enumerate()
                .map(move |(x_index, color)| (x_index, y_index, *color))
        })
    }
}

impl<const W: usize, const H: usize> Deref for Frame2d<W, H> {
    type Target = [[RGB8; W]; H];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const W: usize, const H: usize> DerefMut for Frame2d<W, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const W: usize, const H: usize> Index<(usize, usize)> for Frame2d<W, H> {
    type Output = RGB8;

    fn index(&self, (x_index, y_index): (usize, usize)) -> &Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> IndexMut<(usize, usize)> for Frame2d<W, H> {
    fn index_mut(&mut self, (x_index, y_index): (usize, usize)) -> &mut Self::Output {
        assert!(x_index < W, "x_index must be within width");
        assert!(y_index < H, "y_index must be within height");
        &mut self.0[y_index][x_index]
    }
}

impl<const W: usize, const H: usize> From<[[RGB8; W]; H]> for Frame2d<W, H> {
    fn from(array: [[RGB8; W]; H]) -> Self {
        Self(array)
    }
}

impl<const W: usize, const H: usize> From<Frame2d<W, H>> for [[RGB8; W]; H] {
    fn from(frame: Frame2d<W, H>) -> Self {
        frame.0
    }
}

impl<const W: usize, const H: usize> Default for Frame2d<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Frame2d<W, H> {
    fn size(&self) -> Size {
        Self::SIZE
    }
}

impl<const W: usize, const H: usize> DrawTarget for Frame2d<W, H> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            self.set_pixel(x_index, y_index, rgb888_to_rgb8(color));
        }
        Ok(())
    }
}

impl<const W: usize, const H: usize> DisplaySink for Frame2d<W, H> {
    fn size(&self) -> (usize, usize) {
        (W, H)
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) {
        if let Some(pixel) = self.0.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = color;
        }
    }
}

// ============================================================================
// DrawTargetSink - Any embedded-graphics display
// ============================================================================

/// Wraps an embedded-graphics [`DrawTarget`] so the renderer can draw into it.
///
/// The display's bounding box decides the size.
///
/// ```rust
/// use picoplasma::led2d::{DisplaySink, DrawTargetSink, Frame2d};
/// use smart_leds::RGB8;
///
/// let mut sink = DrawTargetSink::new(Frame2d::<4, 2>::new());
/// assert_eq!(sink.size(), (4, 2));
/// sink.set_pixel(3, 1, RGB8::new(1, 2, 3));
/// assert_eq!(sink.into_inner()[(3, 1)], RGB8::new(1, 2, 3));
/// ```
#[derive(Clone, Debug)]
pub struct DrawTargetSink<D> {
    target: D,
}

impl<D> DrawTargetSink<D>
where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    /// Wrap `target`.
    #[must_use]
    pub const fn new(target: D) -> Self {
        Self { target }
    }

    /// Borrow the wrapped display.
    #[must_use]
    pub const fn inner(&self) -> &D {
        &self.target
    }

    /// Unwrap the display.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> DisplaySink for DrawTargetSink<D>
where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    fn size(&self) -> (usize, usize) {
        let size = self.target.bounding_box().size;
        (size.width as usize, size.height as usize)
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) {
        let (width, height) = self.size();
        if x >= width || y >= height {
            return;
        }
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return;
        };
        let top_left = self.target.bounding_box().top_left;
        let pixel = Pixel(top_left + Point::new(x, y), rgb8_to_rgb888(color));
        let Ok(()) = self.target.draw_iter(core::iter::once(pixel));
    }
}
