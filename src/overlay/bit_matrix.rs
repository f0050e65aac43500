//! Owned 1-bit pixel buffer backing the text overlay.
//!
//! See [`BitMatrix`] for the bit convention and scrolling behavior.

use core::convert::Infallible;

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::BinaryColor, prelude::*};

/// A 1-bit-per-pixel buffer, `H` rows tall and up to `MAX_COLUMNS` columns wide.
///
/// Bits are stored inverted: **1 is background, 0 is ink**, so a sampled bit can be
/// multiplied straight into a color channel. Each column is one `u16` mask (bit `y` is row
/// `y`), which limits `H` to 16 rows and makes a one-column scroll a single `copy_within`.
///
/// Drawing with [`embedded-graphics`](https://docs.rs/embedded-graphics) is supported:
/// [`BinaryColor::On`] lays down ink and [`BinaryColor::Off`] erases to background.
/// Pixels outside the current width are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix<const H: usize, const MAX_COLUMNS: usize> {
    columns: [u16; MAX_COLUMNS],
    width: usize,
}

impl<const H: usize, const MAX_COLUMNS: usize> BitMatrix<H, MAX_COLUMNS> {
    /// Column mask with every row set to background.
    pub const BACKGROUND_COLUMN: u16 = if H >= 16 { u16::MAX } else { (1u16 << H) - 1 };

    const HEIGHT_FITS: () = assert!(H > 0 && H <= 16, "overlay height must be 1..=16 rows");

    /// Create an empty (zero-width) matrix.
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::HEIGHT_FITS;
        Self {
            columns: [Self::BACKGROUND_COLUMN; MAX_COLUMNS],
            width: 0,
        }
    }

    /// Resize to `width` columns and fill every pixel with background.
    ///
    /// # Panics
    ///
    /// Panics if `width` exceeds `MAX_COLUMNS`.
    pub fn reset(&mut self, width: usize) {
        assert!(width <= MAX_COLUMNS, "overlay width must fit in MAX_COLUMNS");
        self.columns.fill(Self::BACKGROUND_COLUMN);
        self.width = width;
    }

    /// Current width in columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }

    /// The bit at `(x, y)`: 1 for background, 0 for ink.
    ///
    /// Any coordinate outside the matrix reads as background.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if y >= H {
            return 1;
        }
        match self.columns.get(x) {
            Some(column) if x < self.width => u8::from((column >> y) & 1 == 1),
            _ => 1,
        }
    }

    /// Lay down ink at `(x, y)`. Out-of-range coordinates are ignored.
    pub fn set_ink(&mut self, x: usize, y: usize) {
        if x < self.width && y < H {
            if let Some(column) = self.columns.get_mut(x) {
                *column &= !(1 << y);
            }
        }
    }

    /// Erase `(x, y)` back to background. Out-of-range coordinates are ignored.
    pub fn set_background(&mut self, x: usize, y: usize) {
        if x < self.width && y < H {
            if let Some(column) = self.columns.get_mut(x) {
                *column |= 1 << y;
            }
        }
    }

    /// Shift every column one pixel to the left.
    ///
    /// The leftmost column is discarded and the rightmost becomes background.
    pub fn scroll_left(&mut self) {
        let Some(visible) = self.columns.get_mut(..self.width) else {
            return;
        };
        if let Some(last) = visible.len().checked_sub(1) {
            visible.copy_within(1.., 0);
            visible[last] = Self::BACKGROUND_COLUMN;
        }
    }

    /// True when every pixel is background.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.columns
            .iter()
            .take(self.width)
            .all(|column| *column == Self::BACKGROUND_COLUMN)
    }
}

impl<const H: usize, const MAX_COLUMNS: usize> Default for BitMatrix<H, MAX_COLUMNS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const H: usize, const MAX_COLUMNS: usize> OriginDimensions for BitMatrix<H, MAX_COLUMNS> {
    #[allow(clippy::cast_possible_truncation, reason = "bounded by MAX_COLUMNS and 16 rows")]
    fn size(&self) -> Size {
        Size::new(self.width as u32, H as u32)
    }
}

impl<const H: usize, const MAX_COLUMNS: usize> DrawTarget for BitMatrix<H, MAX_COLUMNS> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let (Ok(x_index), Ok(y_index)) = (usize::try_from(coord.x), usize::try_from(coord.y))
            else {
                continue;
            };
            if color.is_on() {
                self.set_ink(x_index, y_index);
            } else {
                self.set_background(x_index, y_index);
            }
        }
        Ok(())
    }
}
