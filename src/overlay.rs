//! Scrolling text overlay composited on top of the plasma.
//!
//! The overlay renders the active message into a [`BitMatrix`] padded with two blank glyph
//! cells in front and one behind, then scrolls it left one column per tick. A frame
//! counter drives three phases per message cycle:
//!
//! ```text
//!   fc:  -pre_roll ... 0 | 1 ... width | -(pre_roll+post_roll) ... -pre_roll-1
//!        pre-roll wait   | scrolling   | post-roll wait, then rebuild
//! ```
//!
//! The lengths of both waits come from [`ScrollTiming`].

pub mod bit_matrix;

pub use bit_matrix::BitMatrix;

use core::fmt;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_5X7},
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};

use crate::{Error, Result};

/// Number of blank glyph cells drawn before the message.
pub const LEADING_BLANK_CELLS: usize = 2;
/// Number of blank glyph cells drawn after the message.
pub const TRAILING_BLANK_CELLS: usize = 1;

/// Fixed-width glyph cells drawn with an [`embedded-graphics`](https://docs.rs/embedded-graphics)
/// monospace font.
///
/// Each glyph is centered horizontally in a cell `cell_width` pixels wide and vertically
/// in the overlay height.
#[derive(Clone, Copy)]
pub struct GlyphFont {
    font: &'static MonoFont<'static>,
    cell_width: usize,
}

impl GlyphFont {
    /// 5×7 glyphs in 8-pixel cells; fills the 7 rows of a Pico Unicorn.
    pub const UNICORN: Self = Self::new(&FONT_5X7, 8);

    /// Use `font` with glyph cells `cell_width` pixels wide.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`) if the font's glyphs are wider
    /// than `cell_width`.
    #[must_use]
    pub const fn new(font: &'static MonoFont<'static>, cell_width: usize) -> Self {
        assert!(
            font.character_size.width as usize <= cell_width,
            "glyphs must fit inside their cells"
        );
        Self { font, cell_width }
    }

    /// Width of one glyph cell in pixels.
    #[must_use]
    pub const fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// Overlay columns needed for `message`, including the blank padding cells.
    #[must_use]
    pub fn columns_for(&self, message: &str) -> usize {
        (message.chars().count() + LEADING_BLANK_CELLS + TRAILING_BLANK_CELLS) * self.cell_width
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "overlay geometry is a few hundred pixels at most"
    )]
    fn draw_glyph<const H: usize, const MAX_COLUMNS: usize>(
        &self,
        glyph: char,
        cell_index: usize,
        target: &mut BitMatrix<H, MAX_COLUMNS>,
    ) {
        let glyph_width = self.font.character_size.width as usize;
        let glyph_height = self.font.character_size.height as usize;
        let left = cell_index * self.cell_width + (self.cell_width - glyph_width) / 2;
        let top = H.saturating_sub(glyph_height) / 2;
        let position = Point::new(left as i32, (top + self.font.baseline as usize) as i32);

        let mut buf = [0u8; 4];
        let text = glyph.encode_utf8(&mut buf);
        let style = MonoTextStyle::new(self.font, BinaryColor::On);
        let Ok(_) = Text::new(text, position, style).draw(target);
    }
}

impl fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphFont")
            .field("character_size", &self.font.character_size)
            .field("cell_width", &self.cell_width)
            .finish()
    }
}

/// Lengths, in ticks, of the waits around each scroll pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollTiming {
    /// Ticks between building a bitmap and its first scroll step.
    pub pre_roll: u16,
    /// Ticks between the last scroll step and the next rebuild.
    pub post_roll: u16,
}

impl ScrollTiming {
    /// Build a timing from its two waits.
    #[must_use]
    pub const fn new(pre_roll: u16, post_roll: u16) -> Self {
        Self {
            pre_roll,
            post_roll,
        }
    }

    /// Frame counter value at which the bitmap is rebuilt (start of pre-roll).
    #[must_use]
    pub const fn rebuild_at(self) -> i32 {
        -(self.pre_roll as i32)
    }

    /// Frame counter value after a completed scroll pass (start of post-roll).
    #[must_use]
    pub const fn cool_down(self) -> i32 {
        -(self.pre_roll as i32 + self.post_roll as i32)
    }
}

/// The scrolling text mask and the frame counter that drives it.
///
/// See the [module documentation](mod@crate::overlay) for the phase diagram.
///
/// # Example
///
/// ```rust
/// use picoplasma::overlay::{GlyphFont, ScrollTiming, TextOverlay};
///
/// let mut overlay = TextOverlay::<7, 64>::new(GlyphFont::UNICORN, ScrollTiming::new(4, 4));
/// overlay.rebuild(0, "A")?;
/// assert_eq!(overlay.width(), (1 + 3) * 8);
/// assert_eq!(overlay.sample(0, 0), 1); // leading padding is background
/// # Ok::<(), picoplasma::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct TextOverlay<const H: usize, const MAX_COLUMNS: usize> {
    bitmap: BitMatrix<H, MAX_COLUMNS>,
    font: GlyphFont,
    timing: ScrollTiming,
    frame_counter: i32,
    message_index: Option<usize>,
}

impl<const H: usize, const MAX_COLUMNS: usize> TextOverlay<H, MAX_COLUMNS> {
    /// Create an overlay with an empty bitmap. The first [`advance`](Self::advance) builds it.
    #[must_use]
    pub const fn new(font: GlyphFont, timing: ScrollTiming) -> Self {
        Self {
            bitmap: BitMatrix::new(),
            font,
            timing,
            frame_counter: timing.rebuild_at(),
            message_index: None,
        }
    }

    /// Check that every message fits in `MAX_COLUMNS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMessageList`] for an empty list and [`Error::MessageTooLong`]
    /// for the first message that does not fit.
    pub fn check_messages(&self, messages: &[&str]) -> Result<()> {
        if messages.is_empty() {
            return Err(Error::EmptyMessageList);
        }
        for (index, message) in messages.iter().enumerate() {
            self.check_fits(index, message)?;
        }
        Ok(())
    }

    fn check_fits(&self, index: usize, message: &str) -> Result<usize> {
        let columns = self.font.columns_for(message);
        if columns > MAX_COLUMNS {
            return Err(Error::MessageTooLong {
                index,
                columns,
                max_columns: MAX_COLUMNS,
            });
        }
        Ok(columns)
    }

    /// Render message number `message_index` into a fresh bitmap and restart the
    /// pre-roll wait.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageTooLong`] carrying `message_index` if the padded message is
    /// wider than `MAX_COLUMNS`; the previous bitmap and message index are left untouched.
    pub fn rebuild(&mut self, message_index: usize, message: &str) -> Result<()> {
        let columns = self.check_fits(message_index, message)?;
        self.bitmap.reset(columns);
        for (glyph_index, glyph) in message.chars().enumerate() {
            self.font
                .draw_glyph(glyph, glyph_index + LEADING_BLANK_CELLS, &mut self.bitmap);
        }
        self.message_index = Some(message_index);
        self.frame_counter = self.timing.rebuild_at();
        debug!("overlay: rebuilt message {} at {} columns", message_index, columns);
        Ok(())
    }

    /// Mask bit at display coordinate `(x, y)`: 1 shows plasma, 0 shows black.
    #[must_use]
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        self.bitmap.get(x, y)
    }

    /// Move the bitmap content one column to the left.
    pub fn scroll_step(&mut self) {
        self.bitmap.scroll_left();
    }

    /// Run one tick of the scroll state machine for the active message.
    ///
    /// Rebuilds when `message_index` differs from the message on display or when the
    /// post-roll wait has run out; scrolls while the counter is in `1..=width`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageTooLong`] if a rebuild is due and the message does not fit.
    pub fn advance(&mut self, message: &str, message_index: usize) -> Result<()> {
        if self.message_index != Some(message_index)
            || self.frame_counter == self.timing.rebuild_at()
        {
            self.rebuild(message_index, message)?;
        }

        self.frame_counter += 1;
        let width = i32::try_from(self.bitmap.width()).unwrap_or(i32::MAX);
        if (1..=width).contains(&self.frame_counter) {
            self.scroll_step();
        } else if self.frame_counter > width {
            trace!("overlay: scroll pass complete");
            self.frame_counter = self.timing.cool_down();
        }
        Ok(())
    }

    /// Bitmap width in columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.bitmap.width()
    }

    /// Current frame counter (negative while waiting, `1..=width` while scrolling).
    #[must_use]
    pub const fn frame_counter(&self) -> i32 {
        self.frame_counter
    }

    /// Index of the message currently rendered, if any.
    #[must_use]
    pub const fn message_index(&self) -> Option<usize> {
        self.message_index
    }

    /// The scroll timing in use.
    #[must_use]
    pub const fn timing(&self) -> ScrollTiming {
        self.timing
    }

    /// Read-only access to the bitmap.
    #[must_use]
    pub const fn bitmap(&self) -> &BitMatrix<H, MAX_COLUMNS> {
        &self.bitmap
    }
}
