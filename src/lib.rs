//! Animated plasma field with a scrolling text overlay for small RGB LED matrices.
//!
//! The reference hardware is a Raspberry Pi Pico with a Pimoroni Pico Unicorn Pack
//! (16×7 RGB LEDs, four buttons). Everything that touches hardware sits behind the
//! [`led2d::DisplaySink`] and [`button::ButtonInput`] traits, so the same
//! [`player::PlasmaPlayer`] runs on the device and on a development machine.
//!
//! # Glossary
//!
//! - **Tick:** one iteration of the main loop: one full grid render plus one round of
//!   button sampling.
//! - **Intensity:** the scalar plasma field value before color mapping, roughly `0.0..=1.0`.
//! - **Sextant:** one of six equal hue subdivisions used by the rainbow color mapping.
//! - **Arrangement:** the joint channel-order and monochrome-tint selector cycled by a button.
//! - **Overlay bitmap:** the 1-bit scrolling text mask composited against plasma colors.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "host")]
//! # fn main() -> picoplasma::Result<()> {
//! use picoplasma::{button::ButtonSnapshot, config::MARQUEE, led2d::Frame2d, player::PlasmaPlayer};
//!
//! let mut player = PlasmaPlayer::<7, 256>::new(&MARQUEE)?;
//! let mut frame = Frame2d::<16, 7>::new();
//! player.tick(&mut frame, &ButtonSnapshot::released());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "host"))]
//! # fn main() {}
//! ```
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]

// Compile-time checks: a board must be selected (unless testing with host feature)
#[cfg(all(not(feature = "pico1"), not(feature = "host")))]
compile_error!("Must enable the 'embedded' (pico1) feature or the 'host' feature");

#[cfg(all(feature = "pico1", feature = "host"))]
compile_error!("Cannot enable both 'pico1' and 'host' features simultaneously");

// Must come first so the logging macros are visible to the modules below.
#[macro_use]
mod fmt;

pub mod button;
pub mod color;
pub mod config;
pub mod control;
mod error;
pub mod led2d;
pub mod overlay;
pub mod player;
pub mod plasma;
pub mod render;
#[cfg(feature = "host")]
pub mod to_png;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
