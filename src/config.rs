//! Compiled-in profiles: button bindings, speeds, colors, messages and timings.
//!
//! Two presets ship with the crate:
//! - [`CLASSIC`]: the original Pico Unicorn plasma. A cycles speed, B holds to pause, X
//!   toggles rainbow/monochrome, Y cycles the channel arrangement. No text.
//! - [`MARQUEE`]: plasma with a scrolling text overlay. A cycles speed (including a
//!   stopped step), B cycles complete color schemes, X toggles the overlay, Y steps to
//!   the next message.
//!
//! Profiles are plain `const` data; [`crate::player::PlasmaPlayer::new`] validates them.

use embassy_time::Duration;

use crate::{
    color::{ChannelOrder, ColorFamily, ColorScheme, Tint},
    control::{ButtonAction, ButtonBindings, PauseStyle},
    led2d::Frame2d,
    overlay::{GlyphFont, ScrollTiming},
    player::{Pacing, PlasmaPlayer},
};

/// Pico Unicorn columns.
pub const UNICORN_WIDTH: usize = 16;
/// Pico Unicorn rows.
pub const UNICORN_HEIGHT: usize = 7;
/// Overlay bitmap capacity in columns: 29 glyphs plus padding at 8 pixels per cell.
pub const OVERLAY_MAX_COLUMNS: usize = 256;

/// A frame buffer the size of a Pico Unicorn.
pub type UnicornFrame = Frame2d<UNICORN_WIDTH, UNICORN_HEIGHT>;
/// A player sized for a Pico Unicorn.
pub type UnicornPlayer = PlasmaPlayer<UNICORN_HEIGHT, OVERLAY_MAX_COLUMNS>;

/// Everything that distinguishes one plasma program from another.
#[derive(Clone, Copy, Debug)]
pub struct PlasmaProfile {
    /// Name shown in logs.
    pub name: &'static str,
    /// Time steps cycled by [`ButtonAction::CycleSpeed`]; the first is the initial speed.
    pub speed_steps: &'static [f32],
    /// Action bound to each button.
    pub bindings: ButtonBindings,
    /// How [`ButtonAction::HoldToPause`] stops time.
    pub pause_style: PauseStyle,
    /// Families cycled by [`ButtonAction::ToggleColorFamily`].
    pub family_cycle: &'static [ColorFamily],
    /// Complete schemes cycled by [`ButtonAction::CycleColorScheme`].
    pub scheme_cycle: &'static [ColorScheme],
    /// Scheme in effect at start-up.
    pub initial_scheme: ColorScheme,
    /// Overlay messages; the first is shown first.
    pub messages: &'static [&'static str],
    /// Whether the overlay is visible at start-up.
    pub overlay_enabled: bool,
    /// Waits around each scroll pass.
    pub scroll_timing: ScrollTiming,
    /// Glyphs used to render messages.
    pub font: GlyphFont,
    /// How fast [`PlasmaPlayer::run`] ticks.
    pub pacing: Pacing,
}

const RGB_RAINBOW: ColorScheme =
    ColorScheme::new(ColorFamily::Rainbow, Tint::Grey, ChannelOrder::Rgb);

/// Three speeds of plasma with hold-to-pause, no text.
pub const CLASSIC: PlasmaProfile = PlasmaProfile {
    name: "classic",
    speed_steps: &[0.1, 0.2, 0.4],
    bindings: ButtonBindings {
        a: ButtonAction::CycleSpeed,
        b: ButtonAction::HoldToPause,
        x: ButtonAction::ToggleColorFamily,
        y: ButtonAction::CycleArrangement,
    },
    pause_style: PauseStyle::RewindStep,
    family_cycle: &[ColorFamily::Rainbow, ColorFamily::Monochrome],
    scheme_cycle: &[RGB_RAINBOW],
    initial_scheme: RGB_RAINBOW,
    messages: &["PicoPlasma"],
    overlay_enabled: false,
    scroll_timing: ScrollTiming::new(16, 48),
    font: GlyphFont::UNICORN,
    pacing: Pacing::Uncapped,
};

/// Plasma behind scrolling messages.
pub const MARQUEE: PlasmaProfile = PlasmaProfile {
    name: "marquee",
    speed_steps: &[0.1, 0.2, 0.4, 0.0],
    bindings: ButtonBindings {
        a: ButtonAction::CycleSpeed,
        b: ButtonAction::CycleColorScheme,
        x: ButtonAction::ToggleOverlay,
        y: ButtonAction::NextMessage,
    },
    pause_style: PauseStyle::SkipStep,
    family_cycle: &[
        ColorFamily::Rainbow,
        ColorFamily::VividRainbow,
        ColorFamily::Monochrome,
    ],
    scheme_cycle: &[
        ColorScheme::new(ColorFamily::VividRainbow, Tint::Grey, ChannelOrder::Rgb),
        ColorScheme::new(ColorFamily::VividRainbow, Tint::Grey, ChannelOrder::Brg),
        ColorScheme::new(ColorFamily::Rainbow, Tint::Grey, ChannelOrder::Gbr),
        ColorScheme::new(ColorFamily::Monochrome, Tint::Grey, ChannelOrder::Rgb),
        ColorScheme::new(ColorFamily::Monochrome, Tint::Warm, ChannelOrder::Rgb),
        ColorScheme::new(ColorFamily::Monochrome, Tint::Cool, ChannelOrder::Rgb),
    ],
    initial_scheme: ColorScheme::new(ColorFamily::VividRainbow, Tint::Grey, ChannelOrder::Rgb),
    messages: &["HELLO", "PICO PLASMA", "RUST"],
    overlay_enabled: true,
    scroll_timing: ScrollTiming::new(8, 24),
    font: GlyphFont::UNICORN,
    pacing: Pacing::Target(Duration::from_millis(33)),
};

/// Every compiled-in profile.
pub const PROFILES: [&PlasmaProfile; 2] = [&CLASSIC, &MARQUEE];

/// Look up a compiled-in profile by name.
#[must_use]
pub fn profile_named(name: &str) -> Option<&'static PlasmaProfile> {
    PROFILES.into_iter().find(|profile| profile.name == name)
}
