//! Button-driven control state: speed, colors, overlay visibility and active message.
//!
//! Each of the four buttons is bound to a [`ButtonAction`] by the active profile (see
//! [`crate::config`]). Most actions are edge-triggered through a [`Debounce`] latch and fire
//! once per press, no matter how long the button is held. [`ButtonAction::HoldToPause`]
//! is level-triggered instead: it freezes time on every tick the button is down.

use heapless::Vec;

use crate::{
    Error, Result,
    button::{ButtonId, ButtonInput},
    color::{ChannelOrder, ColorScheme, Tint},
    config::PlasmaProfile,
};

// ============================================================================
// ButtonAction - What a button does
// ============================================================================

/// What pressing a button does.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    /// Step to the next animation speed, wrapping (a zero step pauses).
    CycleSpeed,
    /// Freeze time while held.
    HoldToPause,
    /// Step to the next color family in the profile's family cycle, keeping the arrangement.
    ToggleColorFamily,
    /// Step channel order and monochrome tint together (`Rgb`/`Grey`, `Brg`/`Warm`, `Gbr`/`Cool`).
    CycleArrangement,
    /// Jump to the next complete scheme in the profile's scheme cycle.
    CycleColorScheme,
    /// Show or hide the text overlay.
    ToggleOverlay,
    /// Step to the next message, wrapping to the first.
    NextMessage,
}

/// How [`ButtonAction::HoldToPause`] stops time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PauseStyle {
    /// Subtract the step again after rendering, undoing this tick's advance.
    RewindStep,
    /// Leave `t` alone now and skip the next tick's advance.
    SkipStep,
}

/// The action bound to each button.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBindings {
    /// Action for button A.
    pub a: ButtonAction,
    /// Action for button B.
    pub b: ButtonAction,
    /// Action for button X.
    pub x: ButtonAction,
    /// Action for button Y.
    pub y: ButtonAction,
}

impl ButtonBindings {
    /// The action bound to `button`.
    #[must_use]
    pub const fn action(&self, button: ButtonId) -> ButtonAction {
        match button {
            ButtonId::A => self.a,
            ButtonId::B => self.b,
            ButtonId::X => self.x,
            ButtonId::Y => self.y,
        }
    }
}

// ============================================================================
// Debounce - Edge detection latch
// ============================================================================

/// Per-button latch that turns a held level into a single edge.
///
/// # Example
///
/// ```rust
/// use picoplasma::control::Debounce;
///
/// let mut debounce = Debounce::new();
/// assert!(debounce.fire(true)); // press
/// assert!(!debounce.fire(true)); // still held
/// assert!(!debounce.fire(false)); // release
/// assert!(debounce.fire(true)); // next press
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debounce {
    latched: bool,
}

impl Debounce {
    /// A released latch.
    #[must_use]
    pub const fn new() -> Self {
        Self { latched: false }
    }

    /// Feed one sample. Returns `true` only on the first pressed sample after a release.
    pub const fn fire(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }

    /// Whether the button is being held after having fired.
    #[must_use]
    pub const fn is_latched(&self) -> bool {
        self.latched
    }
}

// ============================================================================
// ControlState
// ============================================================================

/// Actions fired by one [`ControlState::update`], at most one per button.
pub type FiredActions = Vec<ButtonAction, 4>;

/// Everything the buttons can change, plus one debounce latch per button.
#[derive(Clone, Debug)]
pub struct ControlState {
    profile: &'static PlasmaProfile,
    latches: [Debounce; 4],
    speed_index: usize,
    hold_pause: bool,
    overlay_enabled: bool,
    scheme: ColorScheme,
    family_index: usize,
    arrangement_index: usize,
    scheme_index: usize,
    message_index: usize,
}

impl ControlState {
    /// Start from the profile's initial settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile's speed list, message list or a color cycle
    /// is empty.
    pub fn new(profile: &'static PlasmaProfile) -> Result<Self> {
        if profile.speed_steps.is_empty() {
            return Err(Error::EmptySpeedList);
        }
        if profile.messages.is_empty() {
            return Err(Error::EmptyMessageList);
        }
        if profile.family_cycle.is_empty() || profile.scheme_cycle.is_empty() {
            return Err(Error::EmptyColorCycle);
        }

        let scheme = profile.initial_scheme;
        Ok(Self {
            profile,
            latches: [Debounce::new(); 4],
            speed_index: 0,
            hold_pause: false,
            overlay_enabled: profile.overlay_enabled,
            scheme,
            family_index: position_or_zero(profile.family_cycle, |family| {
                *family == scheme.family
            }),
            arrangement_index: position_or_zero(&ChannelOrder::ALL, |order| *order == scheme.order),
            scheme_index: position_or_zero(profile.scheme_cycle, |candidate| *candidate == scheme),
            message_index: 0,
        })
    }

    /// Sample every button once and apply the actions that fire.
    ///
    /// Returns the edge-triggered actions that fired this tick. Hold-to-pause is reported
    /// through [`hold_pause`](Self::hold_pause) instead.
    pub fn update(&mut self, buttons: &impl ButtonInput) -> FiredActions {
        let mut fired = FiredActions::new();
        self.hold_pause = false;
        for button in ButtonId::ALL {
            let action = self.profile.bindings.action(button);
            let pressed = buttons.is_pressed(button);
            let edge = self.latches[button.index()].fire(pressed);
            if action == ButtonAction::HoldToPause {
                self.hold_pause |= pressed;
                continue;
            }
            if edge {
                self.apply(action);
                // One action per button, so this never exceeds the capacity of 4.
                let _ = fired.push(action);
            }
        }
        fired
    }

    /// Apply `action` immediately, bypassing the buttons.
    pub fn apply(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::CycleSpeed => {
                self.speed_index = next_index(self.speed_index, self.profile.speed_steps.len());
                info!("control: speed step {}", self.speed_step());
            }
            ButtonAction::HoldToPause => self.hold_pause = true,
            ButtonAction::ToggleColorFamily => {
                let cycle = self.profile.family_cycle;
                self.family_index = next_index(self.family_index, cycle.len());
                if let Some(family) = cycle.get(self.family_index) {
                    self.scheme.family = *family;
                }
                info!("control: color family {:?}", self.scheme.family);
            }
            ButtonAction::CycleArrangement => {
                self.arrangement_index = next_index(self.arrangement_index, ChannelOrder::ALL.len());
                self.scheme.order = ChannelOrder::ALL[self.arrangement_index];
                self.scheme.tint = Tint::ALL[self.arrangement_index];
                info!("control: arrangement {:?}", self.scheme.order);
            }
            ButtonAction::CycleColorScheme => {
                let cycle = self.profile.scheme_cycle;
                self.scheme_index = next_index(self.scheme_index, cycle.len());
                if let Some(scheme) = cycle.get(self.scheme_index) {
                    self.scheme = *scheme;
                }
                info!("control: color scheme {:?}", self.scheme);
            }
            ButtonAction::ToggleOverlay => {
                self.overlay_enabled = !self.overlay_enabled;
                info!("control: overlay {}", self.overlay_enabled);
            }
            ButtonAction::NextMessage => {
                self.message_index = next_index(self.message_index, self.profile.messages.len());
                info!("control: message {}", self.message_index);
            }
        }
    }

    /// Current per-tick time step (zero when paused by the speed cycle).
    #[must_use]
    pub fn speed_step(&self) -> f32 {
        self.profile
            .speed_steps
            .get(self.speed_index)
            .copied()
            .unwrap_or_default()
    }

    /// Whether a hold-to-pause button was down on the last update.
    #[must_use]
    pub const fn hold_pause(&self) -> bool {
        self.hold_pause
    }

    /// How hold-to-pause stops time under this profile.
    #[must_use]
    pub const fn pause_style(&self) -> PauseStyle {
        self.profile.pause_style
    }

    /// Whether the text overlay is shown.
    #[must_use]
    pub const fn overlay_enabled(&self) -> bool {
        self.overlay_enabled
    }

    /// Active color scheme.
    #[must_use]
    pub const fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    /// Index of the active message.
    #[must_use]
    pub const fn message_index(&self) -> usize {
        self.message_index
    }

    /// Text of the active message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.profile
            .messages
            .get(self.message_index)
            .copied()
            .unwrap_or_default()
    }

    /// Debounce latch of `button`.
    #[must_use]
    pub const fn latch(&self, button: ButtonId) -> Debounce {
        self.latches[button.index()]
    }

    /// The profile this state was built from.
    #[must_use]
    pub const fn profile(&self) -> &'static PlasmaProfile {
        self.profile
    }
}

const fn next_index(index: usize, len: usize) -> usize {
    if index + 1 >= len { 0 } else { index + 1 }
}

fn position_or_zero<T>(items: &[T], matches: impl FnMut(&T) -> bool) -> usize {
    items.iter().position(matches).unwrap_or_default()
}
