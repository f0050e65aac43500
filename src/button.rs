//! Button inputs: the four Pico Unicorn buttons behind a small polling trait.
//!
//! The player samples every button once per tick through [`ButtonInput`]. Debouncing and
//! edge detection happen in [`crate::control`], not here.
//!
//! - [`ButtonSnapshot`] is a plain in-memory state, handy for tests and host previews.
//! - `UnicornButtons` (embedded builds) reads the GPIO pins of a Pico Unicorn Pack.

#[cfg(feature = "pico1")]
use embassy_rp::{
    Peri,
    gpio::{Input, Pin, Pull},
};

// ============================================================================
// ButtonId - Which physical button
// ============================================================================

/// The four buttons of a Pico Unicorn Pack, in the order they are polled.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button A (GPIO 12).
    A,
    /// Button B (GPIO 13).
    B,
    /// Button X (GPIO 14).
    X,
    /// Button Y (GPIO 15).
    Y,
}

impl ButtonId {
    /// Every button, in polling order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::X, Self::Y];

    /// Position of this button in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::X => 2,
            Self::Y => 3,
        }
    }
}

// ============================================================================
// ButtonInput - Polling boundary
// ============================================================================

/// Anything that can report whether a button is held down right now.
pub trait ButtonInput {
    /// Returns whether `button` is currently pressed.
    fn is_pressed(&self, button: ButtonId) -> bool;
}

impl<T: ButtonInput + ?Sized> ButtonInput for &T {
    fn is_pressed(&self, button: ButtonId) -> bool {
        (**self).is_pressed(button)
    }
}

/// A fixed set of button states.
///
/// # Example
///
/// ```rust
/// use picoplasma::button::{ButtonId, ButtonInput, ButtonSnapshot};
///
/// let buttons = ButtonSnapshot::pressed(&[ButtonId::X]);
/// assert!(buttons.is_pressed(ButtonId::X));
/// assert!(!buttons.is_pressed(ButtonId::A));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSnapshot([bool; 4]);

impl ButtonSnapshot {
    /// Every button released.
    #[must_use]
    pub const fn released() -> Self {
        Self([false; 4])
    }

    /// The listed buttons held, the rest released.
    #[must_use]
    pub const fn pressed(buttons: &[ButtonId]) -> Self {
        let mut states = [false; 4];
        let mut i = 0;
        while i < buttons.len() {
            states[buttons[i].index()] = true;
            i += 1;
        }
        Self(states)
    }

    /// Copy of this snapshot with `button` set to `pressed`.
    #[must_use]
    pub const fn with(mut self, button: ButtonId, pressed: bool) -> Self {
        self.0[button.index()] = pressed;
        self
    }
}

impl ButtonInput for ButtonSnapshot {
    fn is_pressed(&self, button: ButtonId) -> bool {
        self.0[button.index()]
    }
}

// ============================================================================
// PressedTo - How the buttons are wired
// ============================================================================

/// Describes how a button is physically wired.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressedTo {
    /// Button connects pin to voltage (3.3V) when pressed.
    /// Uses internal pull-down resistor. Pin reads HIGH when pressed.
    Voltage,

    /// Button connects pin to ground (GND) when pressed.
    /// Uses internal pull-up resistor. Pin reads LOW when pressed.
    /// This is how the Pico Unicorn Pack wires its buttons.
    Ground,
}

impl PressedTo {
    /// Internal pull resistor matching this wiring.
    #[cfg(feature = "pico1")]
    const fn pull(self) -> Pull {
        match self {
            Self::Voltage => Pull::Down,
            Self::Ground => Pull::Up,
        }
    }
}

// ============================================================================
// UnicornButtons - GPIO inputs on the device
// ============================================================================

/// The four Pico Unicorn buttons read straight from GPIO.
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use picoplasma::button::{ButtonId, ButtonInput, PressedTo, UnicornButtons};
/// # #[panic_handler]
/// # fn panic(_info: &core::panic::PanicInfo) -> ! { loop {} }
///
/// fn example(p: embassy_rp::Peripherals) {
///     let buttons = UnicornButtons::new(p.PIN_12, p.PIN_13, p.PIN_14, p.PIN_15, PressedTo::Ground);
///     let _speed_pressed = buttons.is_pressed(ButtonId::A);
/// }
/// ```
#[cfg(feature = "pico1")]
pub struct UnicornButtons<'a> {
    inputs: [Input<'a>; 4],
    pressed_to: PressedTo,
}

#[cfg(feature = "pico1")]
impl<'a> UnicornButtons<'a> {
    /// Configure the pins for buttons A, B, X and Y.
    #[must_use]
    pub fn new(
        pin_a: Peri<'a, impl Pin>,
        pin_b: Peri<'a, impl Pin>,
        pin_x: Peri<'a, impl Pin>,
        pin_y: Peri<'a, impl Pin>,
        pressed_to: PressedTo,
    ) -> Self {
        let pull = pressed_to.pull();
        Self {
            inputs: [
                Input::new(pin_a, pull),
                Input::new(pin_b, pull),
                Input::new(pin_x, pull),
                Input::new(pin_y, pull),
            ],
            pressed_to,
        }
    }
}

#[cfg(feature = "pico1")]
impl ButtonInput for UnicornButtons<'_> {
    fn is_pressed(&self, button: ButtonId) -> bool {
        let input = &self.inputs[button.index()];
        match self.pressed_to {
            PressedTo::Voltage => input.is_high(),
            PressedTo::Ground => input.is_low(),
        }
    }
}
