//! The main loop: advance time, scroll the overlay, render, read buttons.
//!
//! [`PlasmaPlayer::tick`] runs exactly one iteration and is what tests and host previews
//! drive. [`PlasmaPlayer::run`] repeats it until a [`StopSignal`] fires, paced by
//! [`Pacing`].

use embassy_futures::yield_now;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Timer};

use crate::{
    Error, Result,
    button::ButtonInput,
    config::PlasmaProfile,
    control::{ControlState, FiredActions, PauseStyle},
    led2d::DisplaySink,
    overlay::TextOverlay,
    plasma::AnimationClock,
    render,
};

/// Signal that stops [`PlasmaPlayer::run`] at the next tick boundary.
pub type StopSignal = Signal<CriticalSectionRawMutex, ()>;

/// How often [`PlasmaPlayer::run`] ticks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pacing {
    /// Tick as fast as rendering allows, yielding to other tasks between ticks.
    Uncapped,
    /// Start one tick per period. A tick that overruns starts the next one immediately.
    Target(Duration),
}

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Zero-based index of this tick.
    pub tick: u64,
    /// Animation time the frame was rendered at.
    pub t: f32,
    /// Whether the clock wrapped to zero this tick.
    pub wrapped: bool,
    /// Edge-triggered actions that fired this tick.
    pub fired: FiredActions,
}

/// A running plasma program: clock, overlay and button state.
///
/// `H` is the display height the overlay is built for and `MAX_COLUMNS` the overlay
/// bitmap capacity. See [`crate::config::UnicornPlayer`] for the Pico Unicorn sizes.
#[derive(Clone, Debug)]
pub struct PlasmaPlayer<const H: usize, const MAX_COLUMNS: usize> {
    clock: AnimationClock,
    control: ControlState,
    overlay: TextOverlay<H, MAX_COLUMNS>,
    skip_next_advance: bool,
    tick_index: u64,
}

impl<const H: usize, const MAX_COLUMNS: usize> PlasmaPlayer<H, MAX_COLUMNS> {
    /// Validate `profile` and start at `t = 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if a profile list is empty or a message does not fit in the
    /// overlay bitmap.
    pub fn new(profile: &'static PlasmaProfile) -> Result<Self> {
        let control = ControlState::new(profile)?;
        let overlay = TextOverlay::new(profile.font, profile.scroll_timing);
        overlay.check_messages(profile.messages)?;
        info!(
            "player: profile {} with {} messages",
            profile.name,
            profile.messages.len()
        );
        Ok(Self {
            clock: AnimationClock::new(control.speed_step()),
            control,
            overlay,
            skip_next_advance: false,
            tick_index: 0,
        })
    }

    /// Run one iteration of the main loop and draw the result into `sink`.
    ///
    /// Order: advance the clock (unless a skip-pause is pending), advance the overlay when
    /// it is shown, render, sample the buttons, then apply hold-to-pause and the current
    /// speed for the next tick.
    pub fn tick<S, B>(&mut self, sink: &mut S, buttons: &B) -> TickReport
    where
        S: DisplaySink + ?Sized,
        B: ButtonInput + ?Sized,
    {
        let wrapped = if self.skip_next_advance {
            self.skip_next_advance = false;
            false
        } else {
            self.clock.advance()
        };
        if wrapped {
            debug!("player: clock wrapped at tick {}", self.tick_index);
        }

        let t = self.clock.t();
        let scheme = self.control.scheme();
        if self.control.overlay_enabled() {
            if let Err(err) = self
                .overlay
                .advance(self.control.message(), self.control.message_index())
            {
                warn!("player: overlay not advanced: {}", err);
            }
            render::render_frame(sink, t, scheme, Some(&self.overlay));
        } else {
            render::render_frame(sink, t, scheme, None::<&render::NoMask>);
        }

        let fired = self.control.update(&buttons);
        if self.control.hold_pause() {
            match self.control.pause_style() {
                PauseStyle::RewindStep => self.clock.rewind(),
                PauseStyle::SkipStep => self.skip_next_advance = true,
            }
        }
        self.clock.set_step(self.control.speed_step());

        let report = TickReport {
            tick: self.tick_index,
            t,
            wrapped,
            fired,
        };
        self.tick_index += 1;
        report
    }

    /// Tick until `stop` is signaled, checking once before every tick.
    ///
    /// Returns the number of ticks run by this call. The stop signal is left set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplaySizeMismatch`] if `sink` is not `H` rows tall.
    pub async fn run<S, B>(
        &mut self,
        sink: &mut S,
        buttons: &B,
        stop: &StopSignal,
        pacing: Pacing,
    ) -> Result<u64>
    where
        S: DisplaySink + ?Sized,
        B: ButtonInput + ?Sized,
    {
        let (_, height) = sink.size();
        if height != H {
            return Err(Error::DisplaySizeMismatch {
                expected: H,
                actual: height,
            });
        }

        info!("player: running");
        let mut ticks = 0;
        let mut deadline = Instant::now();
        while !stop.signaled() {
            self.tick(sink, buttons);
            ticks += 1;
            match pacing {
                Pacing::Uncapped => yield_now().await,
                Pacing::Target(period) => {
                    deadline += period;
                    let now = Instant::now();
                    if deadline < now {
                        trace!("player: tick overran its period");
                        deadline = now;
                    }
                    Timer::at(deadline).await;
                }
            }
        }
        info!("player: stopped after {} ticks", ticks);
        Ok(ticks)
    }

    /// Current animation time.
    #[must_use]
    pub const fn t(&self) -> f32 {
        self.clock.t()
    }

    /// The animation clock.
    #[must_use]
    pub const fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Button-driven state.
    #[must_use]
    pub const fn control(&self) -> &ControlState {
        &self.control
    }

    /// The text overlay.
    #[must_use]
    pub const fn overlay(&self) -> &TextOverlay<H, MAX_COLUMNS> {
        &self.overlay
    }

    /// Number of ticks run so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_index
    }

    /// Pacing the profile asks for.
    #[must_use]
    pub const fn pacing(&self) -> Pacing {
        self.control.profile().pacing
    }
}
