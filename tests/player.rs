#![allow(missing_docs)]
#![cfg(feature = "host")]
//! Host-level tests for the tick loop, pause styles, rendering and the async runner.

use core::cell::Cell;
use std::time::Instant as StdInstant;

use embassy_futures::block_on;
use embassy_time::Duration;
use picoplasma::{
    Error,
    button::{ButtonId, ButtonInput, ButtonSnapshot},
    config::{CLASSIC, MARQUEE, PlasmaProfile, UnicornFrame, UnicornPlayer},
    control::PauseStyle,
    led2d::{DrawTargetSink, Frame2d},
    player::{Pacing, PlasmaPlayer, StopSignal},
    plasma::PLASMA_PERIOD,
    render::{self, NoMask},
};
use smart_leds::RGB8;

const BLACK: RGB8 = RGB8::new(0, 0, 0);

const SKIP_PAUSE: PlasmaProfile = PlasmaProfile {
    pause_style: PauseStyle::SkipStep,
    ..CLASSIC
};
const OVERSIZED_MESSAGE: PlasmaProfile = PlasmaProfile {
    messages: &["OK", "THIS ONE IS FAR TOO LONG"],
    ..MARQUEE
};

/// Releases every button and signals `stop` once `stop_after` ticks have sampled it.
struct StopAfter<'a> {
    stop: &'a StopSignal,
    stop_after: u32,
    samples: Cell<u32>,
}

impl<'a> StopAfter<'a> {
    fn new(stop: &'a StopSignal, stop_after: u32) -> Self {
        Self {
            stop,
            stop_after,
            samples: Cell::new(0),
        }
    }
}

impl ButtonInput for StopAfter<'_> {
    fn is_pressed(&self, button: ButtonId) -> bool {
        if button == ButtonId::Y {
            let ticks = self.samples.get() + 1;
            self.samples.set(ticks);
            if ticks >= self.stop_after {
                self.stop.signal(());
            }
        }
        false
    }
}

fn released() -> ButtonSnapshot {
    ButtonSnapshot::released()
}

#[test]
fn first_tick_renders_plasma_at_first_step() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&CLASSIC)?;
    let mut frame = UnicornFrame::new();
    let report = player.tick(&mut frame, &released());
    assert_eq!(report.tick, 0);
    assert!((report.t - 0.1).abs() < f32::EPSILON);

    let scheme = player.control().scheme();
    for (x, y, color) in frame.pixels() {
        assert_eq!(color, render::pixel_color(x, y, report.t, scheme), "({x}, {y})");
    }
    Ok(())
}

#[test]
fn player_clock_wraps_at_tick_377() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&CLASSIC)?;
    let mut frame = UnicornFrame::new();
    for _ in 0..94 {
        assert!(!player.tick(&mut frame, &released()).wrapped);
    }
    assert!(player.t() < PLASMA_PERIOD);

    let wraps: Vec<u64> = (94..377)
        .map(|_| player.tick(&mut frame, &released()))
        .filter(|report| report.wrapped)
        .map(|report| report.tick)
        .collect();
    assert_eq!(wraps, [376]);
    assert!(player.t() >= 0.0 && player.t() < PLASMA_PERIOD);
    assert_eq!(player.tick_count(), 377);
    Ok(())
}

#[test]
fn rewind_pause_freezes_time_while_held() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&CLASSIC)?;
    let mut frame = UnicornFrame::new();
    for _ in 0..3 {
        player.tick(&mut frame, &released());
    }
    let frozen = player.t();
    let pause = ButtonSnapshot::pressed(&[ButtonId::B]);
    for _ in 0..5 {
        let report = player.tick(&mut frame, &pause);
        // Each held tick renders one step ahead, then rewinds.
        assert!((report.t - (frozen + 0.1)).abs() < 1e-5);
        assert!((player.t() - frozen).abs() < 1e-5);
    }
    let report = player.tick(&mut frame, &released());
    assert!((report.t - (frozen + 0.1)).abs() < 1e-5);
    let report = player.tick(&mut frame, &released());
    assert!((report.t - (frozen + 0.2)).abs() < 1e-5);
    Ok(())
}

#[test]
fn skip_pause_holds_rendered_time() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&SKIP_PAUSE)?;
    let mut frame = UnicornFrame::new();
    player.tick(&mut frame, &released());
    let pause = ButtonSnapshot::pressed(&[ButtonId::B]);
    let first = player.tick(&mut frame, &pause).t;
    let second = player.tick(&mut frame, &pause).t;
    assert_eq!(first.to_bits(), second.to_bits());

    // The skip requested by the last held tick still applies once.
    let third = player.tick(&mut frame, &released()).t;
    assert_eq!(second.to_bits(), third.to_bits());
    let fourth = player.tick(&mut frame, &released()).t;
    assert!(fourth > third);
    Ok(())
}

#[test]
fn speed_change_applies_from_next_tick() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&CLASSIC)?;
    let mut frame = UnicornFrame::new();
    let first = player.tick(&mut frame, &ButtonSnapshot::pressed(&[ButtonId::A])).t;
    let second = player.tick(&mut frame, &released()).t;
    assert!((second - first - 0.2).abs() < 1e-5);
    Ok(())
}

#[test]
fn overlay_masks_plasma_until_toggled_off() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&MARQUEE)?;
    let mut frame = UnicornFrame::new();
    let mut report = player.tick(&mut frame, &released());
    for _ in 0..30 {
        report = player.tick(&mut frame, &released());
    }

    let scheme = player.control().scheme();
    let mut masked = 0;
    for (x, y, color) in frame.pixels() {
        let plasma = render::pixel_color(x, y, report.t, scheme);
        assert_ne!(plasma, BLACK, "vivid plasma is never black");
        if color == BLACK {
            masked += 1;
        } else {
            assert_eq!(color, plasma, "({x}, {y})");
        }
    }
    assert!(masked > 0, "scrolled-in glyph must mask some LEDs");

    // The toggle is read after rendering, so the next tick is the first unmasked one.
    player.tick(&mut frame, &ButtonSnapshot::pressed(&[ButtonId::X]));
    assert!(!player.control().overlay_enabled());
    let report = player.tick(&mut frame, &released());
    for (x, y, color) in frame.pixels() {
        assert_eq!(color, render::pixel_color(x, y, report.t, scheme));
    }
    Ok(())
}

#[test]
fn next_message_rebuilds_overlay() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&MARQUEE)?;
    let mut frame = UnicornFrame::new();
    player.tick(&mut frame, &released());
    assert_eq!(player.overlay().width(), (5 + 3) * 8);

    player.tick(&mut frame, &ButtonSnapshot::pressed(&[ButtonId::Y]));
    player.tick(&mut frame, &released());
    assert_eq!(player.overlay().message_index(), Some(1));
    assert_eq!(player.overlay().width(), (11 + 3) * 8);
    Ok(())
}

#[test]
fn message_too_long_for_bitmap_is_rejected() {
    let result = PlasmaPlayer::<7, 96>::new(&OVERSIZED_MESSAGE);
    assert!(matches!(
        result,
        Err(Error::MessageTooLong {
            index: 1,
            max_columns: 96,
            ..
        })
    ));
}

#[test]
fn draw_target_sink_matches_frame_rendering() {
    let scheme = MARQUEE.initial_scheme;
    let mut direct = Frame2d::<16, 7>::new();
    render::render_frame(&mut direct, 2.5, scheme, None::<&NoMask>);

    let mut sink = DrawTargetSink::new(Frame2d::<16, 7>::new());
    render::render_frame(&mut sink, 2.5, scheme, None::<&NoMask>);
    assert_eq!(sink.into_inner(), direct);
}

#[test]
fn run_stops_when_signaled() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&CLASSIC)?;
    let mut frame = UnicornFrame::new();
    let stop = StopSignal::new();
    let buttons = StopAfter::new(&stop, 5);

    let ticks = block_on(player.run(&mut frame, &buttons, &stop, Pacing::Uncapped))?;
    assert_eq!(ticks, 5);
    assert_eq!(player.tick_count(), 5);
    Ok(())
}

#[test]
fn run_with_stop_already_signaled_renders_nothing() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&CLASSIC)?;
    let mut frame = UnicornFrame::new();
    let stop = StopSignal::new();
    stop.signal(());

    let ticks = block_on(player.run(&mut frame, &released(), &stop, Pacing::Uncapped))?;
    assert_eq!(ticks, 0);
    assert_eq!(frame, UnicornFrame::new());
    Ok(())
}

#[test]
fn paced_run_waits_for_each_period() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&MARQUEE)?;
    let mut frame = UnicornFrame::new();
    let stop = StopSignal::new();
    let buttons = StopAfter::new(&stop, 3);

    let started = StdInstant::now();
    let pacing = Pacing::Target(Duration::from_millis(5));
    let ticks = block_on(player.run(&mut frame, &buttons, &stop, pacing))?;
    assert_eq!(ticks, 3);
    assert!(started.elapsed() >= std::time::Duration::from_millis(10));
    Ok(())
}

#[test]
fn run_rejects_display_of_wrong_height() -> Result<(), Error> {
    let mut player = UnicornPlayer::new(&CLASSIC)?;
    let mut frame = Frame2d::<16, 8>::new();
    let stop = StopSignal::new();

    let result = block_on(player.run(&mut frame, &released(), &stop, Pacing::Uncapped));
    assert_eq!(
        result,
        Err(Error::DisplaySizeMismatch {
            expected: 7,
            actual: 8,
        })
    );
    Ok(())
}
