#![allow(missing_docs)]
#![cfg(feature = "host")]
//! Host-level tests for the plasma field and animation clock.

use picoplasma::plasma::{AnimationClock, PLASMA_PERIOD, intensity};

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn intensity_is_deterministic() {
    for (x, y, t) in [(0.0, 0.0, 0.0), (15.0, 6.0, 3.7), (7.0, 2.0, 37.0)] {
        assert_eq!(intensity(x, y, t).to_bits(), intensity(x, y, t).to_bits());
    }
}

#[test]
fn intensity_at_origin_matches_formula() {
    // Only the radial term is non-zero: sin(sqrt(0.5^2 + 1) / 2).
    let expected = (4.0 + (1.25f32.sqrt() / 2.0).sin()) / 8.0;
    assert_close(intensity(0.0, 0.0, 0.0), expected);
}

#[test]
fn intensity_stays_in_unit_range_over_a_period() {
    let mut clock = AnimationClock::new(0.37);
    for _ in 0..110 {
        for x in 0..16u8 {
            for y in 0..7u8 {
                let value = intensity(f32::from(x), f32::from(y), clock.t());
                assert!((0.0..=1.0).contains(&value), "{value} out of range");
            }
        }
        clock.advance();
    }
}

#[test]
fn clock_stays_below_period_after_94_ticks() {
    let mut clock = AnimationClock::new(0.1);
    for _ in 0..94 {
        assert!(!clock.advance());
    }
    assert!(clock.t() < PLASMA_PERIOD);
    assert!((clock.t() - 9.4).abs() < 1e-3);
}

#[test]
fn clock_wraps_exactly_once_by_tick_377() {
    let mut clock = AnimationClock::new(0.1);
    for tick in 1..=376 {
        assert!(!clock.advance(), "wrapped early at tick {tick}");
        assert!(clock.t() < PLASMA_PERIOD);
    }
    assert!(clock.advance());
    assert!(clock.t() >= 0.0 && clock.t() < PLASMA_PERIOD);
    assert_eq!(clock.t().to_bits(), 0.0f32.to_bits());
}

#[test]
fn clock_restarts_from_zero_after_wrap() {
    let mut clock = AnimationClock::new(PLASMA_PERIOD / 2.0);
    assert!(!clock.advance());
    assert!(clock.advance());
    assert!(!clock.advance());
    assert_close(clock.t(), PLASMA_PERIOD / 2.0);
}

#[test]
fn rewind_undoes_advance() {
    let mut clock = AnimationClock::new(0.25);
    clock.advance();
    clock.advance();
    let before = clock.t();
    clock.advance();
    clock.rewind();
    assert_close(clock.t(), before);
}

#[test]
fn zero_step_holds_time() {
    let mut clock = AnimationClock::new(0.4);
    clock.advance();
    clock.set_step(0.0);
    for _ in 0..10 {
        clock.advance();
    }
    assert_close(clock.t(), 0.4);
    assert_close(clock.step(), 0.0);
}
