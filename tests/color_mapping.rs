#![allow(missing_docs)]
#![cfg(feature = "host")]
//! Host-level tests for intensity-to-color mapping.

use picoplasma::color::{
    ChannelOrder, ColorFamily, ColorScheme, Tint, fraction_to_channel, map, monochrome, rainbow,
    vivid_rainbow,
};
use smart_leds::RGB8;

const RED: RGB8 = RGB8::new(255, 0, 0);
const YELLOW: RGB8 = RGB8::new(255, 255, 0);
const GREEN: RGB8 = RGB8::new(0, 255, 0);
const CYAN: RGB8 = RGB8::new(0, 255, 255);
const BLUE: RGB8 = RGB8::new(0, 0, 255);
const MAGENTA: RGB8 = RGB8::new(255, 0, 255);

const SEXTANT_COLORS: [RGB8; 6] = [RED, YELLOW, GREEN, CYAN, BLUE, MAGENTA];

fn sextant_hue(index: u8) -> f32 {
    f32::from(index) / 6.0
}

#[test]
fn rainbow_sextant_boundaries_are_pure() {
    let expected: [[f32; 3]; 6] = [
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 1.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
    ];
    for (index, fractions) in (0u8..).zip(expected) {
        let actual = rainbow(sextant_hue(index));
        assert_eq!(actual.map(f32::to_bits), fractions.map(f32::to_bits), "sextant {index}");
    }
}

#[test]
fn vivid_rainbow_sextant_boundaries_are_pure() {
    for (index, color) in (0u8..).zip(SEXTANT_COLORS) {
        assert_eq!(vivid_rainbow(sextant_hue(index)), color, "sextant {index}");
    }
}

#[test]
fn rainbow_mapping_emits_pure_sextant_colors() {
    let scheme = ColorScheme::new(ColorFamily::Rainbow, Tint::Grey, ChannelOrder::Rgb);
    for (index, color) in (0u8..).zip(SEXTANT_COLORS) {
        assert_eq!(map(sextant_hue(index), scheme), color, "sextant {index}");
    }
}

#[test]
fn hue_of_one_wraps_to_red() {
    let scheme = ColorScheme::new(ColorFamily::Rainbow, Tint::Grey, ChannelOrder::Rgb);
    assert_eq!(map(1.0, scheme), RED);
    assert_eq!(vivid_rainbow(1.0), RED);
}

#[test]
fn rainbow_midpoint_of_first_sextant_is_orange() {
    // Halfway through red → yellow: green at 0.5, truncated to 127.
    assert_eq!(fraction_to_channel(rainbow(1.0 / 12.0)[1]), 127);
    // The vivid family rounds instead.
    assert_eq!(vivid_rainbow(1.0 / 12.0).g, 128);
}

#[test]
fn channel_orders_permute_cyclically() {
    let color = RGB8::new(1, 2, 3);
    assert_eq!(ChannelOrder::Rgb.apply(color), RGB8::new(1, 2, 3));
    assert_eq!(ChannelOrder::Brg.apply(color), RGB8::new(3, 1, 2));
    assert_eq!(ChannelOrder::Gbr.apply(color), RGB8::new(2, 3, 1));
}

#[test]
fn channel_order_is_a_bijection() {
    let samples = [
        RGB8::new(0, 0, 0),
        RGB8::new(255, 128, 7),
        RGB8::new(12, 200, 99),
        RGB8::new(255, 255, 255),
    ];
    for order in ChannelOrder::ALL {
        for color in samples {
            assert_eq!(order.inverse().apply(order.apply(color)), color, "{order:?}");
            assert_eq!(order.apply(order.inverse().apply(color)), color, "{order:?}");
        }
    }
}

#[test]
fn channel_order_keeps_distinct_colors_distinct() {
    let samples = [RED, GREEN, BLUE, RGB8::new(10, 20, 30)];
    for order in ChannelOrder::ALL {
        for (index, first) in samples.iter().enumerate() {
            for second in &samples[index + 1..] {
                assert_ne!(order.apply(*first), order.apply(*second));
            }
        }
    }
}

#[test]
fn monochrome_tints_scale_channels() {
    assert_eq!(monochrome(1.0, Tint::Grey), [1.0, 1.0, 1.0]);
    assert_eq!(monochrome(1.0, Tint::Warm), [1.0, 0.5, 0.25]);
    assert_eq!(monochrome(1.0, Tint::Cool), [0.5, 1.0, 0.25]);
}

#[test]
fn monochrome_mapping_truncates_channels() {
    let grey = ColorScheme::new(ColorFamily::Monochrome, Tint::Grey, ChannelOrder::Rgb);
    assert_eq!(map(0.5, grey), RGB8::new(127, 127, 127));

    let warm = ColorScheme::new(ColorFamily::Monochrome, Tint::Warm, ChannelOrder::Rgb);
    assert_eq!(map(1.0, warm), RGB8::new(255, 127, 63));
}

#[test]
fn warm_arrangement_emits_blue_red_green() {
    // Monochrome with the second arrangement: warm ramp, then (b, r, g).
    let scheme = ColorScheme::new(ColorFamily::Monochrome, Tint::Warm, ChannelOrder::Brg);
    assert_eq!(map(1.0, scheme), RGB8::new(63, 255, 127));
}

#[test]
fn fraction_to_channel_clamps_out_of_range() {
    assert_eq!(fraction_to_channel(0.0), 0);
    assert_eq!(fraction_to_channel(1.0), 255);
    assert_eq!(fraction_to_channel(1.5), 255);
    assert_eq!(fraction_to_channel(-0.2), 0);
    assert_eq!(fraction_to_channel(f32::NAN), 0);
    assert_eq!(fraction_to_channel(0.999), 254);
}
