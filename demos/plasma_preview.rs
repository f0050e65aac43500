//! Render a few seconds of a plasma profile to an animated PNG.
//!
//! ```text
//! cargo run --bin plasma_preview -- [profile] [output.png] [ticks]
//! ```
//!
//! `profile` is `classic` or `marquee` (default). Button A is pressed once halfway
//! through so the preview shows a speed change.

use std::{env, error::Error, process::ExitCode};

use picoplasma::{
    button::{ButtonId, ButtonSnapshot},
    config::{self, UnicornFrame, UnicornPlayer},
    player::Pacing,
    to_png,
};
use tracing_subscriber::filter::LevelFilter;

const DEFAULT_TICKS: usize = 120;
const PREVIEW_MAX_DIMENSION: u32 = 640;
const UNCAPPED_DELAY_MS: u32 = 20;

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("plasma_preview: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let profile_name = args.next().unwrap_or_else(|| "marquee".to_owned());
    let output_path = args.next().unwrap_or_else(|| "plasma_preview.png".to_owned());
    let ticks = match args.next() {
        Some(ticks) => ticks.parse()?,
        None => DEFAULT_TICKS,
    };

    let profile = config::profile_named(&profile_name)
        .ok_or_else(|| format!("unknown profile {profile_name:?} (try classic or marquee)"))?;
    let mut player = UnicornPlayer::new(profile)?;
    let press_at = ticks / 2;
    let frames: Vec<UnicornFrame> = to_png::record_frames(&mut player, ticks, |index| {
        ButtonSnapshot::released().with(ButtonId::A, index == press_at)
    });

    let frame_delay_ms = match profile.pacing {
        Pacing::Target(period) => u32::try_from(period.as_millis())?,
        Pacing::Uncapped => UNCAPPED_DELAY_MS,
    };
    to_png::write_frames_apng(&frames, &output_path, PREVIEW_MAX_DIMENSION, frame_delay_ms)?;
    println!("wrote {} ticks of {} to {output_path}", frames.len(), profile.name);
    Ok(())
}

/// Print `log` records from the library at info level and above.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::INFO)
        .try_init();
}
