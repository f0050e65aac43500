//! Host-only previews: write rendered frames to PNG and animated PNG files.
//!
//! Each LED is drawn as a soft-edged disc on a black background so previews look like the
//! physical matrix. [`record_frames`] drives a [`PlasmaPlayer`] to produce the frames.

use std::{error::Error, fs::File, io::BufWriter, path::Path};

use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::{button::ButtonInput, led2d::Frame2d, player::PlasmaPlayer};

/// Gamma used to brighten dim LED values for on-screen viewing.
const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Result type of the preview writers.
pub type PreviewResult<T = ()> = core::result::Result<T, Box<dyn Error>>;

/// Write `frame` as a PNG whose longer side is at most `target_max_dimension` pixels.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded, or if
/// `target_max_dimension` is too small to draw a single LED.
pub fn write_frame_png<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> PreviewResult {
    let output_path = output_path.as_ref();
    let geometry = PanelGeometry::fit::<W, H>(target_max_dimension)?;
    let pixels = geometry.pixels(frame);

    let mut encoder = encoder_for(output_path, &geometry)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    info!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Write `frames` as a looping APNG, showing each frame for `frame_delay_ms`.
///
/// # Errors
///
/// Returns an error if `frames` is empty, the delay is zero or above `u16::MAX`, or the
/// file cannot be created or encoded.
pub fn write_frames_apng<const W: usize, const H: usize>(
    frames: &[Frame2d<W, H>],
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    frame_delay_ms: u32,
) -> PreviewResult {
    if frames.is_empty() {
        return Err("an animation needs at least one frame".into());
    }
    let delay_num = u16::try_from(frame_delay_ms)?;
    if delay_num == 0 {
        return Err("frame delay must be positive".into());
    }
    let output_path = output_path.as_ref();
    let geometry = PanelGeometry::fit::<W, H>(target_max_dimension)?;

    let mut encoder = encoder_for(output_path, &geometry)?;
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    encoder.set_animated(u32::try_from(frames.len())?, 0)?;
    let mut writer = encoder.write_header()?;
    for frame in frames {
        writer.set_frame_delay(delay_num, 1000)?;
        writer.write_image_data(&geometry.pixels(frame))?;
    }
    writer.finish()?;
    info!(
        "wrote {} frame APNG to {}",
        frames.len(),
        output_path.display()
    );
    Ok(())
}

/// Run `frame_count` ticks of `player` with `buttons` and collect every rendered frame.
///
/// `buttons` is called with the tick index so a preview can script presses.
pub fn record_frames<const W: usize, const H: usize, const MAX_COLUMNS: usize, B>(
    player: &mut PlasmaPlayer<H, MAX_COLUMNS>,
    frame_count: usize,
    mut buttons: impl FnMut(usize) -> B,
) -> Vec<Frame2d<W, H>>
where
    B: ButtonInput,
{
    (0..frame_count)
        .map(|index| {
            let mut frame = Frame2d::new();
            player.tick(&mut frame, &buttons(index));
            frame
        })
        .collect()
}

fn encoder_for(
    output_path: &Path,
    geometry: &PanelGeometry,
) -> PreviewResult<Encoder<'static, BufWriter<File>>> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), geometry.width, geometry.height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    Ok(encoder)
}

/// Pixel layout of a preview image: square cells, one LED disc per cell, and a border.
#[derive(Clone, Copy, Debug)]
struct PanelGeometry {
    columns: usize,
    rows: usize,
    cell_size: u32,
    led_radius: u32,
    border: u32,
    width: u32,
    height: u32,
}

impl PanelGeometry {
    /// Largest cell size whose image fits inside `target_max_dimension`.
    fn fit<const W: usize, const H: usize>(target_max_dimension: u32) -> PreviewResult<Self> {
        let columns = u32::try_from(W)?;
        let rows = u32::try_from(H)?;
        let mut cell_size = target_max_dimension;
        while cell_size >= 4 {
            let geometry = Self::with_cell_size(columns, rows, cell_size);
            if geometry.width.max(geometry.height) <= target_max_dimension {
                return Ok(geometry);
            }
            cell_size -= 1;
        }
        Err(format!(
            "{} pixels is too small for a {}x{} preview",
            target_max_dimension, W, H
        )
        .into())
    }

    fn with_cell_size(columns: u32, rows: u32, cell_size: u32) -> Self {
        let led_margin = (cell_size / 8).max(1);
        let led_radius = (cell_size - led_margin * 2) / 2;
        let border = led_radius;
        Self {
            columns: columns as usize,
            rows: rows as usize,
            cell_size,
            led_radius,
            border,
            width: columns * cell_size + border * 2,
            height: rows * cell_size + border * 2,
        }
    }

    /// RGB8 image bytes for `frame`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "preview geometry is a few thousand pixels at most"
    )]
    fn pixels<const W: usize, const H: usize>(&self, frame: &Frame2d<W, H>) -> Vec<u8> {
        let row_stride = self.width as usize * 3;
        let mut bytes = vec![0u8; row_stride * self.height as usize];
        let center = (self.cell_size as f32 - 1.0) / 2.0;
        let radius = self.led_radius as f32;
        let fade_start = radius * 2.0 / 3.0;

        let visible = frame
            .pixels()
            .filter(|(x, y, _)| *x < self.columns && *y < self.rows);
        for (column, row, color) in visible {
            let origin_x = self.border as usize + column * self.cell_size as usize;
            let origin_y = self.border as usize + row * self.cell_size as usize;
            let linear = [color.r, color.g, color.b].map(preview_brightness);
            for local_y in 0..self.cell_size as usize {
                for local_x in 0..self.cell_size as usize {
                    let delta_x = local_x as f32 - center;
                    let delta_y = local_y as f32 - center;
                    let distance = (delta_x * delta_x + delta_y * delta_y).sqrt();
                    if distance > radius {
                        continue;
                    }
                    let falloff = if distance <= fade_start {
                        1.0
                    } else {
                        1.0 - (distance - fade_start) / (radius - fade_start)
                    };
                    let index = (origin_y + local_y) * row_stride + (origin_x + local_x) * 3;
                    for (offset, channel) in linear.iter().enumerate() {
                        bytes[index + offset] =
                            (channel * falloff * 255.0).round().clamp(0.0, 255.0) as u8;
                    }
                }
            }
        }
        bytes
    }
}

fn preview_brightness(channel: u8) -> f32 {
    (f32::from(channel) / 255.0).powf(1.0 / PREVIEW_INVERSE_GAMMA)
}
