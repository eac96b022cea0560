//! Global tilt of the composed grid and the centre crop back to output size

use image::imageops;
use image::{Rgba, RgbaImage};
use rand::Rng;
use tracing::debug;

use crate::generation::compositor::WorkingCanvas;
use crate::generation::parameters::GenerationParameters;
use crate::io::configuration::TILT_FILL;
use crate::math::rotation::{Interpolation, rotate};

/// Top-left corner of a `width` x `height` window centred in a square of side `side`
pub const fn crop_origin(side: u32, width: u32, height: u32) -> (u32, u32) {
    (
        side.saturating_sub(width) / 2,
        side.saturating_sub(height) / 2,
    )
}

/// Draw the tilt angle, turn the whole canvas in place and crop the centre window
///
/// Returns the cropped output raster together with the tilt that was applied.
pub fn tilt_and_crop<R: Rng>(
    canvas: WorkingCanvas,
    parameters: &GenerationParameters,
    rng: &mut R,
) -> (RgbaImage, f64) {
    let tilt = parameters.tilt_range.sample(rng);
    let (width, height) = parameters.canvas_size;
    let side = canvas.side();

    let rotated = rotate(
        canvas.image(),
        tilt,
        Interpolation::Bicubic,
        false,
        Rgba(TILT_FILL),
    );

    let (left, top) = crop_origin(side, width, height);
    debug!(tilt, left, top, "tilted working canvas");

    let output = imageops::crop_imm(&rotated, left, top, width, height).to_image();
    (output, tilt)
}
