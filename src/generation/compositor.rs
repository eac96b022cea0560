//! Grid compositing of jittered sprite instances onto an oversized working canvas
//!
//! The working canvas is a square whose side is the diagonal of the requested
//! output, so any rotation of it still covers the centred output window. Grid
//! rows start one sprite above and columns one sprite left of the canvas origin,
//! guaranteeing that instances overlap every canvas edge.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rand::Rng;
use tracing::debug;

use crate::generation::parameters::GenerationParameters;
use crate::generation::resolver::ResolvedBase;
use crate::io::configuration::{BACKGROUND_FILL, MAX_SPRITE_DIMENSION, SPRITE_FILL};
use crate::io::error::{Result, invalid_parameter};
use crate::math::rotation::{Interpolation, rotate};

/// Side of the square working canvas for a `width` x `height` output
pub fn working_canvas_side(width: u32, height: u32) -> u32 {
    f64::from(width).hypot(f64::from(height)).ceil() as u32
}

/// Transforms drawn for one grid cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    /// Left edge of the pasted sprite on the working canvas
    pub x: i64,
    /// Top edge of the pasted sprite on the working canvas
    pub y: i64,
    /// Scale relative to the source sprite
    pub scale: f64,
    /// Counter-clockwise rotation in degrees
    pub angle: f64,
}

impl InstanceTransform {
    /// Draw position jitter (x then y), scale multiplier, then angle jitter for cell `(x, y)`
    pub fn draw<R: Rng>(
        cell: (i64, i64),
        base: &ResolvedBase,
        parameters: &GenerationParameters,
        rng: &mut R,
    ) -> Self {
        let jitter_x = parameters.position_jitter_range.sample(rng);
        let jitter_y = parameters.position_jitter_range.sample(rng);
        let scale = base.base_scale * parameters.scale_jitter_range.sample(rng);
        let angle = base.base_angle + parameters.angle_jitter_range.sample(rng);

        Self {
            x: cell.0 + i64::from(jitter_x),
            y: cell.1 + i64::from(jitter_y),
            scale,
            angle,
        }
    }
}

/// Square raster that grid instances are pasted onto
#[derive(Clone, Debug)]
pub struct WorkingCanvas {
    image: RgbaImage,
}

impl WorkingCanvas {
    /// Opaque canvas of the given side filled with the background colour
    pub fn new(side: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(side, side, Rgba(BACKGROUND_FILL)),
        }
    }

    /// Side length in pixels
    pub fn side(&self) -> u32 {
        self.image.width()
    }

    /// Borrow the raster
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Paste `sprite` with its top-left corner at `(x, y)`, masked by its alpha
    pub fn paste(&mut self, sprite: &RgbaImage, x: i64, y: i64) {
        paste_masked(&mut self.image, sprite, x, y);
    }
}

/// Paste `sprite` onto an opaque `canvas` using the sprite's alpha as the mask
///
/// Alpha 255 replaces, alpha 0 leaves the canvas untouched and partial alpha blends
/// the colour channels. The canvas stays opaque. Parts outside the canvas are clipped.
pub fn paste_masked(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i64, y: i64) {
    let canvas_width = i64::from(canvas.width());
    let canvas_height = i64::from(canvas.height());

    for (sx, sy, source) in sprite.enumerate_pixels() {
        let alpha = source.0[3];
        if alpha == 0 {
            continue;
        }

        let tx = x + i64::from(sx);
        let ty = y + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= canvas_width || ty >= canvas_height {
            continue;
        }

        let target = canvas.get_pixel_mut(tx as u32, ty as u32);
        if alpha == u8::MAX {
            target.0 = [source.0[0], source.0[1], source.0[2], u8::MAX];
            continue;
        }

        let coverage = u32::from(alpha);
        for (dst, src) in target.0.iter_mut().zip(source.0).take(3) {
            let mixed = u32::from(src) * coverage + u32::from(*dst) * (255 - coverage);
            *dst = ((mixed + 127) / 255) as u8;
        }
    }
}

/// Check that no scale the parameters allow can blow `sprite_size` past the sprite limit
///
/// Grid instances reach `base_scale * scale_jitter` at most; the centre overlay uses
/// `base_scale` alone.
///
/// # Errors
///
/// Returns an invalid parameter error naming `base_scale_range` if the largest scaled
/// side would exceed [`MAX_SPRITE_DIMENSION`]
pub fn check_scaled_extent(
    sprite_size: (u32, u32),
    parameters: &GenerationParameters,
) -> Result<()> {
    let largest_scale =
        parameters.base_scale_range.max * parameters.scale_jitter_range.max.max(1.0);
    let longest_side = f64::from(sprite_size.0.max(sprite_size.1));
    let extent = longest_side * largest_scale;

    if extent <= f64::from(MAX_SPRITE_DIMENSION) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "base_scale_range",
            &parameters.base_scale_range,
            &format!(
                "scaled cutout side of {extent:.0} px exceeds {MAX_SPRITE_DIMENSION} \
                 (scale variation {})",
                parameters.scale_jitter_range
            ),
        ))
    }
}

/// Resize `sprite` by `scale` with a Lanczos filter, truncating the target size
///
/// Returns `None` when either dimension collapses to zero.
pub fn scale_sprite(sprite: &RgbaImage, scale: f64) -> Option<RgbaImage> {
    let (width, height) = sprite.dimensions();
    let new_width = (f64::from(width) * scale) as u32;
    let new_height = (f64::from(height) * scale) as u32;

    if new_width == 0 || new_height == 0 {
        return None;
    }
    if (new_width, new_height) == (width, height) {
        return Some(sprite.clone());
    }
    Some(imageops::resize(
        sprite,
        new_width,
        new_height,
        FilterType::Lanczos3,
    ))
}

/// Fill a working canvas for a `canvas_size` output with jittered instances of `sprite`
///
/// Cells are visited row by row, left to right, and each draws its transform from
/// `rng` in that order; later instances overwrite earlier ones where they overlap.
pub fn compose_grid<R: Rng>(
    sprite: &RgbaImage,
    parameters: &GenerationParameters,
    base: &ResolvedBase,
    rng: &mut R,
) -> WorkingCanvas {
    let (width, height) = parameters.canvas_size;
    let side = working_canvas_side(width, height);
    let mut canvas = WorkingCanvas::new(side);

    let end = i64::from(side);
    let step_x = usize::try_from(base.base_dx).unwrap_or(1).max(1);
    let step_y = usize::try_from(base.base_dy).unwrap_or(1).max(1);
    let start_x = -i64::from(sprite.width());
    let start_y = -i64::from(sprite.height());

    let mut instances = 0_usize;
    for cell_y in (start_y..end).step_by(step_y) {
        for cell_x in (start_x..end).step_by(step_x) {
            let transform = InstanceTransform::draw((cell_x, cell_y), base, parameters, rng);
            let Some(scaled) = scale_sprite(sprite, transform.scale) else {
                continue;
            };
            let rotated = rotate(
                &scaled,
                transform.angle,
                Interpolation::Nearest,
                true,
                Rgba(SPRITE_FILL),
            );
            canvas.paste(&rotated, transform.x, transform.y);
            instances += 1;
        }
    }

    debug!(side, instances, "composed working canvas");
    canvas
}
