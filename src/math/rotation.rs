//! Rotation of RGBA images about their centre
//!
//! Angles are in degrees and turn the picture counter-clockwise as displayed.
//! Every output pixel is mapped back into the source, so no holes appear; samples
//! falling outside the source take the caller's fill colour.

use image::{Rgba, RgbaImage};

use crate::math::BOUNDS_EPSILON;
use crate::math::interpolation::cubic_weights;

/// Resampling filter used when mapping output pixels back into the source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    /// Pick the source pixel containing the sample point
    Nearest,
    /// Cubic convolution over the 4x4 neighbourhood, taps clamped to the edge
    Bicubic,
}

/// Size of the smallest axis-aligned box holding a `width` x `height` image rotated by `degrees`
pub fn rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let w = f64::from(width);
    let h = f64::from(height);

    let new_width = (w.mul_add(cos, h * sin) - BOUNDS_EPSILON).ceil().max(0.0);
    let new_height = (w.mul_add(sin, h * cos) - BOUNDS_EPSILON).ceil().max(0.0);
    (new_width as u32, new_height as u32)
}

/// Rotate `image` about its centre
///
/// With `expand` the output grows to hold the whole rotated image; otherwise it keeps
/// the source size and whatever turns outside is clipped.
pub fn rotate(
    image: &RgbaImage,
    degrees: f64,
    interpolation: Interpolation,
    expand: bool,
    fill: Rgba<u8>,
) -> RgbaImage {
    let (src_width, src_height) = image.dimensions();
    let (out_width, out_height) = if expand {
        rotated_bounds(src_width, src_height, degrees)
    } else {
        (src_width, src_height)
    };

    if degrees.rem_euclid(360.0).abs() < f64::EPSILON
        && (out_width, out_height) == (src_width, src_height)
    {
        return image.clone();
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    let src_cx = f64::from(src_width) / 2.0;
    let src_cy = f64::from(src_height) / 2.0;
    let out_cx = f64::from(out_width) / 2.0;
    let out_cy = f64::from(out_height) / 2.0;

    RgbaImage::from_fn(out_width, out_height, |x, y| {
        let dx = f64::from(x) + 0.5 - out_cx;
        let dy = f64::from(y) + 0.5 - out_cy;
        // Inverse of a counter-clockwise turn in y-down coordinates
        let sx = dx.mul_add(cos, -(dy * sin)) + src_cx;
        let sy = dx.mul_add(sin, dy * cos) + src_cy;

        match interpolation {
            Interpolation::Nearest => sample_nearest(image, sx, sy, fill),
            Interpolation::Bicubic => sample_bicubic(image, sx, sy, fill),
        }
    })
}

fn sample_nearest(image: &RgbaImage, sx: f64, sy: f64, fill: Rgba<u8>) -> Rgba<u8> {
    if sx < 0.0 || sy < 0.0 {
        return fill;
    }
    image
        .get_pixel_checked(sx.floor() as u32, sy.floor() as u32)
        .copied()
        .unwrap_or(fill)
}

fn sample_bicubic(image: &RgbaImage, sx: f64, sy: f64, fill: Rgba<u8>) -> Rgba<u8> {
    let (width, height) = image.dimensions();
    if sx < 0.0 || sy < 0.0 || sx >= f64::from(width) || sy >= f64::from(height) {
        return fill;
    }

    // Pixel centres sit at half-integer coordinates
    let u = sx - 0.5;
    let v = sy - 0.5;
    let base_x = u.floor();
    let base_y = v.floor();
    let weights_x = cubic_weights(u - base_x);
    let weights_y = cubic_weights(v - base_y);

    let max_x = i64::from(width) - 1;
    let max_y = i64::from(height) - 1;
    let base_x = base_x as i64 - 1;
    let base_y = base_y as i64 - 1;

    let mut accumulated = [0.0_f64; 4];
    for (row, weight_y) in (0_i64..).zip(weights_y) {
        let py = (base_y + row).clamp(0, max_y) as u32;
        for (column, weight_x) in (0_i64..).zip(weights_x) {
            let px = (base_x + column).clamp(0, max_x) as u32;
            let weight = weight_x * weight_y;
            for (sum, channel) in accumulated.iter_mut().zip(image.get_pixel(px, py).0) {
                *sum = f64::from(channel).mul_add(weight, *sum);
            }
        }
    }

    Rgba(accumulated.map(|value| value.round().clamp(0.0, 255.0) as u8))
}
