//! Optional unrotated cutout stamped at the centre of the finished texture

use image::RgbaImage;

use crate::generation::compositor::{paste_masked, scale_sprite};

/// Top-left corner that centres a `sprite_size` image on a `canvas_size` canvas
pub const fn centered_origin(canvas_size: (u32, u32), sprite_size: (u32, u32)) -> (i64, i64) {
    (
        (canvas_size.0 / 2) as i64 - (sprite_size.0 / 2) as i64,
        (canvas_size.1 / 2) as i64 - (sprite_size.1 / 2) as i64,
    )
}

/// Paste `sprite` scaled by `base_scale` at the centre of `output`
///
/// No rotation or jitter is applied and nothing random is drawn.
pub fn stamp_center(output: &mut RgbaImage, sprite: &RgbaImage, base_scale: f64) {
    let Some(scaled) = scale_sprite(sprite, base_scale) else {
        return;
    };
    let (x, y) = centered_origin(output.dimensions(), scaled.dimensions());
    paste_masked(output, &scaled, x, y);
}
