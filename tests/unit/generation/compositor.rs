//! Tests for working canvas sizing, masked pasting and grid composition

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use rand::Rng;
    use tilestamp::TilestampError;
    use tilestamp::generation::compositor::{
        InstanceTransform, WorkingCanvas, check_scaled_extent, compose_grid, paste_masked,
        scale_sprite, working_canvas_side,
    };
    use tilestamp::generation::parameters::{GenerationParameters, ValueRange};
    use tilestamp::generation::resolver::{ResolvedBase, run_rng};
    use tilestamp::io::configuration::MAX_SPRITE_DIMENSION;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn grid_parameters(canvas: (u32, u32), step: i32) -> GenerationParameters {
        GenerationParameters {
            canvas_size: canvas,
            base_dx_range: ValueRange::fixed(step),
            base_dy_range: ValueRange::fixed(step),
            base_angle_range: ValueRange::fixed(0.0),
            base_scale_range: ValueRange::fixed(1.0),
            position_jitter_range: ValueRange::fixed(0),
            scale_jitter_range: ValueRange::fixed(1.0),
            angle_jitter_range: ValueRange::fixed(0.0),
            tilt_range: ValueRange::fixed(0.0),
            seed: Some(42),
            add_center_cutout: false,
        }
    }

    // Tests the working canvas side is the rounded-up output diagonal
    #[test]
    fn test_working_canvas_side() {
        assert_eq!(working_canvas_side(3, 4), 5);
        assert_eq!(working_canvas_side(256, 256), 363);
        assert_eq!(working_canvas_side(1, 1), 2);
        assert_eq!(working_canvas_side(1024, 1024), 1449);
    }

    // Tests a fresh working canvas is square and filled with opaque white
    #[test]
    fn test_working_canvas_new() {
        let canvas = WorkingCanvas::new(7);

        assert_eq!(canvas.side(), 7);
        assert_eq!(canvas.image().dimensions(), (7, 7));
        assert!(canvas.image().pixels().all(|p| *p == WHITE));
    }

    // Tests opaque pixels replace, transparent pixels leave, partial alpha blends
    #[test]
    fn test_paste_masked_alpha_handling() {
        let mut canvas = RgbaImage::from_pixel(3, 1, WHITE);
        let mut sprite = RgbaImage::new(3, 1);
        sprite.put_pixel(0, 0, RED);
        sprite.put_pixel(1, 0, Rgba([255, 0, 0, 0]));
        sprite.put_pixel(2, 0, Rgba([255, 0, 0, 128]));

        paste_masked(&mut canvas, &sprite, 0, 0);

        assert_eq!(*canvas.get_pixel(0, 0), RED);
        assert_eq!(*canvas.get_pixel(1, 0), WHITE);
        assert_eq!(*canvas.get_pixel(2, 0), Rgba([255, 127, 127, 255]));
    }

    // Tests opaque pixels of any colour are copied bit for bit
    // Verified by compositing through a normalized float blend
    #[test]
    fn test_paste_masked_opaque_exact() {
        let colours = [
            Rgba([1, 2, 253, 255]),
            Rgba([0, 200, 0, 255]),
            Rgba([17, 99, 131, 255]),
            Rgba([254, 1, 128, 255]),
        ];
        let mut canvas = RgbaImage::from_pixel(4, 1, Rgba([90, 90, 90, 255]));
        let mut sprite = RgbaImage::new(4, 1);
        for (x, colour) in (0..).zip(colours) {
            sprite.put_pixel(x, 0, colour);
        }

        paste_masked(&mut canvas, &sprite, 0, 0);

        assert_eq!(canvas, sprite);
    }

    // Tests pastes partly outside the canvas are clipped
    #[test]
    fn test_paste_masked_clips_offsets() {
        let mut canvas = RgbaImage::from_pixel(4, 4, WHITE);
        let sprite = RgbaImage::from_pixel(4, 4, RED);

        paste_masked(&mut canvas, &sprite, -2, -2);

        assert_eq!(*canvas.get_pixel(0, 0), RED);
        assert_eq!(*canvas.get_pixel(1, 1), RED);
        assert_eq!(*canvas.get_pixel(2, 2), WHITE);
        assert_eq!(*canvas.get_pixel(3, 0), WHITE);

        paste_masked(&mut canvas, &sprite, 10, 10);
        assert_eq!(*canvas.get_pixel(3, 3), WHITE);
    }

    // Tests scaling truncates the target size and drops collapsed sprites
    #[test]
    fn test_scale_sprite() {
        let sprite = RgbaImage::from_pixel(64, 32, RED);

        let same = scale_sprite(&sprite, 1.0).unwrap();
        assert_eq!(same, sprite);

        let half = scale_sprite(&sprite, 0.5).unwrap();
        assert_eq!(half.dimensions(), (32, 16));

        let odd = scale_sprite(&sprite, 0.7).unwrap();
        assert_eq!(odd.dimensions(), (44, 22));

        assert!(scale_sprite(&sprite, 0.02).is_none());
        assert!(scale_sprite(&sprite, 0.0).is_none());
    }

    // Tests zero jitter leaves the cell position and base transform unchanged
    #[test]
    fn test_instance_transform_without_jitter() {
        let parameters = grid_parameters((64, 64), 10);
        let base = ResolvedBase {
            base_dx: 10,
            base_dy: 10,
            base_angle: 30.0,
            base_scale: 0.75,
        };

        let transform = InstanceTransform::draw((-5, 7), &base, &parameters, &mut run_rng(3));
        assert_eq!(transform.x, -5);
        assert_eq!(transform.y, 7);
        assert!((transform.scale - 0.75).abs() < f64::EPSILON);
        assert!((transform.angle - 30.0).abs() < f64::EPSILON);
    }

    // Tests jittered transforms stay in range and repeat for a repeated stream
    #[test]
    fn test_instance_transform_jitter_deterministic() {
        let parameters = GenerationParameters::default();
        let base = ResolvedBase {
            base_dx: 100,
            base_dy: 100,
            base_angle: 90.0,
            base_scale: 1.0,
        };

        let mut first_rng = run_rng(11);
        let mut second_rng = run_rng(11);
        for _ in 0..50 {
            let first = InstanceTransform::draw((0, 0), &base, &parameters, &mut first_rng);
            let second = InstanceTransform::draw((0, 0), &base, &parameters, &mut second_rng);
            assert_eq!(first, second);

            assert!((-20..=20).contains(&first.x));
            assert!((-20..=20).contains(&first.y));
            assert!((0.8..=1.2).contains(&first.scale));
            assert!((75.0..=105.0).contains(&first.angle));
        }
    }

    // Tests a regular grid places squares one sprite before the origin at the base step
    #[test]
    fn test_compose_grid_regular_layout() {
        let sprite = RgbaImage::from_pixel(64, 64, RED);
        let parameters = grid_parameters((256, 256), 100);
        let mut rng = run_rng(42);
        let base = ResolvedBase::draw(&parameters, &mut rng);

        let canvas = compose_grid(&sprite, &parameters, &base, &mut rng);
        let image = canvas.image();

        assert_eq!(image.dimensions(), (363, 363));
        // Columns and rows start at -64, 36, 136, 236, 336
        assert_eq!(*image.get_pixel(10, 10), WHITE);
        assert_eq!(*image.get_pixel(36, 36), RED);
        assert_eq!(*image.get_pixel(99, 99), RED);
        assert_eq!(*image.get_pixel(100, 100), WHITE);
        assert_eq!(*image.get_pixel(136, 40), RED);
        assert_eq!(*image.get_pixel(362, 362), RED);
    }

    // Tests a step equal to the sprite size covers the whole canvas
    #[test]
    fn test_compose_grid_full_coverage() {
        let sprite = RgbaImage::from_pixel(16, 16, RED);
        let parameters = grid_parameters((40, 30), 16);
        let mut rng = run_rng(1);
        let base = ResolvedBase::draw(&parameters, &mut rng);

        let canvas = compose_grid(&sprite, &parameters, &base, &mut rng);
        assert!(canvas.image().pixels().all(|p| *p == RED));
    }

    // Tests cells are painted row by row, left to right, later cells on top
    // Verified by swapping the row and column loops and by reversing the column walk
    #[test]
    fn test_compose_grid_paint_order() {
        // 10x10 sprite with a transparent top-left quadrant; each opaque pixel encodes
        // its own sprite coordinate so the winning cell can be read back
        let mut sprite = RgbaImage::new(10, 10);
        for (x, y, pixel) in sprite.enumerate_pixels_mut() {
            if x >= 5 || y >= 5 {
                *pixel = Rgba([(x * 20) as u8, (y * 20) as u8, 0, 255]);
            }
        }
        let parameters = grid_parameters((20, 20), 5);
        let mut rng = run_rng(8);
        let base = ResolvedBase::draw(&parameters, &mut rng);

        let canvas = compose_grid(&sprite, &parameters, &base, &mut rng);
        let image = canvas.image();

        // Four cells overlap every pixel; the last one painted is transparent there,
        // so the pixel comes from the later row's left cell, at sprite (u + 5, v)
        for y in 5..25 {
            for x in 5..25 {
                let (u, v) = (x % 5, y % 5);
                let expected = Rgba([((u + 5) * 20) as u8, (v * 20) as u8, 0, 255]);
                assert_eq!(*image.get_pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    // Tests each cell draws x jitter, y jitter, scale, then angle from the stream
    #[test]
    fn test_instance_transform_draw_order() {
        let parameters = GenerationParameters::default();
        let base = ResolvedBase {
            base_dx: 60,
            base_dy: 60,
            base_angle: 10.0,
            base_scale: 2.0,
        };

        let mut rng = run_rng(21);
        let first = InstanceTransform::draw((100, 200), &base, &parameters, &mut rng);
        let second = InstanceTransform::draw((160, 200), &base, &parameters, &mut rng);

        let mut manual = run_rng(21);
        for (cell_x, transform) in [(100, first), (160, second)] {
            let jitter_x = manual.random_range(-20..=20);
            let jitter_y = manual.random_range(-20..=20);
            let multiplier = manual.random_range(0.8..=1.2);
            let angle_jitter = manual.random_range(-15.0..=15.0);

            assert_eq!(transform.x, cell_x + i64::from(jitter_x));
            assert_eq!(transform.y, 200 + i64::from(jitter_y));
            assert_eq!(transform.scale, 2.0 * multiplier);
            assert_eq!(transform.angle, 10.0 + angle_jitter);
        }
    }

    // Tests scales that would blow a cutout past the size limit are refused
    #[test]
    fn test_check_scaled_extent() {
        let mut parameters = grid_parameters((64, 64), 10);
        assert!(check_scaled_extent((64, 64), &parameters).is_ok());

        parameters.base_scale_range = ValueRange::fixed(1.0e10);
        let error = check_scaled_extent((64, 64), &parameters).unwrap_err();
        assert!(matches!(
            error,
            TilestampError::InvalidParameter { parameter: "base_scale_range", .. }
        ));

        // The scale variation multiplies the base scale
        let limit = f64::from(MAX_SPRITE_DIMENSION);
        parameters.base_scale_range = ValueRange::new(0.5, limit / 100.0);
        assert!(check_scaled_extent((100, 10), &parameters).is_ok());
        parameters.scale_jitter_range = ValueRange::new(0.8, 1.2);
        assert!(check_scaled_extent((100, 10), &parameters).is_err());
        assert!(check_scaled_extent((80, 80), &parameters).is_ok());
    }
}
