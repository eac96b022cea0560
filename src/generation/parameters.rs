//! Randomized-range generation parameters and their validation

use std::fmt;

use rand::Rng;
use rand::distr::uniform::SampleUniform;

use crate::io::configuration::{
    DEFAULT_ANGLE_JITTER_RANGE, DEFAULT_BASE_ANGLE_RANGE, DEFAULT_BASE_DX_RANGE,
    DEFAULT_BASE_DY_RANGE, DEFAULT_BASE_SCALE_RANGE, DEFAULT_CANVAS_SIZE,
    DEFAULT_POSITION_JITTER_RANGE, DEFAULT_SCALE_JITTER_RANGE, DEFAULT_TILT_RANGE,
    MAX_CANVAS_DIMENSION,
};
use crate::io::error::{Result, invalid_parameter};

/// Inclusive `(min, max)` interval a value is drawn from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange<T> {
    /// Lower bound (inclusive)
    pub min: T,
    /// Upper bound (inclusive)
    pub max: T,
}

impl<T> ValueRange<T> {
    /// Create a range without validating the bounds
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Copy> ValueRange<T> {
    /// Range that always yields `value`
    pub const fn fixed(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

impl<T: Copy> From<(T, T)> for ValueRange<T> {
    fn from((min, max): (T, T)) -> Self {
        Self { min, max }
    }
}

impl<T: fmt::Display> fmt::Display for ValueRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.min, self.max)
    }
}

impl<T> ValueRange<T>
where
    T: SampleUniform + PartialOrd + Copy,
{
    /// Draw one value uniformly from the inclusive range
    ///
    /// The range must have been validated; an inverted range panics inside `rand`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> T {
        rng.random_range(self.min..=self.max)
    }
}

impl<T> ValueRange<T>
where
    T: PartialOrd + Copy + fmt::Display,
{
    /// Check `min <= max`, which also rejects NaN bounds
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming `parameter` if the bounds are inverted
    pub fn validate(&self, parameter: &'static str) -> Result<()> {
        if self.min <= self.max {
            Ok(())
        } else {
            Err(invalid_parameter(
                parameter,
                self,
                &"range minimum must not exceed its maximum",
            ))
        }
    }

    /// Check the range is ordered and its lower bound is at least `floor`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the range is inverted or starts below `floor`
    pub fn validate_at_least(&self, parameter: &'static str, floor: T) -> Result<()> {
        self.validate(parameter)?;
        if self.min >= floor {
            Ok(())
        } else {
            Err(invalid_parameter(
                parameter,
                self,
                &format!("range minimum must be at least {floor}"),
            ))
        }
    }
}

impl ValueRange<f64> {
    fn validate_finite(&self, parameter: &'static str) -> Result<()> {
        self.validate(parameter)?;
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(invalid_parameter(
                parameter,
                self,
                &"range bounds must be finite",
            ));
        }
        // Uniform sampling needs a representable span
        if !(self.max - self.min).is_finite() {
            return Err(invalid_parameter(
                parameter,
                self,
                &"range span must be finite",
            ));
        }
        Ok(())
    }
}

/// Fully specified parameter set for one generation run
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParameters {
    /// Output canvas size (width, height) in pixels
    pub canvas_size: (u32, u32),
    /// Range of the horizontal grid step
    pub base_dx_range: ValueRange<i32>,
    /// Range of the vertical grid step
    pub base_dy_range: ValueRange<i32>,
    /// Range of the angle shared by every instance, in degrees
    pub base_angle_range: ValueRange<f64>,
    /// Range of the scale shared by every instance
    pub base_scale_range: ValueRange<f64>,
    /// Per-instance offset added to both grid coordinates
    pub position_jitter_range: ValueRange<i32>,
    /// Per-instance multiplier applied to the base scale
    pub scale_jitter_range: ValueRange<f64>,
    /// Per-instance offset added to the base angle, in degrees
    pub angle_jitter_range: ValueRange<f64>,
    /// Range of the single rotation applied to the composed grid, in degrees
    pub tilt_range: ValueRange<f64>,
    /// Seed for the run; drawn at random when absent
    pub seed: Option<u32>,
    /// Stamp one unrotated cutout at the centre after cropping
    pub add_center_cutout: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            base_dx_range: DEFAULT_BASE_DX_RANGE.into(),
            base_dy_range: DEFAULT_BASE_DY_RANGE.into(),
            base_angle_range: DEFAULT_BASE_ANGLE_RANGE.into(),
            base_scale_range: DEFAULT_BASE_SCALE_RANGE.into(),
            position_jitter_range: DEFAULT_POSITION_JITTER_RANGE.into(),
            scale_jitter_range: DEFAULT_SCALE_JITTER_RANGE.into(),
            angle_jitter_range: DEFAULT_ANGLE_JITTER_RANGE.into(),
            tilt_range: DEFAULT_TILT_RANGE.into(),
            seed: None,
            add_center_cutout: false,
        }
    }
}

impl GenerationParameters {
    /// Validate canvas size and every range
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if:
    /// - A canvas dimension is zero or exceeds the allocation limit
    /// - Any range has its minimum above its maximum or a non-finite bound
    /// - A grid step range allows steps below one pixel
    /// - A scale range allows negative scales
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.canvas_size;
        for (name, value) in [("canvas_width", width), ("canvas_height", height)] {
            if value == 0 {
                return Err(invalid_parameter(name, &value, &"must be positive"));
            }
            if value > MAX_CANVAS_DIMENSION {
                return Err(invalid_parameter(
                    name,
                    &value,
                    &format!("must not exceed {MAX_CANVAS_DIMENSION}"),
                ));
            }
        }

        self.base_dx_range.validate_at_least("base_dx_range", 1)?;
        self.base_dy_range.validate_at_least("base_dy_range", 1)?;
        self.position_jitter_range
            .validate("position_jitter_range")?;

        self.base_angle_range.validate_finite("base_angle_range")?;
        self.base_scale_range.validate_finite("base_scale_range")?;
        self.base_scale_range
            .validate_at_least("base_scale_range", 0.0)?;
        self.scale_jitter_range
            .validate_finite("scale_jitter_range")?;
        self.scale_jitter_range
            .validate_at_least("scale_jitter_range", 0.0)?;
        self.angle_jitter_range
            .validate_finite("angle_jitter_range")?;
        self.tilt_range.validate_finite("tilt_range")?;

        Ok(())
    }

    /// Copy of these parameters with the seed pinned
    pub fn with_seed(&self, seed: u32) -> Self {
        Self {
            seed: Some(seed),
            ..self.clone()
        }
    }
}
