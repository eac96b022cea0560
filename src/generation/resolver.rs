//! Seed resolution and the base values shared by every stamped instance

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::generation::parameters::GenerationParameters;

/// Pick the run seed, drawing a fresh one from the thread generator when none was given
pub fn resolve_seed(seed: Option<u32>) -> u32 {
    seed.unwrap_or_else(|| rand::rng().random::<u32>())
}

/// Seed the single random stream every draw of a run comes from
pub fn run_rng(seed: u32) -> StdRng {
    StdRng::seed_from_u64(u64::from(seed))
}

/// Values drawn once per run before any instance is placed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedBase {
    /// Horizontal grid step in pixels
    pub base_dx: i32,
    /// Vertical grid step in pixels
    pub base_dy: i32,
    /// Angle shared by every grid instance, in degrees
    pub base_angle: f64,
    /// Scale shared by every instance
    pub base_scale: f64,
}

impl ResolvedBase {
    /// Draw dx, dy, angle, then scale, in that order
    ///
    /// Parameters must already be validated.
    pub fn draw<R: Rng>(parameters: &GenerationParameters, rng: &mut R) -> Self {
        let base_dx = parameters.base_dx_range.sample(rng);
        let base_dy = parameters.base_dy_range.sample(rng);
        let base_angle = parameters.base_angle_range.sample(rng);
        let base_scale = parameters.base_scale_range.sample(rng);

        debug!(base_dx, base_dy, base_angle, base_scale, "resolved base values");

        Self {
            base_dx,
            base_dy,
            base_angle,
            base_scale,
        }
    }
}

/// Everything random about a finished run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedRunState {
    /// Seed the run stream was created from
    pub seed: u32,
    /// Base values drawn at the start of the run
    pub base: ResolvedBase,
    /// Rotation applied to the composed grid, in degrees
    pub global_tilt: f64,
}
