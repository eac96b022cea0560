//! Resampling utilities for sprite and canvas transforms

/// Cubic convolution kernel used for bicubic sampling
pub mod interpolation;
/// Arbitrary-angle image rotation with optional bounds expansion
pub mod rotation;

/// Tolerance absorbing floating-point noise when sizing rotated bounds
pub const BOUNDS_EPSILON: f64 = 1e-6;
