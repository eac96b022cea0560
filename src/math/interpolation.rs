//! Cubic convolution interpolation for smooth resampling
//!
//! Implements Keys' cubic convolution kernel with `a = -0.5`, the variant used by
//! common imaging libraries for their bicubic filter. Weights of the four taps
//! around a sample point always sum to one, so flat regions are reproduced exactly.

/// Sharpness parameter of the cubic convolution kernel
pub const CUBIC_A: f64 = -0.5;

/// Kernel weight for a tap at distance `x` from the sample point
pub fn cubic_weight(x: f64) -> f64 {
    let x = x.abs();
    if x < 1.0 {
        (CUBIC_A + 2.0).mul_add(x, -(CUBIC_A + 3.0)).mul_add(x * x, 1.0)
    } else if x < 2.0 {
        (x - 5.0).mul_add(x, 8.0).mul_add(x, -4.0) * CUBIC_A
    } else {
        0.0
    }
}

/// Weights of the four taps at offsets -1, 0, 1, 2 for a fractional position `t` in `[0, 1)`
pub fn cubic_weights(t: f64) -> [f64; 4] {
    [
        cubic_weight(t + 1.0),
        cubic_weight(t),
        cubic_weight(1.0 - t),
        cubic_weight(2.0 - t),
    ]
}
