//! Tests for the cubic convolution kernel

#[cfg(test)]
mod tests {
    use tilestamp::math::interpolation::{CUBIC_A, cubic_weight, cubic_weights};

    // Tests kernel interpolates: one at the tap itself, zero at every other integer
    #[test]
    fn test_cubic_weight_at_integers() {
        assert!((cubic_weight(0.0) - 1.0).abs() < 1e-12);
        assert!(cubic_weight(1.0).abs() < 1e-12);
        assert!(cubic_weight(-1.0).abs() < 1e-12);
        assert!(cubic_weight(2.0).abs() < 1e-12);
        assert!(cubic_weight(3.5).abs() < 1e-12);
    }

    // Tests known values of the a = -0.5 kernel
    #[test]
    fn test_cubic_weight_known_values() {
        assert!((CUBIC_A + 0.5).abs() < f64::EPSILON);
        assert!((cubic_weight(0.5) - 0.5625).abs() < 1e-12);
        assert!((cubic_weight(1.5) + 0.0625).abs() < 1e-12);
        assert!((cubic_weight(-0.5) - cubic_weight(0.5)).abs() < 1e-12);
    }

    // Tests the four tap weights form a partition of unity
    #[test]
    fn test_cubic_weights_sum_to_one() {
        for t in [0.0, 0.1, 0.25, 0.5, 0.75, 0.99] {
            let sum: f64 = cubic_weights(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "weights at t={t} sum to {sum}");
        }
    }

    // Tests a zero fractional offset selects the centre tap only
    #[test]
    fn test_cubic_weights_at_zero_offset() {
        let weights = cubic_weights(0.0);
        assert!(weights[0].abs() < 1e-12);
        assert!((weights[1] - 1.0).abs() < 1e-12);
        assert!(weights[2].abs() < 1e-12);
        assert!(weights[3].abs() < 1e-12);
    }
}
