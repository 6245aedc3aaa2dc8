/// Quadratic ease-in-out on `[0, 1]`.
///
/// `0 -> 0`, `0.5 -> 0.5`, `1 -> 1`, monotonically increasing in between.
#[inline]
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
    }

    #[test]
    fn monotonic_on_unit_interval() {
        let mut prev = ease_in_out_quad(0.0);
        for step in 1..=1000 {
            let v = ease_in_out_quad(step as f32 / 1000.0);
            assert!(v >= prev, "decreased at step {step}: {prev} -> {v}");
            prev = v;
        }
    }

    #[test]
    fn symmetric_around_midpoint() {
        for t in [0.1_f32, 0.2, 0.3, 0.4] {
            let a = ease_in_out_quad(t);
            let b = ease_in_out_quad(1.0 - t);
            assert!((a + b - 1.0).abs() < 1e-6);
        }
    }
}
