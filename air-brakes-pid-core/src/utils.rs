/// Piecewise-linear interpolation over evenly spaced `values`.
///
/// `t` = 0 maps to the first value and `t` = 1 to the last. Outside that
/// range the first or last segment is extended. `values` needs at least 2
/// entries.
pub(crate) fn lerp(
    t: f64, // 0-1
    values: &[f64],
) -> f64 {
    let len = values.len();
    let spacing = 1.0 / ((len - 1) as f64);

    let mut i = (t / spacing) as usize;
    if i > len - 2 {
        i = len - 2;
    }

    let t = (t - spacing * (i as f64)) * (len - 1) as f64;
    (1.0 - t) * values[i] + t * values[i + 1]
}

/// Inverse of [`lerp`] for strictly increasing `values`, result clamped to 0-1.
/// `values` needs at least 2 entries.
pub(crate) fn inverse_lerp(value: f64, values: &[f64]) -> f64 {
    let n = values.len();
    let first = values[0];
    let last = values[n - 1];

    if value <= first {
        return 0.0;
    }
    if value >= last {
        return 1.0;
    }

    let segment_width = 1.0 / (n as f64 - 1.0);
    for i in 0..(n - 1) {
        let a = values[i];
        let b = values[i + 1];
        if value <= b {
            let t = (value - a) / (b - a);
            return (i as f64 + t) * segment_width;
        }
    }

    1.0
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn lerp_test() {
        let values = [0.0, 1.0, 2.0, 3.0];
        assert_relative_eq!(lerp(-1.0 / 3.0, &values), -1.0, epsilon = 1e-9);
        assert_relative_eq!(lerp(0.0, &values), 0.0, epsilon = 1e-9);
        assert_relative_eq!(lerp(1.0 / 6.0, &values), 0.5, epsilon = 1e-9);
        assert_relative_eq!(lerp(0.5, &values), 1.5, epsilon = 1e-9);
        assert_relative_eq!(lerp(1.0, &values), 3.0, epsilon = 1e-9);
        assert_relative_eq!(lerp(4.0 / 3.0, &values), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn inverse_lerp_test() {
        let values = [0.3, 0.4, 0.5, 0.65, 0.8];
        assert_relative_eq!(inverse_lerp(0.1, &values), 0.0);
        assert_relative_eq!(inverse_lerp(0.3, &values), 0.0);
        assert_relative_eq!(inverse_lerp(0.9, &values), 1.0);

        // segment [0.5, 0.65]: t = 1/3, width 0.25
        assert_relative_eq!(inverse_lerp(0.55, &values), 0.5833333333, epsilon = 1e-9);
        // segment [0.4, 0.5]: t = 0.25
        assert_relative_eq!(inverse_lerp(0.425, &values), 0.3125, epsilon = 1e-9);
    }

    #[test]
    fn inverse_lerp_undoes_lerp() {
        let values = [0.0, 2.0, 5.0, 9.0, 14.0, 20.0];
        for t in [0.0, 0.13, 0.4, 0.61, 0.87, 1.0] {
            assert_relative_eq!(inverse_lerp(lerp(t, &values), &values), t, epsilon = 1e-9);
        }
    }
}
