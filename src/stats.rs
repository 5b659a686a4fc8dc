//! Numeric helpers shared across modules

/// Linear interpolation of `(xs, ys)` at `xout`
///
/// `xs` must be sorted ascending and strictly increasing. Outside the range
/// of `xs` the line through the two nearest points is extended, so at least
/// two points are required; with a single point its y value is returned.
pub fn linear_interp(xs: &[f64], ys: &[f64], xout: f64) -> f64 {
    assert_eq!(xs.len(), ys.len());
    let n = xs.len();

    match n {
        0 => return f64::NAN,
        1 => return ys[0],
        _ => {}
    }

    // Index of the right-hand point of the segment used for xout
    let hi = xs.partition_point(|&x| x < xout).clamp(1, n - 1);
    let lo = hi - 1;

    if xs[hi] == xout {
        return ys[hi];
    }

    let slope = (ys[hi] - ys[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + slope * (xout - xs[lo])
}

/// Largest `f64` strictly below 1
pub const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;
