//! Curve smoothing for line datasets.
//!
//! Fits a not-a-knot cubic interpolating spline through the points and samples it evenly. The
//! capability is fixed at build time by the `smoothing` cargo feature.

/// Whether this build can smooth curves at all.
pub const SMOOTHING_AVAILABLE: bool = cfg!(feature = "smoothing");

/// Minimum number of points before a curve fit is attempted.
pub const MIN_SMOOTHING_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingCapability {
    Available,
    Unavailable,
}

impl SmoothingCapability {
    /// The capability compiled into this build.
    pub fn detect() -> Self {
        if SMOOTHING_AVAILABLE {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub fn is_available(self) -> bool {
        self == Self::Available && SMOOTHING_AVAILABLE
    }
}

impl Default for SmoothingCapability {
    fn default() -> Self {
        Self::detect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("smoothing unavailable: {reason}")]
pub struct Unavailable {
    pub reason: String,
}

impl Unavailable {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Whether a dataset with `tension` and `point_count` points should be smoothed at all.
pub fn wants_smoothing(tension: f64, point_count: usize) -> bool {
    tension > 0.0 && point_count >= MIN_SMOOTHING_POINTS
}

/// Samples `points.len() * density` evenly spaced points over `[x_first, x_last]` on the
/// interpolating spline. `x` must be strictly increasing.
pub fn smooth(points: &[(f64, f64)], density: usize) -> Result<Vec<(f64, f64)>, Unavailable> {
    if points.len() < MIN_SMOOTHING_POINTS {
        return Err(Unavailable::new(format!(
            "need at least {MIN_SMOOTHING_POINTS} points, got {}",
            points.len()
        )));
    }
    if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(Unavailable::new("non-finite input"));
    }
    if points.windows(2).any(|w| w[1].0 <= w[0].0) {
        return Err(Unavailable::new("x values are not strictly increasing"));
    }

    let second_derivatives = fit(points)?;

    let samples = points.len() * density.max(1);
    let x0 = points[0].0;
    let x1 = points[points.len() - 1].0;
    let step = (x1 - x0) / (samples - 1).max(1) as f64;

    let mut out = Vec::with_capacity(samples);
    let mut seg = 0usize;
    for i in 0..samples {
        let x = if i + 1 == samples {
            x1
        } else {
            x0 + step * i as f64
        };
        while seg + 2 < points.len() && x > points[seg + 1].0 {
            seg += 1;
        }
        let y = eval_segment(points, &second_derivatives, seg, x);
        if !y.is_finite() {
            return Err(Unavailable::new("spline produced a non-finite sample"));
        }
        out.push((x, y));
    }
    Ok(out)
}

fn eval_segment(points: &[(f64, f64)], m: &[f64], seg: usize, x: f64) -> f64 {
    let (xa, ya) = points[seg];
    let (xb, yb) = points[seg + 1];
    let h = xb - xa;
    let a = xb - x;
    let b = x - xa;
    m[seg] * a.powi(3) / (6.0 * h)
        + m[seg + 1] * b.powi(3) / (6.0 * h)
        + (ya / h - m[seg] * h / 6.0) * a
        + (yb / h - m[seg + 1] * h / 6.0) * b
}

/// Solves for the spline's second derivatives at every knot.
#[cfg(feature = "smoothing")]
fn fit(points: &[(f64, f64)]) -> Result<Vec<f64>, Unavailable> {
    use nalgebra::{DMatrix, DVector};

    let n = points.len();
    let h: Vec<f64> = points.windows(2).map(|w| w[1].0 - w[0].0).collect();
    let slope = |i: usize| (points[i + 1].1 - points[i].1) / h[i];

    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut rhs = DVector::<f64>::zeros(n);

    // Not-a-knot: the third derivative is continuous across the second and the second-to-last
    // knots.
    a[(0, 0)] = h[1];
    a[(0, 1)] = -(h[0] + h[1]);
    a[(0, 2)] = h[0];
    a[(n - 1, n - 3)] = h[n - 2];
    a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
    a[(n - 1, n - 1)] = h[n - 3];

    for i in 1..n - 1 {
        a[(i, i - 1)] = h[i - 1];
        a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
        a[(i, i + 1)] = h[i];
        rhs[i] = 6.0 * (slope(i) - slope(i - 1));
    }

    let Some(solution) = a.lu().solve(&rhs) else {
        return Err(Unavailable::new("singular spline system"));
    };
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(Unavailable::new("spline system has no finite solution"));
    }
    Ok(solution.iter().copied().collect())
}

#[cfg(not(feature = "smoothing"))]
fn fit(_points: &[(f64, f64)]) -> Result<Vec<f64>, Unavailable> {
    Err(Unavailable::new("built without the `smoothing` feature"))
}
