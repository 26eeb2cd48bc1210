/// Timing curves applied to CSS-level transitions.
///
/// The named curves match the stylesheet presets the page uses, so a sampled value and the
/// exported `transition-timing-function` describe the same motion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant velocity (`linear`).
    Linear,
    /// Deceleration curve `cubic-bezier(0, 0, 0.2, 1)`.
    Out,
    /// Symmetric curve `cubic-bezier(0.4, 0, 0.2, 1)`; the default transition curve.
    InOut,
    /// Arbitrary cubic Bezier with fixed endpoints `(0,0)` and `(1,1)`.
    Bezier {
        /// First control point X, must be in `[0, 1]`.
        x1: f64,
        /// First control point Y.
        y1: f64,
        /// Second control point X, must be in `[0, 1]`.
        x2: f64,
        /// Second control point Y.
        y2: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Out => cubic_bezier(0.0, 0.0, 0.2, 1.0, t),
            Self::InOut => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::Bezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// CSS `transition-timing-function` value for this curve.
    pub fn css(self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Out => "cubic-bezier(0, 0, 0.2, 1)".to_string(),
            Self::InOut => "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
            Self::Bezier { x1, y1, x2, y2 } => format!("cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }

    /// Return `true` when control point X coordinates keep the curve a function of time.
    pub fn is_valid(self) -> bool {
        match self {
            Self::Bezier { x1, y1, x2, y2 } => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
                    && (0.0..=1.0).contains(&x1)
                    && (0.0..=1.0).contains(&x2)
            }
            _ => true,
        }
    }
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    // Polynomial coefficients for B(s) = ((a*s + b)*s + c)*s.
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample_x = |s: f64| ((ax * s + bx) * s + cx) * s;
    let sample_dx = |s: f64| (3.0 * ax * s + 2.0 * bx) * s + cx;

    let mut s = t;
    for _ in 0..8 {
        let err = sample_x(s) - t;
        if err.abs() < 1e-7 {
            return ((ay * s + by) * s + cy) * s;
        }
        let d = sample_dx(s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    // Newton stalled: fall back to bisection on [0, 1].
    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..64 {
        let x = sample_x(s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    ((ay * s + by) * s + cy) * s
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
