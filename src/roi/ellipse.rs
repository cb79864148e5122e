use serde::{Deserialize, Serialize};

use super::error::RoiError;

// ---------------------------------------------------------------------------
// Containment predicate
// ---------------------------------------------------------------------------

/// `((x-cx)/a)^2 + ((y-cy)/b)^2 <= 1`.
///
/// Errors for a non-positive (or NaN) semi-axis instead of dividing by it.
pub fn contains(x: f64, y: f64, cx: f64, cy: f64, a: f64, b: f64) -> Result<bool, RoiError> {
    if !(a > 0.0 && b > 0.0) {
        return Err(RoiError::DegenerateEllipse { a, b });
    }
    let dx = (x - cx) / a;
    let dy = (y - cy) / b;
    Ok(dx * dx + dy * dy <= 1.0)
}

// ---------------------------------------------------------------------------
// Ellipse – axis-aligned region of interest
// ---------------------------------------------------------------------------

/// Axis-aligned ellipse over two named data axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center `[x, y]`.
    pub center: [f64; 2],
    /// Semi-axes `[a, b]` along x and y.
    pub semi_axes: [f64; 2],
}

impl Ellipse {
    pub fn new(center: [f64; 2], semi_axes: [f64; 2]) -> Self {
        Ellipse { center, semi_axes }
    }

    /// True when a semi-axis is not strictly positive.
    pub fn is_degenerate(&self) -> bool {
        let [a, b] = self.semi_axes;
        !(a > 0.0 && b > 0.0)
    }

    /// Fail with [`RoiError::DegenerateEllipse`] unless the ellipse is usable.
    pub fn validate(&self) -> Result<(), RoiError> {
        if self.is_degenerate() {
            let [a, b] = self.semi_axes;
            return Err(RoiError::DegenerateEllipse { a, b });
        }
        Ok(())
    }

    pub fn contains(&self, x: f64, y: f64) -> Result<bool, RoiError> {
        let [cx, cy] = self.center;
        let [a, b] = self.semi_axes;
        contains(x, y, cx, cy, a, b)
    }

    /// Sample the boundary as a closed polyline of `segments + 1` points.
    pub fn outline(&self, segments: usize) -> Vec<[f64; 2]> {
        let [cx, cy] = self.center;
        let [a, b] = self.semi_axes;
        let n = segments.max(3);
        (0..=n)
            .map(|i| {
                let t = i as f64 / n as f64 * std::f64::consts::TAU;
                [cx + a * t.cos(), cy + b * t.sin()]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundary_points_are_inside() {
        let e = Ellipse::new([10.0, 5.0], [4.0, 2.0]);
        assert_eq!(e.contains(14.0, 5.0), Ok(true));
        assert_eq!(e.contains(6.0, 5.0), Ok(true));
        assert_eq!(e.contains(10.0, 7.0), Ok(true));
        assert_eq!(e.contains(10.0, 3.0), Ok(true));
        assert_eq!(e.contains(14.1, 5.0), Ok(false));
        assert_eq!(e.contains(13.0, 6.5), Ok(false));
    }

    #[test]
    fn test_zero_axis_is_domain_error() {
        assert_eq!(
            contains(0.0, 0.0, 0.0, 0.0, 0.0, 1.0),
            Err(RoiError::DegenerateEllipse { a: 0.0, b: 1.0 })
        );
        assert!(contains(0.0, 0.0, 0.0, 0.0, 1.0, -2.0).is_err());
        assert!(contains(0.0, 0.0, 0.0, 0.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Ellipse::new([0.0, 0.0], [1.0, 1.0]).validate().is_ok());
        assert!(Ellipse::new([0.0, 0.0], [1.0, 0.0]).is_degenerate());
    }

    #[test]
    fn test_outline_is_closed_and_on_boundary() {
        let e = Ellipse::new([2.0, -1.0], [3.0, 0.5]);
        let pts = e.outline(64);
        assert_eq!(pts.len(), 65);
        let first = pts[0];
        let last = pts[64];
        assert!((first[0] - last[0]).abs() < 1e-9 && (first[1] - last[1]).abs() < 1e-9);
        for [x, y] in pts {
            let r = ((x - 2.0) / 3.0).powi(2) + ((y + 1.0) / 0.5).powi(2);
            assert!((r - 1.0).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_center_is_inside(
            cx in -1e6f64..1e6, cy in -1e6f64..1e6,
            a in 1e-3f64..1e6, b in 1e-3f64..1e6,
        ) {
            prop_assert_eq!(contains(cx, cy, cx, cy, a, b), Ok(true));
        }

        #[test]
        fn prop_axis_extremes_are_inside(
            cx in -1e3f64..1e3, cy in -1e3f64..1e3,
            a in 1e-2f64..1e3, b in 1e-2f64..1e3,
        ) {
            // Offsets of exactly one semi-axis; stay well within f64 rounding.
            prop_assert_eq!(contains(a, 0.0, 0.0, 0.0, a, b), Ok(true));
            prop_assert_eq!(contains(0.0, -b, 0.0, 0.0, a, b), Ok(true));
            prop_assert_eq!(contains(cx + 1.01 * a, cy, cx, cy, a, b), Ok(false));
        }

        #[test]
        fn prop_non_positive_axis_always_errors(
            x in -1e3f64..1e3, y in -1e3f64..1e3, a in -1e3f64..=0.0,
        ) {
            prop_assert!(contains(x, y, 0.0, 0.0, a, 1.0).is_err());
            prop_assert!(contains(x, y, 0.0, 0.0, 1.0, a).is_err());
        }
    }
}
