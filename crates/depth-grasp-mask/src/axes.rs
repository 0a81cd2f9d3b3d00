//! Principal axes of a planar point set.

use crate::MaskGraspError;
use nalgebra::{Matrix2, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Relative eigenvalue floor below which the covariance is treated as rank
/// deficient.
const REL_EIGEN_EPS: f64 = 1e-9;
const ABS_EIGEN_EPS: f64 = 1e-12;

/// Dominant directions of a point set, strongest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrincipalAxes {
    pub centroid: Point2<f64>,
    /// Unit directions, `x >= 0` (ties resolved towards `y > 0`).
    pub directions: Vec<Vector2<f64>>,
    pub eigenvalues: Vec<f64>,
}

impl PrincipalAxes {
    /// Angle of the strongest direction, `atan2(dy, dx)` in degrees.
    pub fn primary_angle_deg(&self) -> f64 {
        self.directions
            .first()
            .map(|d| d.y.atan2(d.x).to_degrees())
            .unwrap_or(0.0)
    }
}

/// Unbiased (n - 1) covariance of `points` around their mean.
pub fn covariance(points: &[Point2<f64>]) -> Option<(Point2<f64>, Matrix2<f64>)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mut mean = Vector2::zeros();
    for p in points {
        mean += p.coords;
    }
    mean /= n;

    let mut cov = Matrix2::zeros();
    for p in points {
        let d = p.coords - mean;
        cov += d * d.transpose();
    }
    cov /= n - 1.0;
    Some((Point2::from(mean), cov))
}

/// Eigen-decomposition of a symmetric 2×2 matrix in closed form.
///
/// Returns `[(λ₊, v₊), (λ₋, v₋)]` with `λ₊ >= λ₋` and orthonormal vectors.
/// For an isotropic matrix (no preferred direction) the coordinate axes are
/// returned in index order.
pub fn symmetric_eigen_2x2(m: &Matrix2<f64>) -> [(f64, Vector2<f64>); 2] {
    let a = m[(0, 0)];
    let b = 0.5 * (m[(0, 1)] + m[(1, 0)]);
    let c = m[(1, 1)];

    let half_tr = 0.5 * (a + c);
    let half_diff = 0.5 * (a - c);
    let r = half_diff.hypot(b);
    let l_plus = half_tr + r;
    let l_minus = half_tr - r;

    // Both rows of (M - λ₊I) are orthogonal to v₊; take the better conditioned.
    let v1 = Vector2::new(b, l_plus - a);
    let v2 = Vector2::new(l_plus - c, b);
    let v = if v1.norm_squared() >= v2.norm_squared() {
        v1
    } else {
        v2
    };
    let norm = v.norm();
    if norm <= f64::EPSILON * (a.abs() + b.abs() + c.abs()).max(f64::MIN_POSITIVE) {
        return [(a, Vector2::x()), (c, Vector2::y())];
    }
    let v_plus = v / norm;
    let v_minus = Vector2::new(-v_plus.y, v_plus.x);
    [(l_plus, v_plus), (l_minus, v_minus)]
}

fn canonical_sign(v: Vector2<f64>) -> Vector2<f64> {
    if v.x < 0.0 || (v.x == 0.0 && v.y < 0.0) {
        -v
    } else {
        v
    }
}

/// PCA of `points`: centroid plus the `top_k` strongest unit directions.
///
/// Eigenpairs are ordered by descending eigenvalue with a stable sort, so
/// equal eigenvalues keep the order produced by [`symmetric_eigen_2x2`].
pub fn estimate_principal_axes(
    points: &[Point2<f64>],
    top_k: usize,
) -> Result<PrincipalAxes, MaskGraspError> {
    if !(1..=2).contains(&top_k) {
        return Err(MaskGraspError::InvalidTopK(top_k));
    }
    let (centroid, cov) = covariance(points).ok_or(MaskGraspError::SingularCovariance)?;
    if !cov.iter().all(|v| v.is_finite()) {
        return Err(MaskGraspError::SingularCovariance);
    }

    let mut pairs = symmetric_eigen_2x2(&cov).to_vec();
    pairs.sort_by(|l, r| r.0.partial_cmp(&l.0).unwrap_or(std::cmp::Ordering::Equal));

    let l_max = pairs[0].0;
    let l_min = pairs[1].0;
    if l_max <= ABS_EIGEN_EPS || l_min <= REL_EIGEN_EPS * l_max {
        return Err(MaskGraspError::SingularCovariance);
    }

    let (eigenvalues, directions) = pairs
        .into_iter()
        .take(top_k)
        .map(|(l, v)| (l, canonical_sign(v)))
        .unzip();

    Ok(PrincipalAxes {
        centroid,
        directions,
        eigenvalues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ellipse(cx: f64, cy: f64, a: f64, b: f64, rot_deg: f64, n: usize) -> Vec<Point2<f64>> {
        let (s, c) = rot_deg.to_radians().sin_cos();
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64 * std::f64::consts::TAU;
                let (x, y) = (a * t.cos(), b * t.sin());
                Point2::new(cx + c * x - s * y, cy + s * x + c * y)
            })
            .collect()
    }

    #[test]
    fn eigen_matches_definition() {
        let m = Matrix2::new(4.0, 1.5, 1.5, 2.0);
        for (l, v) in symmetric_eigen_2x2(&m) {
            let r = m * v - v * l;
            assert!(r.norm() < 1e-12);
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn isotropic_matrix_keeps_index_order() {
        let [(l0, v0), (l1, v1)] = symmetric_eigen_2x2(&Matrix2::new(3.0, 0.0, 0.0, 3.0));
        assert_eq!((l0, l1), (3.0, 3.0));
        assert_eq!(v0, Vector2::x());
        assert_eq!(v1, Vector2::y());
    }

    #[test]
    fn recovers_ellipse_orientation() {
        for rot in [-75.0, -30.0, 0.0, 20.0, 60.0, 89.0] {
            let pts = ellipse(40.0, -12.0, 30.0, 10.0, rot, 720);
            let axes = estimate_principal_axes(&pts, 2).unwrap();
            assert_relative_eq!(axes.centroid.x, 40.0, epsilon = 1e-9);
            assert_relative_eq!(axes.centroid.y, -12.0, epsilon = 1e-9);
            assert_relative_eq!(axes.primary_angle_deg(), rot, epsilon = 1e-6);
            assert!(axes.eigenvalues[0] > axes.eigenvalues[1]);
            assert_relative_eq!(axes.directions[0].dot(&axes.directions[1]), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn top_k_limits_output() {
        let pts = ellipse(0.0, 0.0, 5.0, 2.0, 10.0, 64);
        let axes = estimate_principal_axes(&pts, 1).unwrap();
        assert_eq!(axes.directions.len(), 1);
        assert!(matches!(
            estimate_principal_axes(&pts, 3),
            Err(MaskGraspError::InvalidTopK(3))
        ));
    }

    #[test]
    fn collinear_and_coincident_points_are_singular() {
        let line: Vec<_> = (0..10).map(|i| Point2::new(i as f64, 2.0 * i as f64)).collect();
        assert_eq!(
            estimate_principal_axes(&line, 1),
            Err(MaskGraspError::SingularCovariance)
        );
        let same = vec![Point2::new(3.0, 3.0); 5];
        assert_eq!(
            estimate_principal_axes(&same, 1),
            Err(MaskGraspError::SingularCovariance)
        );
        assert_eq!(
            estimate_principal_axes(&same[..1], 1),
            Err(MaskGraspError::SingularCovariance)
        );
    }
}
