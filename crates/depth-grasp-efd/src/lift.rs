//! Moving between planar boundaries and 3D point clouds.
//!
//! A top-surface cloud is projected to its XY footprint for curve fitting;
//! the chosen contacts are lifted back at the cloud's mean height.

use nalgebra::{Point2, Point3};

/// XY projection of every finite point and the mean Z over those points.
///
/// Returns `None` if the cloud has no finite point.
pub fn points_xy_and_mean_z(cloud: &[Point3<f64>]) -> Option<(Vec<Point2<f64>>, f64)> {
    let mut xy = Vec::with_capacity(cloud.len());
    let mut z_sum = 0.0;
    for p in cloud {
        if p.iter().all(|v| v.is_finite()) {
            xy.push(p.xy());
            z_sum += p.z;
        }
    }
    if xy.is_empty() {
        return None;
    }
    let z = z_sum / xy.len() as f64;
    Some((xy, z))
}

/// Place planar points at height `z`.
pub fn lift_to_3d(points: &[Point2<f64>], z: f64) -> Vec<Point3<f64>> {
    points.iter().map(|p| Point3::new(p.x, p.y, z)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_nan_points() {
        let cloud = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(f64::NAN, 0.0, 5.0),
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(1.0, 2.0, f64::INFINITY),
        ];
        let (xy, z) = points_xy_and_mean_z(&cloud).unwrap();
        assert_eq!(xy, vec![Point2::new(0.0, 0.0), Point2::new(1.0, 2.0)]);
        assert_eq!(z, 2.0);
        assert!(points_xy_and_mean_z(&[Point3::new(f64::NAN, 0.0, 0.0)]).is_none());
    }

    #[test]
    fn lift_keeps_xy() {
        let lifted = lift_to_3d(&[Point2::new(1.0, -1.0), Point2::new(0.5, 0.25)], 0.7);
        assert_eq!(lifted, vec![Point3::new(1.0, -1.0, 0.7), Point3::new(0.5, 0.25, 0.7)]);
    }
}
