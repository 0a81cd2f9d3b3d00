use super::{EfdCurve, EfdGrasp3d, EfdGraspParams, EfdGraspResult};
use crate::{
    candidate_points, find_curvature_extrema, lift_to_3d, points_xy_and_mean_z,
    select_grasp_pair, CurveDifferentials, EfdGraspError, EllipticFourierFit,
};
use depth_grasp_core::Contour;
use log::debug;
use nalgebra::{Point2, Point3};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Minimum samples for a curvature extremum to exist.
const MIN_SAMPLES: usize = 3;

/// Upper bound on the resampled curve length.
pub const MAX_SAMPLES: usize = 1 << 20;

/// Boundary-fit grasp detector. Stateless apart from its parameters.
#[derive(Clone, Debug)]
pub struct EfdGraspDetector {
    params: EfdGraspParams,
}

impl EfdGraspDetector {
    pub fn new(params: EfdGraspParams) -> Result<Self, EfdGraspError> {
        if params.order == 0 {
            return Err(EfdGraspError::InvalidOrder);
        }
        if params.samples < MIN_SAMPLES {
            return Err(EfdGraspError::TooFewPoints {
                needed: MIN_SAMPLES,
                got: params.samples,
            });
        }
        if params.samples > MAX_SAMPLES {
            return Err(EfdGraspError::TooManySamples {
                max: MAX_SAMPLES,
                got: params.samples,
            });
        }
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &EfdGraspParams {
        &self.params
    }

    /// Find the best opposing contact pair on an ordered planar boundary.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, points), fields(n = points.len()))
    )]
    pub fn detect(&self, points: &[Point2<f64>]) -> Result<EfdGraspResult, EfdGraspError> {
        let boundary = self.params.segmenter.apply(points)?;
        let fit = EllipticFourierFit::fit(&boundary, self.params.order)?;
        let samples = fit.sample(self.params.samples);
        let diffs = CurveDifferentials::from_curve(&samples)?;

        let extrema = find_curvature_extrema(&diffs.curvature);
        let candidates = candidate_points(&samples, &diffs, &extrema);
        let centroid = samples.mean().ok_or(EfdGraspError::TooFewPoints {
            needed: MIN_SAMPLES,
            got: 0,
        })?;
        debug!(
            "efd: {} boundary points, {} extrema, {} candidates",
            boundary.len(),
            extrema.len(),
            candidates.len()
        );

        let pair = select_grasp_pair(&candidates, centroid, &self.params.pair)?;
        let p1 = candidates[pair.first].position;
        let p2 = candidates[pair.second].position;
        debug!(
            "efd pair: ({:.4}, {:.4}) / ({:.4}, {:.4}), angle {:.1} deg",
            p1.x, p1.y, p2.x, p2.y, pair.normal_angle_deg
        );

        Ok(EfdGraspResult {
            points: [[p1.x, p1.y], [p2.x, p2.y]],
            pair,
            candidates,
            curve: EfdCurve {
                fit,
                samples,
                curvature: diffs.curvature,
            },
            boundary_points: boundary.len(),
        })
    }

    pub fn detect_contour(&self, contour: &Contour) -> Result<EfdGraspResult, EfdGraspError> {
        self.detect(&contour.points)
    }

    /// Run on the XY footprint of a top-surface cloud and lift the contacts
    /// to the cloud's mean height. Non-finite points are skipped.
    pub fn detect_cloud(&self, cloud: &[Point3<f64>]) -> Result<EfdGrasp3d, EfdGraspError> {
        let (xy, z) = points_xy_and_mean_z(cloud)
            .ok_or(EfdGraspError::TooFewPoints { needed: 2, got: 0 })?;
        let planar = self.detect(&xy)?;
        let [a, b] = planar.points;
        let lifted = lift_to_3d(&[Point2::new(a[0], a[1]), Point2::new(b[0], b[1])], z);
        Ok(EfdGrasp3d {
            points: [
                [lifted[0].x, lifted[0].y, lifted[0].z],
                [lifted[1].x, lifted[1].y, lifted[1].z],
            ],
            z,
            planar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_params() {
        let zero_order = EfdGraspParams {
            order: 0,
            ..EfdGraspParams::default()
        };
        assert_eq!(
            EfdGraspDetector::new(zero_order).unwrap_err(),
            EfdGraspError::InvalidOrder
        );
        let few = EfdGraspParams {
            samples: 2,
            ..EfdGraspParams::default()
        };
        assert_eq!(
            EfdGraspDetector::new(few).unwrap_err(),
            EfdGraspError::TooFewPoints { needed: 3, got: 2 }
        );
    }

    #[test]
    fn sample_count_is_bounded() {
        let huge = EfdGraspParams {
            samples: usize::MAX,
            ..EfdGraspParams::default()
        };
        assert_eq!(
            EfdGraspDetector::new(huge).unwrap_err(),
            EfdGraspError::TooManySamples {
                max: MAX_SAMPLES,
                got: usize::MAX
            }
        );
        let largest = EfdGraspParams {
            samples: MAX_SAMPLES,
            ..EfdGraspParams::default()
        };
        assert!(EfdGraspDetector::new(largest).is_ok());
    }

    #[test]
    fn empty_cloud_is_rejected() {
        let det = EfdGraspDetector::new(EfdGraspParams::default()).unwrap();
        assert!(matches!(
            det.detect_cloud(&[]),
            Err(EfdGraspError::TooFewPoints { .. })
        ));
    }
}
