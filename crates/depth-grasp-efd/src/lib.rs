//! Boundary-fit grasp detection.
//!
//! A planar object boundary (from a depth-image contour or the XY footprint of
//! a top-surface point cloud) is smoothed with an elliptic Fourier series.
//! Curvature extrema of the fitted curve become contact candidates, and the
//! pair with near-opposing outward normals, closest to the centroid and to
//! each other, is the grasp.
//!
//! ```
//! use depth_grasp_efd::{EfdGraspDetector, EfdGraspParams};
//! use nalgebra::Point2;
//!
//! // Thin ellipse, 0.2 × 0.06, sampled densely enough for the segmenter.
//! let boundary: Vec<Point2<f64>> = (0..120)
//!     .map(|i| {
//!         let a = std::f64::consts::TAU * i as f64 / 120.0;
//!         Point2::new(0.1 * a.cos(), 0.03 * a.sin())
//!     })
//!     .collect();
//! let detector = EfdGraspDetector::new(EfdGraspParams::default()).unwrap();
//! let grasp = detector.detect(&boundary).unwrap();
//! assert!(grasp.pair.distance < 0.08);
//! ```

mod curvature;
mod detector;
mod efd;
mod error;
mod lift;
mod pair;
mod segment;

pub use curvature::{
    candidate_points, concavity_signal, find_curvature_extrema, gradient, local_extrema,
    CandidatePoint, CurveDifferentials,
};
pub use detector::{
    EfdCurve, EfdGrasp3d, EfdGraspDetector, EfdGraspParams, EfdGraspResult, MAX_SAMPLES,
};
pub use efd::{EllipticFourierFit, SampledCurve};
pub use error::EfdGraspError;
pub use lift::{lift_to_3d, points_xy_and_mean_z};
pub use pair::{evaluate_pair, qualifying_pairs, select_grasp_pair, GraspPair, PairFilterParams};
pub use segment::ContourSegmenter;
