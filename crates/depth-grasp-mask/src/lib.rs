//! Mask-based grasp search over depth images.
//!
//! Pipeline:
//! - normalize the depth frame and extract the largest near-object boundary,
//! - estimate its principal axis,
//! - rotate the inverted frame over a sweep of angles and correlate a bank of
//!   five-band "finger-print" masks,
//! - rank the per-(angle, mask) maxima and convert the winner to a gripper pose.
//!
//! Image primitives live in `depth-grasp-core`.

mod axes;
mod detector;
mod error;
mod mask;
mod mode;
mod rank;
mod scoring;

pub use axes::{covariance, estimate_principal_axes, symmetric_eigen_2x2, PrincipalAxes};
pub use detector::{MaskGraspDetector, MaskGraspParams, MaskGraspResult};
pub use error::MaskGraspError;
pub use mask::{LengthPolicy, Mask, MaskBank, MaskBankParams, BAND_PATTERN};
pub use mode::{AngleSweep, GraspMode, MAX_SWEEP_ANGLES};
pub use rank::{best_grasp, rank_candidates, BestGrasp, GraspCandidate};
pub use scoring::{band_response, correlate_dense, score_rotations, ResponseMap, SummedAreaTable};

pub use depth_grasp_core::{Contour, ContourParams, DepthImage, GrayImage, GrayImageView};
