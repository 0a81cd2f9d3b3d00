use depth_grasp_core::CoreError;

/// Errors returned by the mask-based grasp detector.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MaskGraspError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("covariance of the contour points is singular (coincident or collinear points)")]
    SingularCovariance,
    #[error("top_k must be 1 or 2 for planar principal axes (got {0})")]
    InvalidTopK(usize),
    #[error("mask size list ({sizes}) and weight list ({weights}) differ in length")]
    MaskConfigMismatch { sizes: usize, weights: usize },
    #[error("mask size {size} yields an empty kernel")]
    InvalidMaskSize { size: f64 },
    #[error("mask bank is empty")]
    EmptyMaskBank,
    #[error("invalid angle sweep (start={start}, stop={stop}, step={step})")]
    InvalidAngleSweep { start: f64, stop: f64, step: f64 },
    #[error("no grasp candidates were generated")]
    NoCandidates,
}
