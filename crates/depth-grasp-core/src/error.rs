/// Errors produced by the core image and contour stages.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid image buffer length (expected {expected} samples, got {got})")]
    InvalidImageBuffer { expected: usize, got: usize },
    #[error("degenerate depth frame: {reason}")]
    DegenerateFrame { reason: &'static str },
    #[error("no contour found in the thresholded image")]
    NoContourFound,
}
