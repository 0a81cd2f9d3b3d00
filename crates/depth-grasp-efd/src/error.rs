/// Errors returned by the boundary-fit grasp detector.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EfdGraspError {
    #[error("contour has zero arclength")]
    DegenerateContour,
    #[error("Fourier order must be at least 1")]
    InvalidOrder,
    #[error("need at least {needed} points, got {got}")]
    TooFewPoints { needed: usize, got: usize },
    #[error("at most {max} curve samples are supported, got {got}")]
    TooManySamples { max: usize, got: usize },
    #[error("no contact pair satisfies the angle and distance thresholds")]
    NoGraspFound,
}
