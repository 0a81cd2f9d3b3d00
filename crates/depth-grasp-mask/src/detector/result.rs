use crate::{BestGrasp, GraspCandidate, PrincipalAxes};
use depth_grasp_core::Contour;
use serde::{Deserialize, Serialize};

/// Output of one mask-based detection run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaskGraspResult {
    pub best: BestGrasp,
    /// All candidates, best first.
    pub candidates: Vec<GraspCandidate>,
    /// Boundary of the largest foreground region.
    pub contour: Contour,
    /// `None` when the boundary was degenerate and the fallback angle was used.
    pub axes: Option<PrincipalAxes>,
    /// Principal-axis angle used for this frame (degrees).
    pub principal_angle_deg: f64,
    /// Rotation center: contour centroid.
    pub center: [f64; 2],
    /// Angles evaluated for this frame, in order.
    pub angles: Vec<f64>,
}
