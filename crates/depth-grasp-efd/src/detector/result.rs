use crate::{CandidatePoint, EllipticFourierFit, GraspPair, SampledCurve};
use serde::{Deserialize, Serialize};

/// Fitted curve with its per-sample curvature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EfdCurve {
    pub fit: EllipticFourierFit,
    pub samples: SampledCurve,
    pub curvature: Vec<f64>,
}

/// Output of one boundary-fit detection run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EfdGraspResult {
    /// The two contact points `[[x1, y1], [x2, y2]]`.
    pub points: [[f64; 2]; 2],
    pub pair: GraspPair,
    /// Curvature-extremum candidates; `pair` indexes this list.
    pub candidates: Vec<CandidatePoint>,
    pub curve: EfdCurve,
    /// Number of boundary points after segmentation and densification.
    pub boundary_points: usize,
}

/// Contacts lifted back into the point cloud frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EfdGrasp3d {
    pub points: [[f64; 3]; 2],
    /// Mean height of the finite cloud points.
    pub z: f64,
    pub planar: EfdGraspResult,
}
