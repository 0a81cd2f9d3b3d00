use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

/// Best response of one mask at one orientation, in original image
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraspCandidate {
    pub score: f64,
    /// Column of the grasp center.
    pub x: f64,
    /// Row of the grasp center.
    pub y: f64,
    /// Kernel height in pixels (the finger opening direction).
    pub mask_height: usize,
    pub mask_width: usize,
    /// Rotation applied to the image when this candidate was found.
    pub angle_deg: f64,
}

/// Gripper command derived from the top-ranked candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestGrasp {
    pub x: f64,
    pub y: f64,
    /// Gripper yaw: candidate angle in radians plus a quarter turn, since the
    /// fingers close across the mask bands.
    pub angle_rad: f64,
    pub angle_deg: f64,
    /// Kernel height of the winning mask.
    pub mask_size: usize,
    pub mask_width: usize,
    pub score: f64,
}

impl From<&GraspCandidate> for BestGrasp {
    fn from(c: &GraspCandidate) -> Self {
        Self {
            x: c.x,
            y: c.y,
            angle_rad: c.angle_deg.to_radians() + FRAC_PI_2,
            angle_deg: c.angle_deg,
            mask_size: c.mask_height,
            mask_width: c.mask_width,
            score: c.score,
        }
    }
}

/// Descending by score, NaN after every number.
fn by_score_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Sort candidates best first. The sort is stable, so equal scores keep
/// their generation order.
pub fn rank_candidates(mut candidates: Vec<GraspCandidate>) -> Vec<GraspCandidate> {
    candidates.sort_by(|a, b| by_score_desc(a.score, b.score));
    candidates
}

/// Highest-scoring candidate (first one on ties) as a gripper command.
pub fn best_grasp(candidates: &[GraspCandidate]) -> Option<BestGrasp> {
    let mut best: Option<&GraspCandidate> = None;
    for c in candidates {
        match best {
            Some(b) if by_score_desc(c.score, b.score) != Ordering::Less => {}
            _ => best = Some(c),
        }
    }
    best.map(BestGrasp::from)
}
