//! Opposing contact-pair selection.

use crate::{CandidatePoint, EfdGraspError};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairFilterParams {
    /// Normals must be farther apart than this (degrees, exclusive).
    pub min_normal_angle_deg: f64,
    /// Contacts must be closer than this (curve units, exclusive).
    pub max_pair_distance: f64,
    /// Only pair candidates where the boundary is locally concave.
    pub concave_only: bool,
}

impl Default for PairFilterParams {
    fn default() -> Self {
        Self {
            min_normal_angle_deg: 120.0,
            max_pair_distance: 0.08,
            concave_only: false,
        }
    }
}

/// Two candidate contacts. `first` and `second` index the candidate slice
/// passed to [`select_grasp_pair`], with `first < second`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraspPair {
    pub first: usize,
    pub second: usize,
    /// Angle between the two normals, in `[0, 180]` degrees.
    pub normal_angle_deg: f64,
    /// Sum of both contacts' distances to the centroid.
    pub centroid_distance: f64,
    /// Contact-to-contact distance.
    pub distance: f64,
    /// Selection cost, `centroid_distance + distance`.
    pub cost: f64,
    /// Net planar moment of the two contact normals about the centroid.
    pub moment: f64,
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

fn angle_between_deg(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let denom = a.norm() * b.norm();
    if !(denom > 0.0) {
        return 0.0;
    }
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Geometry of one unordered pair, without filtering.
pub fn evaluate_pair(
    candidates: &[CandidatePoint],
    first: usize,
    second: usize,
    centroid: Point2<f64>,
) -> GraspPair {
    let (p, q) = (&candidates[first], &candidates[second]);
    let rp = p.position - centroid;
    let rq = q.position - centroid;
    let centroid_distance = rp.norm() + rq.norm();
    let distance = (p.position - q.position).norm();
    GraspPair {
        first,
        second,
        normal_angle_deg: angle_between_deg(p.normal, q.normal),
        centroid_distance,
        distance,
        cost: centroid_distance + distance,
        moment: cross(rp, p.normal) + cross(rq, q.normal),
    }
}

impl PairFilterParams {
    pub fn accepts(&self, pair: &GraspPair) -> bool {
        pair.normal_angle_deg > self.min_normal_angle_deg && pair.distance < self.max_pair_distance
    }
}

/// All pairs passing `params`, in enumeration order `(0,1), (0,2), …`.
pub fn qualifying_pairs(
    candidates: &[CandidatePoint],
    centroid: Point2<f64>,
    params: &PairFilterParams,
) -> Vec<GraspPair> {
    let eligible = |c: &CandidatePoint| !params.concave_only || c.concave;
    let mut out = Vec::new();
    for i in 0..candidates.len() {
        if !eligible(&candidates[i]) {
            continue;
        }
        for j in i + 1..candidates.len() {
            if !eligible(&candidates[j]) {
                continue;
            }
            let pair = evaluate_pair(candidates, i, j, centroid);
            if params.accepts(&pair) {
                out.push(pair);
            }
        }
    }
    out
}

/// Qualifying pair with the lowest cost; the first one wins on ties.
pub fn select_grasp_pair(
    candidates: &[CandidatePoint],
    centroid: Point2<f64>,
    params: &PairFilterParams,
) -> Result<GraspPair, EfdGraspError> {
    let pairs = qualifying_pairs(candidates, centroid, params);
    log::debug!(
        "pair filter: {} of {} candidate pairs qualify",
        pairs.len(),
        candidates.len() * candidates.len().saturating_sub(1) / 2
    );
    let mut best: Option<GraspPair> = None;
    for pair in pairs {
        match best {
            Some(b) if pair.cost >= b.cost => {}
            _ => best = Some(pair),
        }
    }
    best.ok_or(EfdGraspError::NoGraspFound)
}
