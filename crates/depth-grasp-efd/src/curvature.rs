//! Discrete differential geometry of a sampled curve.

use crate::{EfdGraspError, SampledCurve};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Finite-difference derivative with unit spacing: central differences
/// inside, one-sided at both ends.
pub fn gradient(f: &[f64]) -> Vec<f64> {
    let n = f.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut g = Vec::with_capacity(n);
            g.push(f[1] - f[0]);
            for i in 1..n - 1 {
                g.push(0.5 * (f[i + 1] - f[i - 1]));
            }
            g.push(f[n - 1] - f[n - 2]);
            g
        }
    }
}

/// Per-sample first and second derivatives and curvature score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveDifferentials {
    pub tangents: Vec<Vector2<f64>>,
    /// Second derivative, the (unnormalized) normal direction.
    pub second: Vec<Vector2<f64>>,
    /// `|second|` per sample.
    pub curvature: Vec<f64>,
}

impl CurveDifferentials {
    pub fn from_samples(xt: &[f64], yt: &[f64]) -> Result<Self, EfdGraspError> {
        let n = xt.len().min(yt.len());
        if n < 2 {
            return Err(EfdGraspError::TooFewPoints { needed: 2, got: n });
        }
        let (xt, yt) = (&xt[..n], &yt[..n]);
        let dx = gradient(xt);
        let dy = gradient(yt);
        let ddx = gradient(&dx);
        let ddy = gradient(&dy);

        let tangents = dx.iter().zip(&dy).map(|(&x, &y)| Vector2::new(x, y)).collect();
        let second: Vec<Vector2<f64>> = ddx
            .iter()
            .zip(&ddy)
            .map(|(&x, &y)| Vector2::new(x, y))
            .collect();
        let curvature = second.iter().map(|v| v.norm()).collect();
        Ok(Self {
            tangents,
            second,
            curvature,
        })
    }

    pub fn from_curve(curve: &SampledCurve) -> Result<Self, EfdGraspError> {
        Self::from_samples(&curve.xt, &curve.yt)
    }

    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }
}

/// Interior indices where the discrete derivative of `values` changes sign
/// strictly: `(maxima, minima)`.
pub fn local_extrema(values: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut maxima = Vec::new();
    let mut minima = Vec::new();
    for i in 1..values.len().saturating_sub(1) {
        let before = values[i] - values[i - 1];
        let after = values[i + 1] - values[i];
        if before > 0.0 && after < 0.0 {
            maxima.push(i);
        } else if before < 0.0 && after > 0.0 {
            minima.push(i);
        }
    }
    (maxima, minima)
}

/// Curvature maxima followed by curvature minima.
pub fn find_curvature_extrema(curvature: &[f64]) -> Vec<usize> {
    let (mut maxima, minima) = local_extrema(curvature);
    maxima.extend(minima);
    maxima
}

/// Cross product of consecutive tangents, wrapping from the last sample to
/// the first. Its sign is the local turning direction.
pub fn concavity_signal(tangents: &[Vector2<f64>]) -> Vec<f64> {
    let n = tangents.len();
    (0..n)
        .map(|i| {
            let a = tangents[i];
            let b = tangents[(i + 1) % n];
            a.x * b.y - a.y * b.x
        })
        .collect()
}

/// A sample that may serve as a finger contact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidatePoint {
    /// Index into the sampled curve.
    pub index: usize,
    pub position: Point2<f64>,
    /// Unit normal pointing away from the enclosed region.
    pub normal: Vector2<f64>,
    /// The curve turns against its overall orientation here.
    pub concave: bool,
}

/// Attach outward normals to the samples at `indices`.
///
/// The normal is the tangent rotated by +90°, flipped for curves with
/// positive signed area so it always points outward. Samples whose tangent
/// vanishes have no direction and are dropped.
pub fn candidate_points(
    curve: &SampledCurve,
    diffs: &CurveDifferentials,
    indices: &[usize],
) -> Vec<CandidatePoint> {
    let orientation = if curve.signed_area() > 0.0 { -1.0 } else { 1.0 };
    let turning = concavity_signal(&diffs.tangents);

    let mut out = Vec::with_capacity(indices.len());
    for &i in indices {
        if i >= curve.len() || i >= diffs.len() {
            continue;
        }
        let t = diffs.tangents[i];
        let norm = t.norm();
        if !(norm > f64::EPSILON) {
            continue;
        }
        out.push(CandidatePoint {
            index: i,
            position: curve.point(i),
            normal: Vector2::new(-t.y, t.x) * (orientation / norm),
            concave: turning[i] * orientation > 0.0,
        });
    }
    out
}
