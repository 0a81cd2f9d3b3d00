//! Boundary cleanup before curve fitting.
//!
//! Boundaries projected from point clouds often contain jumps where the
//! object is occluded or the cloud is sparse. The segmenter cuts the point
//! sequence at every jump, keeps the longest run and optionally doubles its
//! sampling density.

use crate::EfdGraspError;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourSegmenter {
    /// Consecutive points farther apart than this start a new run.
    /// `None` keeps the sequence whole.
    pub gap: Option<f64>,
    /// Insert the midpoint between every pair of consecutive points.
    pub densify: bool,
}

impl Default for ContourSegmenter {
    fn default() -> Self {
        Self {
            gap: Some(0.03),
            densify: true,
        }
    }
}

impl ContourSegmenter {
    /// Maximal runs whose consecutive points are at most `gap` apart.
    pub fn split<'a>(&self, points: &'a [Point2<f64>]) -> Vec<&'a [Point2<f64>]> {
        let Some(gap) = self.gap else {
            return vec![points];
        };
        if points.is_empty() {
            return Vec::new();
        }
        let mut runs = Vec::new();
        let mut start = 0;
        for i in 1..points.len() {
            if (points[i] - points[i - 1]).norm() > gap {
                runs.push(&points[start..i]);
                start = i;
            }
        }
        runs.push(&points[start..]);
        runs
    }

    /// Longest run (first one on ties), densified if configured.
    pub fn apply(&self, points: &[Point2<f64>]) -> Result<Vec<Point2<f64>>, EfdGraspError> {
        let runs = self.split(points);
        let mut longest: &[Point2<f64>] = &[];
        for run in &runs {
            if run.len() > longest.len() {
                longest = run;
            }
        }
        if longest.len() < 2 {
            return Err(EfdGraspError::TooFewPoints {
                needed: 2,
                got: longest.len(),
            });
        }
        log::debug!(
            "segmenter: {} runs, keeping {} of {} points",
            runs.len(),
            longest.len(),
            points.len()
        );

        if !self.densify {
            return Ok(longest.to_vec());
        }
        let mut out = Vec::with_capacity(2 * longest.len() - 1);
        out.push(longest[0]);
        for w in longest.windows(2) {
            out.push(nalgebra::center(&w[0], &w[1]));
            out.push(w[1]);
        }
        Ok(out)
    }
}
