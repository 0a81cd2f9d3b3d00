use crate::MaskGraspError;
use serde::{Deserialize, Serialize};

/// Which orientations the scoring engine evaluates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraspMode {
    /// The configured sweep plus the estimated principal-axis angle.
    #[default]
    AllRotations,
    /// Only the principal-axis angle of the object.
    MajorComponentImage,
    /// Only the unrotated image.
    MajorComponentMask,
}

impl GraspMode {
    /// Angles (degrees) to evaluate for one frame. Builds a fresh list every
    /// call; `sweep` is never modified.
    pub fn angles(self, sweep: &[f64], principal_deg: f64) -> Vec<f64> {
        match self {
            GraspMode::AllRotations => {
                let mut out = Vec::with_capacity(sweep.len() + 1);
                out.extend_from_slice(sweep);
                out.push(principal_deg);
                out
            }
            GraspMode::MajorComponentImage => vec![principal_deg],
            GraspMode::MajorComponentMask => vec![0.0],
        }
    }
}

/// Upper bound on the number of sweep angles (0.1° steps over a full turn).
pub const MAX_SWEEP_ANGLES: usize = 3600;

/// Half-open angle range `[start, stop)` in `step` increments (degrees).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleSweep {
    pub start_deg: f64,
    pub stop_deg: f64,
    pub step_deg: f64,
}

impl Default for AngleSweep {
    fn default() -> Self {
        Self {
            start_deg: -90.0,
            stop_deg: 90.0,
            step_deg: 5.0,
        }
    }
}

impl AngleSweep {
    pub fn angles(&self) -> Result<Vec<f64>, MaskGraspError> {
        let AngleSweep {
            start_deg: start,
            stop_deg: stop,
            step_deg: step,
        } = *self;
        if !(start.is_finite() && stop.is_finite() && step.is_finite())
            || step <= 0.0
            || stop <= start
        {
            return Err(MaskGraspError::InvalidAngleSweep { start, stop, step });
        }
        let n = ((stop - start) / step).ceil();
        if n > MAX_SWEEP_ANGLES as f64 {
            return Err(MaskGraspError::InvalidAngleSweep { start, stop, step });
        }
        Ok((0..n as usize).map(|i| start + i as f64 * step).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep_is_end_exclusive() {
        let a = AngleSweep::default().angles().unwrap();
        assert_eq!(a.len(), 36);
        assert_eq!(a[0], -90.0);
        assert_eq!(*a.last().unwrap(), 85.0);
    }

    #[test]
    fn uneven_step_keeps_partial_last_bin() {
        let sweep = AngleSweep {
            start_deg: 0.0,
            stop_deg: 10.0,
            step_deg: 4.0,
        };
        assert_eq!(sweep.angles().unwrap(), vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn invalid_sweeps_fail() {
        for (start, stop, step) in [(0.0, 10.0, 0.0), (10.0, 0.0, 1.0), (0.0, f64::NAN, 1.0)] {
            let sweep = AngleSweep {
                start_deg: start,
                stop_deg: stop,
                step_deg: step,
            };
            assert!(sweep.angles().is_err());
        }
    }

    #[test]
    fn oversized_sweeps_fail() {
        let fine = AngleSweep {
            start_deg: -180.0,
            stop_deg: 180.0,
            step_deg: 0.1,
        };
        assert_eq!(fine.angles().unwrap().len(), MAX_SWEEP_ANGLES);

        for (start, stop, step) in [(-90.0, 90.0, 1e-300), (-f64::MAX, f64::MAX, 1.0)] {
            let sweep = AngleSweep {
                start_deg: start,
                stop_deg: stop,
                step_deg: step,
            };
            assert_eq!(
                sweep.angles().unwrap_err(),
                MaskGraspError::InvalidAngleSweep { start, stop, step }
            );
        }
    }

    #[test]
    fn mode_mapping_does_not_accumulate() {
        let sweep = AngleSweep::default().angles().unwrap();
        let first = GraspMode::AllRotations.angles(&sweep, 12.5);
        let second = GraspMode::AllRotations.angles(&sweep, -3.0);
        assert_eq!(first.len(), sweep.len() + 1);
        assert_eq!(second.len(), sweep.len() + 1);
        assert_eq!(*second.last().unwrap(), -3.0);
        assert_eq!(sweep.len(), 36);

        assert_eq!(GraspMode::MajorComponentImage.angles(&sweep, 12.5), vec![12.5]);
        assert_eq!(GraspMode::MajorComponentMask.angles(&sweep, 12.5), vec![0.0]);
    }
}
