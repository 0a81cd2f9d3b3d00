use super::{MaskGraspParams, MaskGraspResult};
use crate::{
    best_grasp, estimate_principal_axes, rank_candidates, score_rotations, MaskBank,
    MaskGraspError,
};
use depth_grasp_core::{
    extract_largest_contour, invert_gray, normalize_depth, CoreError, DepthImage, GrayImageView,
};
use log::{debug, info, warn};
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mask-based grasp detector.
///
/// Holds only immutable state built once from its parameters, so one
/// instance can serve any number of frames (and threads).
#[derive(Clone, Debug)]
pub struct MaskGraspDetector {
    params: MaskGraspParams,
    bank: MaskBank,
    sweep: Vec<f64>,
}

impl MaskGraspDetector {
    pub fn new(params: MaskGraspParams) -> Result<Self, MaskGraspError> {
        if !(1..=2).contains(&params.top_k) {
            return Err(MaskGraspError::InvalidTopK(params.top_k));
        }
        let bank = MaskBank::new(&params.bank)?;
        let sweep = params.sweep.angles()?;
        debug!(
            "mask bank: {} masks, sweep: {} angles",
            bank.len(),
            sweep.len()
        );
        Ok(Self {
            params,
            bank,
            sweep,
        })
    }

    #[inline]
    pub fn params(&self) -> &MaskGraspParams {
        &self.params
    }

    #[inline]
    pub fn bank(&self) -> &MaskBank {
        &self.bank
    }

    /// Configured sweep angles (degrees).
    #[inline]
    pub fn sweep(&self) -> &[f64] {
        &self.sweep
    }

    /// Run the full pipeline on a raw depth frame.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, depth),
            fields(width = depth.width, height = depth.height)
        )
    )]
    pub fn detect(&self, depth: &DepthImage) -> Result<MaskGraspResult, MaskGraspError> {
        let started = Instant::now();
        let normalized = normalize_depth(depth)?;
        let result = self.detect_normalized(&normalized.view())?;
        info!(
            "mask grasp: {} candidates in {:.1} ms",
            result.candidates.len(),
            started.elapsed().as_secs_f64() * 1e3
        );
        Ok(result)
    }

    /// Run the pipeline on an already normalized frame (near is dark).
    pub fn detect_normalized(
        &self,
        normalized: &GrayImageView<'_>,
    ) -> Result<MaskGraspResult, MaskGraspError> {
        let extraction = extract_largest_contour(normalized, &self.params.contour)?;
        let contour = extraction.contour;

        let (axes, principal_angle_deg, center) =
            match estimate_principal_axes(&contour.points, self.params.top_k) {
                Ok(axes) => {
                    let angle = axes.primary_angle_deg();
                    let center = axes.centroid;
                    (Some(axes), angle, center)
                }
                Err(MaskGraspError::SingularCovariance) => {
                    warn!(
                        "degenerate contour ({} points), using angle 0",
                        contour.len()
                    );
                    let center = contour.mean().ok_or(CoreError::NoContourFound)?;
                    (None, 0.0, center)
                }
                Err(e) => return Err(e),
            };
        debug!(
            "principal angle {:.2} deg about ({:.1}, {:.1})",
            principal_angle_deg, center.x, center.y
        );

        let angles = self.params.mode.angles(&self.sweep, principal_angle_deg);
        let inverted = invert_gray(normalized);
        let candidates = rank_candidates(score_rotations(
            &inverted.view(),
            center,
            &angles,
            &self.bank,
        ));
        let best = best_grasp(&candidates).ok_or(MaskGraspError::NoCandidates)?;

        Ok(MaskGraspResult {
            best,
            candidates,
            contour,
            axes,
            principal_angle_deg,
            center: [center.x, center.y],
            angles,
        })
    }
}
