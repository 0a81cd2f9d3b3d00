use crate::{AngleSweep, GraspMode, MaskBankParams};
use depth_grasp_core::ContourParams;
use serde::{Deserialize, Serialize};

/// Configuration for [`MaskGraspDetector`](super::MaskGraspDetector).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskGraspParams {
    /// Number of principal directions to keep (1 or 2).
    pub top_k: usize,
    pub mode: GraspMode,
    /// Rotations evaluated in [`GraspMode::AllRotations`].
    pub sweep: AngleSweep,
    pub bank: MaskBankParams,
    /// Boundary extraction on the normalized (not inverted) frame.
    pub contour: ContourParams,
}

impl Default for MaskGraspParams {
    fn default() -> Self {
        Self {
            top_k: 1,
            mode: GraspMode::default(),
            sweep: AngleSweep::default(),
            bank: MaskBankParams::default(),
            contour: ContourParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "mode": "major_component_image",
            "sweep": { "start_deg": 0.0, "stop_deg": 45.0, "step_deg": 15.0 }
        }"#;
        let params: MaskGraspParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.mode, GraspMode::MajorComponentImage);
        assert_eq!(params.top_k, 1);
        assert_eq!(params.bank, MaskBankParams::default());
        assert_eq!(params.sweep.angles().unwrap(), vec![0.0, 15.0, 30.0]);
    }
}
