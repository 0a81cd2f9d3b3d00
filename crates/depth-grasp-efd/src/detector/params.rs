use crate::{ContourSegmenter, PairFilterParams};
use serde::{Deserialize, Serialize};

/// Configuration for [`EfdGraspDetector`](super::EfdGraspDetector).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfdGraspParams {
    /// Number of Fourier harmonics.
    pub order: usize,
    /// Samples drawn from the fitted curve.
    pub samples: usize,
    pub segmenter: ContourSegmenter,
    pub pair: PairFilterParams,
}

impl Default for EfdGraspParams {
    fn default() -> Self {
        Self {
            order: 15,
            samples: 300,
            segmenter: ContourSegmenter::default(),
            pair: PairFilterParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_roundtrip_through_json() {
        let params = EfdGraspParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let back: EfdGraspParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);

        let json = r#"{ "segmenter": { "gap": null }, "pair": { "max_pair_distance": 2.0 } }"#;
        let partial: EfdGraspParams = serde_json::from_str(json).unwrap();
        assert_eq!(partial.order, 15);
        assert_eq!(partial.segmenter.gap, None);
        assert!(partial.segmenter.densify);
        assert_eq!(partial.pair.max_pair_distance, 2.0);
        assert_eq!(partial.pair.min_normal_angle_deg, 120.0);
    }
}
