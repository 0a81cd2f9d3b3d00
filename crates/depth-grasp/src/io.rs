//! JSON configuration and report helpers.

use crate::efd::{EfdGrasp3d, EfdGraspParams, EfdGraspResult};
use crate::mask::{MaskGraspParams, MaskGraspResult};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// How a boundary is pulled out of an 8-bit image for the boundary-fit
/// pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageBoundaryParams {
    /// Pixels at or below this gray level are object.
    pub threshold: u8,
    /// Smooth before thresholding.
    pub blur: bool,
    /// Scale from pixels to the units of the pair thresholds.
    pub units_per_pixel: f64,
}

impl Default for ImageBoundaryParams {
    fn default() -> Self {
        Self {
            threshold: 230,
            blur: false,
            units_per_pixel: 1e-3,
        }
    }
}

/// Configuration for both pipelines and the CLI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthGraspConfig {
    pub mask: MaskGraspParams,
    pub efd: EfdGraspParams,
    pub image: ImageBoundaryParams,
    /// 16-bit depth images: treat 0 as a missing reading.
    pub zero_depth_is_missing: bool,
    pub output_path: Option<String>,
}

impl DepthGraspConfig {
    /// Load a JSON config from disk. Missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("depth_grasp_report.json"))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingsMs {
    pub load: f64,
    pub detect: f64,
    pub total: f64,
}

/// Which pipeline produced a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    Mask,
    Efd,
}

/// Boundary-fit output in input coordinates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EfdReport {
    /// Contacts in the input frame (pixels for image input).
    pub points: Vec<Vec<f64>>,
    pub normal_angle_deg: f64,
    pub distance: f64,
    pub moment: f64,
    pub num_candidates: usize,
}

impl From<&EfdGraspResult> for EfdReport {
    fn from(r: &EfdGraspResult) -> Self {
        Self {
            points: r.points.iter().map(|p| p.to_vec()).collect(),
            normal_angle_deg: r.pair.normal_angle_deg,
            distance: r.pair.distance,
            moment: r.pair.moment,
            num_candidates: r.candidates.len(),
        }
    }
}

impl From<&EfdGrasp3d> for EfdReport {
    fn from(r: &EfdGrasp3d) -> Self {
        Self {
            points: r.points.iter().map(|p| p.to_vec()).collect(),
            ..Self::from(&r.planar)
        }
    }
}

/// Result file written by the CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DepthGraspReport {
    pub pipeline: Pipeline,
    pub input: String,
    pub config: DepthGraspConfig,
    pub mask: Option<MaskGraspResult>,
    pub efd: Option<EfdReport>,
    pub error: Option<String>,
    pub timings_ms: TimingsMs,
}

impl DepthGraspReport {
    pub fn new(pipeline: Pipeline, input: impl AsRef<Path>, config: &DepthGraspConfig) -> Self {
        Self {
            pipeline,
            input: input.as_ref().display().to_string(),
            config: config.clone(),
            mask: None,
            efd: None,
            error: None,
            timings_ms: TimingsMs::default(),
        }
    }

    pub fn set_mask(&mut self, result: MaskGraspResult) {
        self.mask = Some(result);
        self.error = None;
    }

    pub fn set_efd(&mut self, report: EfdReport) {
        self.efd = Some(report);
        self.error = None;
    }

    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Read a boundary from JSON: an array of `[x, y]` or `[x, y, z]` points.
pub fn load_points_json(path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
