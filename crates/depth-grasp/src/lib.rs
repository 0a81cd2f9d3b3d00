//! High-level facade crate for the `depth-grasp-*` workspace.
//!
//! This crate provides:
//! - re-exports of the two grasp pipelines and their shared image core,
//! - JSON configuration and report types used by the CLI,
//! - (feature-gated) helpers that run a pipeline straight from an image file.
//!
//! ## Quickstart
//!
//! ```no_run
//! use depth_grasp::detect;
//! use depth_grasp::DepthGraspConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = DepthGraspConfig::default();
//! let depth = detect::load_depth("frame.png", cfg.zero_depth_is_missing)?;
//! let result = detect::detect_mask(&depth, &cfg.mask)?;
//! println!(
//!     "grasp at ({:.1}, {:.1}), {:.1} deg",
//!     result.best.x, result.best.y, result.best.angle_deg
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `depth_grasp::core`: image containers, depth normalization, thresholding,
//!   contour extraction, affine warps.
//! - `depth_grasp::mask`: rotated five-band mask search over a depth frame.
//! - `depth_grasp::efd`: elliptic Fourier boundary fit and contact-pair selection.
//! - `depth_grasp::io`: config and report JSON.
//! - `depth_grasp::detect` (feature `image`): end-to-end helpers from image files.

pub use depth_grasp_core as core;
pub use depth_grasp_efd as efd;
pub use depth_grasp_mask as mask;

pub use depth_grasp_efd::{EfdGraspDetector, EfdGraspParams, EfdGraspResult};
pub use depth_grasp_mask::{
    BestGrasp, GraspMode, MaskGraspDetector, MaskGraspParams, MaskGraspResult,
};

pub mod io;
pub use io::{DepthGraspConfig, DepthGraspReport, EfdReport, ImageBoundaryParams, Pipeline};

#[cfg(feature = "image")]
pub mod detect;
