//! Mask-based grasp detection pipeline.
//!
//! Normalizes the depth frame, extracts the object boundary, estimates its
//! principal axis and scores the mask bank over the configured rotations.

mod params;
mod pipeline;
mod result;

pub use params::MaskGraspParams;
pub use pipeline::MaskGraspDetector;
pub use result::MaskGraspResult;
