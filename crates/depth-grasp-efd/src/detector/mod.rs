//! Boundary-fit grasp detection pipeline.
//!
//! Segments the boundary, fits an elliptic Fourier curve, collects curvature
//! extrema as contact candidates and selects the best opposing pair.

mod params;
mod pipeline;
mod result;

pub use params::EfdGraspParams;
pub use pipeline::{EfdGraspDetector, MAX_SAMPLES};
pub use result::{EfdCurve, EfdGrasp3d, EfdGraspResult};
