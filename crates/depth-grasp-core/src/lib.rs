//! Core types and utilities for depth-based grasp estimation.
//!
//! This crate holds the pieces both grasp pipelines share: lightweight image
//! containers, depth normalization, Gaussian smoothing, Otsu thresholding,
//! boundary extraction of the largest foreground region, and the affine
//! rotation used to scan the image at several orientations.
//!
//! It performs no I/O. The containers are plain row-major buffers; blur and
//! border tracing go through `image`/`imageproc` buffers internally.

mod affine;
mod blur;
mod contour;
mod depth;
mod error;
mod image;
mod logger;
mod threshold;

pub use affine::{warp_affine_gray, AffineTransform};
pub use blur::gaussian_blur_5x5;
pub use contour::{
    extract_largest_contour, find_contours, largest_by_area, Contour, ContourExtraction,
    ContourParams,
};
pub use depth::{depth_range, normalize_depth};
pub use error::CoreError;
pub use crate::image::{
    invert_gray, sample_bilinear, sample_bilinear_u8, DepthImage, GrayImage, GrayImageView,
};
pub use threshold::{
    histogram, otsu_threshold, resolve_threshold, threshold_binary_inv, ThresholdMode,
};

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, DEFAULT_TRACING_FILTER};

pub use logger::init_with_level;
