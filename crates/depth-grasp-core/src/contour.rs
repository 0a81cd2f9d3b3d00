//! Boundary extraction of connected foreground regions.
//!
//! Tracing is `imageproc`'s border following over 8-connected foreground.
//! Only outer borders are kept: a hole never encloses more area than the
//! region around it, so it never wins the largest-contour selection.

use crate::{gaussian_blur_5x5, resolve_threshold, threshold_binary_inv, CoreError};
use crate::{GrayImageView, ThresholdMode};
use imageproc::contours::BorderType;
use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Closed polygonal boundary. The closing edge from the last point back to
/// the first is implicit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point2<f64>>,
}

impl Contour {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    pub fn from_xy(xy: &[[f64; 2]]) -> Self {
        Self::new(xy.iter().map(|p| Point2::new(p[0], p[1])).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Unsigned enclosed area (shoelace formula).
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Signed shoelace area; positive when the points run counter-clockwise
    /// in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            acc += p.x * q.y - q.x * p.y;
        }
        0.5 * acc
    }

    /// Mean of the boundary points (not the area centroid).
    pub fn mean(&self) -> Option<Point2<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point2::new(sx / n, sy / n))
    }

    /// Number of distinct points.
    pub fn distinct_points(&self) -> usize {
        let mut pts: Vec<(u64, u64)> = self
            .points
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits()))
            .collect();
        pts.sort_unstable();
        pts.dedup();
        pts.len()
    }
}

/// Parameters for largest-contour extraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourParams {
    /// Smooth with a 5×5 Gaussian before thresholding.
    pub blur: bool,
    pub threshold: ThresholdMode,
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            blur: true,
            threshold: ThresholdMode::Otsu,
        }
    }
}

/// Result of [`extract_largest_contour`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContourExtraction {
    pub contour: Contour,
    /// Threshold applied to the (blurred) image.
    pub threshold: u8,
    /// Number of foreground regions found.
    pub num_contours: usize,
}

/// Blur, binarize (dark pixels become foreground) and return the boundary
/// enclosing the largest area. Boundaries with fewer than three distinct
/// points (single pixels, one-pixel lines) are skipped.
pub fn extract_largest_contour(
    img: &GrayImageView<'_>,
    params: &ContourParams,
) -> Result<ContourExtraction, CoreError> {
    let blurred;
    let src = if params.blur {
        blurred = gaussian_blur_5x5(img)?;
        blurred.view()
    } else {
        *img
    };

    let threshold = resolve_threshold(&src, params.threshold);
    let binary = threshold_binary_inv(&src, threshold);
    let contours = find_contours(&binary.view())?;
    debug!(
        "threshold {} -> {} foreground regions",
        threshold,
        contours.len()
    );

    let usable = contours.iter().filter(|c| c.distinct_points() >= 3);
    let contour = largest_by_area(usable).ok_or(CoreError::NoContourFound)?;
    Ok(ContourExtraction {
        contour: contour.clone(),
        threshold,
        num_contours: contours.len(),
    })
}

/// First contour with maximal enclosed area.
pub fn largest_by_area<'a>(
    contours: impl IntoIterator<Item = &'a Contour>,
) -> Option<&'a Contour> {
    let mut best: Option<(&Contour, f64)> = None;
    for c in contours {
        let a = c.area();
        if best.map(|(_, ba)| a > ba).unwrap_or(true) {
            best = Some((c, a));
        }
    }
    best.map(|(c, _)| c)
}

/// Outer boundaries of all 8-connected non-zero regions of `binary`, in
/// raster order of each border's first pixel.
pub fn find_contours(binary: &GrayImageView<'_>) -> Result<Vec<Contour>, CoreError> {
    if binary.width == 0 || binary.height == 0 {
        return Ok(Vec::new());
    }
    let buf = binary.to_luma8()?;
    Ok(imageproc::contours::find_contours::<i32>(&buf)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|c| {
            Contour::new(
                c.points
                    .iter()
                    .map(|p| Point2::new(p.x as f64, p.y as f64))
                    .collect(),
            )
        })
        .collect())
}
