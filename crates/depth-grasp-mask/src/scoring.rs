//! Rotated multi-mask scoring.
//!
//! Each mask is correlated with the image as a whole: output pixel `(x, y)`
//! sees the kernel with its anchor `(cols/2, rows/2)` on `(x, y)`, and pixels
//! outside the image read as zero. Because a mask is constant along each band,
//! the response is three rectangle sums over a summed-area table.

use crate::{GraspCandidate, Mask, MaskBank};
use depth_grasp_core::{warp_affine_gray, AffineTransform, GrayImageView};
use log::debug;
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Inclusive prefix sums with a zero first row and column.
#[derive(Clone, Debug)]
pub struct SummedAreaTable {
    width: usize,
    height: usize,
    /// `(width + 1) × (height + 1)`, row-major.
    sums: Vec<u64>,
}

impl SummedAreaTable {
    pub fn new(img: &GrayImageView<'_>) -> Self {
        let stride = img.width + 1;
        let mut sums = vec![0u64; stride * (img.height + 1)];
        for y in 0..img.height {
            let mut row = 0u64;
            for x in 0..img.width {
                row += img.data[y * img.width + x] as u64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row;
            }
        }
        Self {
            width: img.width,
            height: img.height,
            sums,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sum over `[x0, x1) × [y0, y1)`, clipped to the image.
    pub fn rect_sum(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> u64 {
        let cx = |v: i64| v.clamp(0, self.width as i64) as usize;
        let cy = |v: i64| v.clamp(0, self.height as i64) as usize;
        let (x0, x1, y0, y1) = (cx(x0), cx(x1), cy(y0), cy(y1));
        if x0 >= x1 || y0 >= y1 {
            return 0;
        }
        let stride = self.width + 1;
        let at = |x: usize, y: usize| self.sums[y * stride + x];
        at(x1, y1) + at(x0, y0) - at(x0, y1) - at(x1, y0)
    }
}

/// Dense per-pixel response of one mask.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl ResponseMap {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Maximum as `(x, y, value)`, where `(x, y)` is the centroid of every
    /// pixel holding the maximum. A symmetric object yields mirrored optima
    /// whose centroid is the axis between them. NaN never wins.
    pub fn argmax(&self) -> Option<(f64, f64, f64)> {
        let mut max: Option<f64> = None;
        let (mut sx, mut sy, mut n) = (0usize, 0usize, 0usize);
        for (i, &v) in self.data.iter().enumerate() {
            if v.is_nan() {
                continue;
            }
            match max {
                Some(m) if v < m => continue,
                Some(m) if v == m => n += 1,
                _ => {
                    max = Some(v);
                    (sx, sy, n) = (0, 0, 1);
                }
            }
            sx += i % self.width;
            sy += i / self.width;
        }
        let max = max?;
        Some((sx as f64 / n as f64, sy as f64 / n as f64, max))
    }
}

/// Mask response at every pixel via rectangle sums.
pub fn band_response(sat: &SummedAreaTable, mask: &Mask) -> ResponseMap {
    let (w, h) = (sat.width(), sat.height());
    let (ax, ay) = mask.anchor();
    let (ax, ay) = (ax as i64, ay as i64);
    let (cols, br) = (mask.cols as i64, mask.band_rows as i64);

    let mut data = Vec::with_capacity(w * h);
    for y in 0..h as i64 {
        let top = y - ay;
        for x in 0..w as i64 {
            let x0 = x - ax;
            let x1 = x0 + cols;
            let band = |b: i64| sat.rect_sum(x0, top + b * br, x1, top + (b + 1) * br) as i64;
            let raw = band(2) - band(0) - band(4);
            data.push(raw as f64 * mask.scale);
        }
    }
    ResponseMap {
        width: w,
        height: h,
        data,
    }
}

/// Direct correlation with the dense kernel. Reference for [`band_response`].
pub fn correlate_dense(img: &GrayImageView<'_>, mask: &Mask) -> ResponseMap {
    let (w, h) = (img.width, img.height);
    let kernel = mask.kernel();
    let (rows, cols) = (mask.rows(), mask.cols);
    let (ax, ay) = mask.anchor();

    let mut data = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for r in 0..rows {
                let sy = y as i64 + r as i64 - ay as i64;
                if sy < 0 || sy >= h as i64 {
                    continue;
                }
                for c in 0..cols {
                    let sx = x as i64 + c as i64 - ax as i64;
                    if sx < 0 || sx >= w as i64 {
                        continue;
                    }
                    acc += kernel[r * cols + c] * img.data[sy as usize * w + sx as usize] as f64;
                }
            }
            data.push(acc);
        }
    }
    ResponseMap {
        width: w,
        height: h,
        data,
    }
}

/// One candidate per `(angle, mask)` pair, in that nesting order.
///
/// The image is rotated by `θ` about `center`; each mask's best pixel is
/// mapped back with the rotation by `-θ`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip(img, bank),
        fields(w = img.width, h = img.height, n_angles = angles.len())
    )
)]
pub fn score_rotations(
    img: &GrayImageView<'_>,
    center: Point2<f64>,
    angles: &[f64],
    bank: &MaskBank,
) -> Vec<GraspCandidate> {
    let mut out = Vec::with_capacity(angles.len() * bank.len());
    for &angle in angles {
        let forward = AffineTransform::rotation_about(center, angle);
        let back = AffineTransform::rotation_about(center, -angle);
        let Some(rotated) = warp_affine_gray(img, &forward, img.width, img.height) else {
            debug!("rotation by {angle:.2} deg is not invertible, skipping");
            continue;
        };
        let sat = SummedAreaTable::new(&rotated.view());

        for mask in bank {
            let response = band_response(&sat, mask);
            let Some((x, y, score)) = response.argmax() else {
                continue;
            };
            let p = back.apply(Point2::new(x, y));
            out.push(GraspCandidate {
                score,
                x: p.x,
                y: p.y,
                mask_height: mask.rows(),
                mask_width: mask.cols,
                angle_deg: angle,
            });
        }
    }
    debug!(
        "scored {} angles x {} masks -> {} candidates",
        angles.len(),
        bank.len(),
        out.len()
    );
    out
}
