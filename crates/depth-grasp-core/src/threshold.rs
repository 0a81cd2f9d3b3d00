//! Global thresholding for foreground segmentation.

use crate::{GrayImage, GrayImageView};
use serde::{Deserialize, Serialize};

/// How the binarization threshold is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Otsu's method on the intensity histogram.
    Otsu,
    /// Fixed threshold.
    Fixed(u8),
}

pub fn histogram(img: &GrayImageView<'_>) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &v in img.data {
        hist[v as usize] += 1;
    }
    hist
}

/// Otsu threshold of an intensity histogram.
///
/// The returned `t` splits the histogram into `<= t` and `> t` with maximal
/// between-class variance. A single-valued histogram returns that value.
pub fn otsu_threshold(hist: &[u32; 256]) -> u8 {
    let total: f64 = hist.iter().map(|&h| h as f64).sum();
    if total < 1.0 {
        return 127;
    }

    let mut sum_total = 0f64;
    for (i, &h) in hist.iter().enumerate() {
        sum_total += (i as f64) * (h as f64);
    }

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = -1f64;
    let mut best_t = None;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        sum_b += (t as f64) * (h as f64);
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = Some(t as u8);
        }
    }

    match best_t {
        Some(t) => t,
        // one populated bin
        None => hist.iter().position(|&h| h > 0).unwrap_or(127) as u8,
    }
}

/// Binary-inverse threshold: `v <= t` becomes 255, everything else 0.
pub fn threshold_binary_inv(img: &GrayImageView<'_>, t: u8) -> GrayImage {
    GrayImage {
        width: img.width,
        height: img.height,
        data: img
            .data
            .iter()
            .map(|&v| if v <= t { 255 } else { 0 })
            .collect(),
    }
}

/// Resolve `mode` against `img` and return the threshold actually used.
pub fn resolve_threshold(img: &GrayImageView<'_>, mode: ThresholdMode) -> u8 {
    match mode {
        ThresholdMode::Otsu => otsu_threshold(&histogram(img)),
        ThresholdMode::Fixed(t) => t,
    }
}
