//! Finger-print masks.
//!
//! A mask is five stacked horizontal bands weighted `-1, 0, +1, 0, -1`: the
//! middle band rewards material between the fingers, the outer bands
//! penalize material where the fingers close.

use crate::MaskGraspError;
use serde::{Deserialize, Serialize};

/// Relative weights of the five bands, top to bottom.
pub const BAND_PATTERN: [i32; 5] = [-1, 0, 1, 0, -1];

/// What to do when the size and weight lists differ in length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Use the common prefix and ignore the extra entries.
    #[default]
    Truncate,
    /// Reject the configuration.
    Strict,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskBankParams {
    /// Nominal mask sizes in pixels.
    pub sizes: Vec<f64>,
    /// Per-mask weights, paired with `sizes` by index.
    pub weights: Vec<f64>,
    pub length_policy: LengthPolicy,
}

impl Default for MaskBankParams {
    fn default() -> Self {
        Self {
            sizes: [4.0, 8.0, 12.0, 16.0].iter().map(|d| 1024.0 / d).collect(),
            weights: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            length_policy: LengthPolicy::Truncate,
        }
    }
}

/// One five-band kernel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    pub size: f64,
    pub weight: f64,
    /// Rows per band, `floor(size / 5)`.
    pub band_rows: usize,
    /// Kernel width, `floor(3 * size / 5)`.
    pub cols: usize,
    /// `weight / (1.5 * size²)`; multiplies every band weight.
    pub scale: f64,
}

impl Mask {
    pub fn new(size: f64, weight: f64) -> Result<Self, MaskGraspError> {
        if !size.is_finite() || !weight.is_finite() {
            return Err(MaskGraspError::InvalidMaskSize { size });
        }
        let band_rows = (size / 5.0).floor();
        let cols = (3.0 * size / 5.0).floor();
        if band_rows < 1.0 || cols < 1.0 {
            return Err(MaskGraspError::InvalidMaskSize { size });
        }
        Ok(Self {
            size,
            weight,
            band_rows: band_rows as usize,
            cols: cols as usize,
            scale: weight / (1.5 * size * size),
        })
    }

    /// Kernel height: five bands.
    #[inline]
    pub fn rows(&self) -> usize {
        5 * self.band_rows
    }

    /// Anchor `(x, y)` inside the kernel, aligned with the output pixel.
    #[inline]
    pub fn anchor(&self) -> (usize, usize) {
        (self.cols / 2, self.rows() / 2)
    }

    /// Weight of a kernel cell at row `r`.
    #[inline]
    pub fn row_weight(&self, r: usize) -> f64 {
        BAND_PATTERN[r / self.band_rows] as f64 * self.scale
    }

    /// Dense row-major kernel, `rows() × cols`.
    pub fn kernel(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.rows() * self.cols);
        for r in 0..self.rows() {
            let w = self.row_weight(r);
            out.extend(std::iter::repeat_n(w, self.cols));
        }
        out
    }

    /// Sum of all kernel weights, `-(band area) * scale`.
    pub fn sum(&self) -> f64 {
        let band_area = (self.band_rows * self.cols) as f64;
        BAND_PATTERN.iter().map(|&b| b as f64).sum::<f64>() * band_area * self.scale
    }
}

/// Immutable set of masks built once from configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskBank {
    masks: Vec<Mask>,
}

impl MaskBank {
    pub fn new(params: &MaskBankParams) -> Result<Self, MaskGraspError> {
        let (ns, nw) = (params.sizes.len(), params.weights.len());
        if ns != nw {
            match params.length_policy {
                LengthPolicy::Strict => {
                    return Err(MaskGraspError::MaskConfigMismatch {
                        sizes: ns,
                        weights: nw,
                    })
                }
                LengthPolicy::Truncate => {
                    log::warn!(
                        "mask sizes ({ns}) and weights ({nw}) differ; using the first {}",
                        ns.min(nw)
                    );
                }
            }
        }

        let masks = params
            .sizes
            .iter()
            .zip(&params.weights)
            .map(|(&s, &w)| Mask::new(s, w))
            .collect::<Result<Vec<_>, _>>()?;
        if masks.is_empty() {
            return Err(MaskGraspError::EmptyMaskBank);
        }
        Ok(Self { masks })
    }

    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mask> {
        self.masks.iter()
    }
}

impl<'a> IntoIterator for &'a MaskBank {
    type Item = &'a Mask;
    type IntoIter = std::slice::Iter<'a, Mask>;

    fn into_iter(self) -> Self::IntoIter {
        self.masks.iter()
    }
}
