use crate::{CoreError, DepthImage, GrayImage};

/// Linearly map depth to `[0, 255]` (min → 0, max → 255), truncating to u8.
///
/// Non-finite samples (sensor dropouts) are excluded from the range and
/// written as 255, i.e. as far as the farthest valid sample.
pub fn normalize_depth(depth: &DepthImage) -> Result<GrayImage, CoreError> {
    if depth.is_empty() {
        return Err(CoreError::DegenerateFrame {
            reason: "empty frame",
        });
    }

    let (min, max) = depth_range(depth).ok_or(CoreError::DegenerateFrame {
        reason: "no finite depth samples",
    })?;
    let span = max - min;
    if span <= 0.0 {
        return Err(CoreError::DegenerateFrame {
            reason: "constant depth (max == min)",
        });
    }

    let data = depth
        .data
        .iter()
        .map(|&d| {
            if d.is_finite() {
                (((d as f64 - min) / span * 255.0) as i64).clamp(0, 255) as u8
            } else {
                255
            }
        })
        .collect();

    Ok(GrayImage {
        width: depth.width,
        height: depth.height,
        data,
    })
}

/// Min and max over finite samples.
pub fn depth_range(depth: &DepthImage) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for &d in &depth.data {
        if !d.is_finite() {
            continue;
        }
        let d = d as f64;
        range = Some(match range {
            None => (d, d),
            Some((lo, hi)) => (lo.min(d), hi.max(d)),
        });
    }
    range
}
