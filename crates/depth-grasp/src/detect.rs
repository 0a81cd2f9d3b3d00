//! End-to-end helpers from `image` buffers and files.

use crate::core::{self, Contour, ContourParams, CoreError, DepthImage, ThresholdMode};
use crate::efd::{EfdGraspDetector, EfdGraspError, EfdGraspParams, EfdGraspResult};
use crate::mask::{MaskGraspDetector, MaskGraspError, MaskGraspParams, MaskGraspResult};
use crate::ImageBoundaryParams;
use ::image::DynamicImage;
use nalgebra::Point2;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Mask(#[from] MaskGraspError),

    #[error(transparent)]
    Efd(#[from] EfdGraspError),

    #[error("units per pixel must be positive and finite (got {0})")]
    InvalidScale(f64),
}

/// Convert an `image::GrayImage` into the lightweight `depth-grasp-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Depth frame from a decoded image. 16-bit gray is taken as raw sensor
/// units; 8-bit gray as already-normalized depth; anything else is converted
/// to 16-bit gray first.
///
/// With `zero_is_missing`, zero samples become NaN (no reading).
pub fn depth_from_image(img: &DynamicImage, zero_is_missing: bool) -> DepthImage {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let to_depth = |v: f32| {
        if zero_is_missing && v == 0.0 {
            f32::NAN
        } else {
            v
        }
    };
    let data: Vec<f32> = match img {
        DynamicImage::ImageLuma8(buf) => {
            buf.as_raw().iter().map(|&v| to_depth(v as f32)).collect()
        }
        DynamicImage::ImageLuma16(buf) => {
            buf.as_raw().iter().map(|&v| to_depth(v as f32)).collect()
        }
        other => other
            .to_luma16()
            .as_raw()
            .iter()
            .map(|&v| to_depth(v as f32))
            .collect(),
    };
    DepthImage {
        width: w,
        height: h,
        data,
    }
}

/// Open and decode a depth image file.
pub fn load_depth(
    path: impl AsRef<Path>,
    zero_is_missing: bool,
) -> Result<DepthImage, DetectError> {
    let img = ::image::open(path)?;
    Ok(depth_from_image(&img, zero_is_missing))
}

/// Open a file as 8-bit gray.
pub fn load_gray(path: impl AsRef<Path>) -> Result<::image::GrayImage, DetectError> {
    Ok(::image::open(path)?.to_luma8())
}

/// Run the mask-based pipeline on a depth frame.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(depth, params),
        fields(width = depth.width, height = depth.height)
    )
)]
pub fn detect_mask(
    depth: &DepthImage,
    params: &MaskGraspParams,
) -> Result<MaskGraspResult, DetectError> {
    let detector = MaskGraspDetector::new(params.clone())?;
    Ok(detector.detect(depth)?)
}

/// Largest dark region boundary of an 8-bit image, in pixels.
pub fn boundary_from_gray(
    img: &::image::GrayImage,
    params: &ImageBoundaryParams,
) -> Result<Contour, DetectError> {
    let contour_params = ContourParams {
        blur: params.blur,
        threshold: ThresholdMode::Fixed(params.threshold),
    };
    let extraction = core::extract_largest_contour(&gray_view(img), &contour_params)?;
    Ok(extraction.contour)
}

/// Run the boundary-fit pipeline on an 8-bit image.
///
/// The boundary is scaled by `units_per_pixel` before fitting so the pair
/// thresholds apply in physical units. The returned contact `points` are
/// mapped back to pixels; every other length in the result stays scaled.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, params, image),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_efd_image(
    img: &::image::GrayImage,
    params: &EfdGraspParams,
    image: &ImageBoundaryParams,
) -> Result<EfdGraspResult, DetectError> {
    let scale = image.units_per_pixel;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(DetectError::InvalidScale(scale));
    }
    let contour = boundary_from_gray(img, image)?;
    log::debug!("boundary: {} pixels", contour.len());

    let scaled: Vec<Point2<f64>> = contour
        .points
        .iter()
        .map(|p| Point2::new(p.x * scale, p.y * scale))
        .collect();
    let detector = EfdGraspDetector::new(params.clone())?;
    let mut result = detector.detect(&scaled)?;
    for p in result.points.iter_mut() {
        p[0] /= scale;
        p[1] /= scale;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{GrayImage, ImageBuffer, Luma};

    #[test]
    fn sixteen_bit_depth_keeps_raw_units() {
        let buf: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_fn(4, 3, |x, y| Luma([(x + 10 * y) as u16 * 100]));
        let depth = depth_from_image(&DynamicImage::ImageLuma16(buf), false);
        assert_eq!((depth.width, depth.height), (4, 3));
        assert_eq!(depth.get(3, 2), 2300.0);
        assert_eq!(depth.get(0, 0), 0.0);

        let buf: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(2, 2, Luma([0]));
        let missing = depth_from_image(&DynamicImage::ImageLuma16(buf), true);
        assert!(missing.data.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn eight_bit_depth_passes_through() {
        let img = GrayImage::from_fn(3, 2, |x, _| Luma([x as u8 * 7]));
        let depth = depth_from_image(&DynamicImage::ImageLuma8(img), false);
        assert_eq!(depth.data, vec![0.0, 7.0, 14.0, 0.0, 7.0, 14.0]);
    }

    #[test]
    fn gray_view_shares_the_buffer() {
        let img = GrayImage::from_pixel(5, 4, Luma([9]));
        let view = gray_view(&img);
        assert_eq!((view.width, view.height), (5, 4));
        assert_eq!(view.data.len(), 20);
    }

    #[test]
    fn dark_rectangle_boundary() {
        let img = GrayImage::from_fn(60, 40, |x, y| {
            let inside = (10..50).contains(&x) && (15..25).contains(&y);
            Luma([if inside { 40 } else { 250 }])
        });
        let contour = boundary_from_gray(&img, &ImageBoundaryParams::default()).unwrap();
        let mean = contour.mean().unwrap();
        assert!((mean.x - 29.5).abs() < 1.0);
        assert!((mean.y - 19.5).abs() < 1.0);
    }

    #[test]
    fn blank_image_has_no_boundary() {
        let img = GrayImage::from_pixel(20, 20, Luma([255]));
        let params = EfdGraspParams::default();
        let err = detect_efd_image(&img, &params, &ImageBoundaryParams::default()).unwrap_err();
        assert!(matches!(err, DetectError::Core(CoreError::NoContourFound)));
    }

    #[test]
    fn scale_must_be_positive() {
        let img = GrayImage::from_pixel(4, 4, Luma([0]));
        let image = ImageBoundaryParams {
            units_per_pixel: 0.0,
            ..ImageBoundaryParams::default()
        };
        assert!(matches!(
            detect_efd_image(&img, &EfdGraspParams::default(), &image),
            Err(DetectError::InvalidScale(_))
        ));
    }
}
