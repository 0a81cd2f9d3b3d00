use crate::{CoreError, GrayImage, GrayImageView};
use imageproc::filter::separable_filter_equal;

/// Binomial 5-tap kernel `[1,4,6,4,1]/16` (σ ≈ 1.1).
const BINOMIAL_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// 5×5 Gaussian blur, applied separably. Samples past the border repeat the
/// edge pixel.
pub fn gaussian_blur_5x5(src: &GrayImageView<'_>) -> Result<GrayImage, CoreError> {
    if src.width == 0 || src.height == 0 {
        return Ok(GrayImage::new(src.width, src.height));
    }
    let buf = src.to_luma8()?;
    Ok(GrayImage::from_luma8(separable_filter_equal(
        &buf,
        &BINOMIAL_5,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_image_is_unchanged() {
        let img = GrayImage {
            width: 7,
            height: 4,
            data: vec![93; 28],
        };
        assert_eq!(gaussian_blur_5x5(&img.view()).unwrap().data, img.data);
    }

    #[test]
    fn impulse_spreads_symmetrically() {
        let mut img = GrayImage::new(9, 9);
        img.set(4, 4, 255);
        let out = gaussian_blur_5x5(&img.view()).unwrap();
        let c = out.get(4, 4);
        assert!(c > out.get(4, 3) && out.get(4, 3) > out.get(4, 2) && out.get(4, 2) > 0);
        for (x, y) in [(4, 2), (4, 6), (2, 4), (6, 4)] {
            assert_eq!(out.get(x, y), out.get(4, 2));
        }
        assert_eq!(out.get(4, 1), 0);
        assert_eq!(out.get(0, 0), 0);
    }

    #[test]
    fn empty_image_passes_through() {
        let img = GrayImage::new(0, 3);
        assert!(gaussian_blur_5x5(&img.view()).unwrap().data.is_empty());
    }
}
