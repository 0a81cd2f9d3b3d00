use crate::CoreError;

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl GrayImageView<'_> {
    /// Copy into an `image` buffer for the `imageproc` stages.
    pub fn to_luma8(&self) -> Result<::image::GrayImage, CoreError> {
        check_len(self.width, self.height, self.data.len())?;
        ::image::GrayImage::from_raw(self.width as u32, self.height as u32, self.data.to_vec())
            .ok_or(CoreError::InvalidImageBuffer {
                expected: self.width * self.height,
                got: self.data.len(),
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap a row-major buffer, checking its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, CoreError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_luma8(img: ::image::GrayImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.into_raw(),
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }
}

/// Single-channel depth frame in sensor units, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl DepthImage {
    pub fn from_raw(width: usize, height: usize, data: Vec<f32>) -> Result<Self, CoreError> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn check_len(width: usize, height: usize, got: usize) -> Result<(), CoreError> {
    let expected = width
        .checked_mul(height)
        .ok_or(CoreError::InvalidImageBuffer { expected: 0, got })?;
    if expected != got {
        return Err(CoreError::InvalidImageBuffer { expected, got });
    }
    Ok(())
}

/// Photometric inversion `255 - v`.
pub fn invert_gray(src: &GrayImageView<'_>) -> GrayImage {
    GrayImage {
        width: src.width,
        height: src.height,
        data: src.data.iter().map(|&v| 255 - v).collect(),
    }
}

#[inline]
fn get_gray(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 0;
    }
    src.data[y as usize * src.width + x as usize]
}

/// Bilinear sample with a zero border.
#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_gray(src, x0, y0) as f32;
    let p10 = get_gray(src, x0 + 1, y0) as f32;
    let p01 = get_gray(src, x0, y0 + 1) as f32;
    let p11 = get_gray(src, x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    (sample_bilinear(src, x, y) + 0.5).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = GrayImage::from_raw(4, 3, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidImageBuffer {
                expected: 12,
                got: 11
            }
        ));
    }

    #[test]
    fn bilinear_interpolates_and_zero_pads() {
        let img = GrayImage::from_raw(2, 1, vec![100, 200]).unwrap();
        let v = img.view();
        assert_eq!(sample_bilinear(&v, 0.5, 0.0), 150.0);
        assert_eq!(sample_bilinear(&v, 0.0, 0.0), 100.0);
        // Half a pixel past the right edge blends with the zero border.
        assert_eq!(sample_bilinear(&v, 1.5, 0.0), 100.0);
    }

    #[test]
    fn luma8_conversion_keeps_layout() {
        let img = GrayImage::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let buf = img.view().to_luma8().unwrap();
        assert_eq!((buf.width(), buf.height()), (3, 2));
        assert_eq!(buf.get_pixel(0, 1).0, [4]);
        assert_eq!(GrayImage::from_luma8(buf), img);

        let short = GrayImageView {
            width: 3,
            height: 2,
            data: &[0; 5],
        };
        assert!(matches!(
            short.to_luma8(),
            Err(CoreError::InvalidImageBuffer { expected: 6, got: 5 })
        ));
    }

    #[test]
    fn invert_flips_intensity() {
        let img = GrayImage::from_raw(3, 1, vec![0, 10, 255]).unwrap();
        assert_eq!(invert_gray(&img.view()).data, vec![255, 245, 0]);
    }
}
