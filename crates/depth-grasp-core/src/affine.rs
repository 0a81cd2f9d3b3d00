use crate::{sample_bilinear_u8, GrayImage, GrayImageView};
use nalgebra::{Matrix2, Matrix2x3, Point2, Vector2};

/// 2D affine map `p' = A p + t`, stored as a 2×3 matrix `[A | t]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub m: Matrix2x3<f64>,
}

impl AffineTransform {
    pub fn new(m: Matrix2x3<f64>) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::new(Matrix2x3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0))
    }

    /// Rotation by `angle_deg` about `center`.
    ///
    /// Same convention as OpenCV `getRotationMatrix2D` with unit scale: in an
    /// image (y pointing down) a positive angle turns content counter-clockwise
    /// as displayed.
    pub fn rotation_about(center: Point2<f64>, angle_deg: f64) -> Self {
        let (beta, alpha) = angle_deg.to_radians().sin_cos();
        Self::new(Matrix2x3::new(
            alpha,
            beta,
            (1.0 - alpha) * center.x - beta * center.y,
            -beta,
            alpha,
            beta * center.x + (1.0 - alpha) * center.y,
        ))
    }

    #[inline]
    pub fn linear(&self) -> Matrix2<f64> {
        self.m.fixed_view::<2, 2>(0, 0).into_owned()
    }

    #[inline]
    pub fn translation(&self) -> Vector2<f64> {
        self.m.column(2).into_owned()
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::from(self.linear() * p.coords + self.translation())
    }

    pub fn inverse(&self) -> Option<Self> {
        let a_inv = self.linear().try_inverse()?;
        let t_inv = -(a_inv * self.translation());
        let mut m = Matrix2x3::zeros();
        m.fixed_view_mut::<2, 2>(0, 0).copy_from(&a_inv);
        m.set_column(2, &t_inv);
        Some(Self::new(m))
    }

    /// `self ∘ other`: apply `other` first.
    pub fn compose(&self, other: &AffineTransform) -> Self {
        let a = self.linear() * other.linear();
        let t = self.linear() * other.translation() + self.translation();
        let mut m = Matrix2x3::zeros();
        m.fixed_view_mut::<2, 2>(0, 0).copy_from(&a);
        m.set_column(2, &t);
        Self::new(m)
    }
}

/// Warp `src` forward by `dst_from_src`: every output pixel is pulled from
/// `dst_from_src⁻¹(x, y)` with bilinear sampling; samples outside `src` read 0.
///
/// Returns `None` if the transform is not invertible.
pub fn warp_affine_gray(
    src: &GrayImageView<'_>,
    dst_from_src: &AffineTransform,
    out_w: usize,
    out_h: usize,
) -> Option<GrayImage> {
    let src_from_dst = dst_from_src.inverse()?;
    let mut out = vec![0u8; out_w * out_h];

    for y in 0..out_h {
        for x in 0..out_w {
            let ps = src_from_dst.apply(Point2::new(x as f64, y as f64));
            out[y * out_w + x] = sample_bilinear_u8(src, ps.x as f32, ps.y as f32);
        }
    }

    Some(GrayImage {
        width: out_w,
        height: out_h,
        data: out,
    })
}
