//! Elliptic Fourier descriptors (Kuhl & Giardina, 1982).
//!
//! The boundary is treated as a closed piecewise-linear curve parameterized
//! by arclength `t ∈ [0, T]`. Harmonic `n` contributes
//!
//! ```text
//! x(t) += a_n cos(2πnt/T) + b_n sin(2πnt/T)
//! y(t) += c_n cos(2πnt/T) + d_n sin(2πnt/T)
//! ```
//!
//! on top of the DC offset `(A0, C0)`.

use crate::EfdGraspError;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Fitted descriptor set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EllipticFourierFit {
    /// `[a_n, b_n, c_n, d_n]` for `n = 1..=order`.
    pub coeffs: Vec<[f64; 4]>,
    /// `(A0, C0)` in the input coordinate frame.
    pub dc: Point2<f64>,
    /// Total arclength of the closed input polygon.
    pub perimeter: f64,
}

/// Curve evaluated on an even parameter grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampledCurve {
    pub xt: Vec<f64>,
    pub yt: Vec<f64>,
}

impl SampledCurve {
    pub fn len(&self) -> usize {
        self.xt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xt.is_empty()
    }

    #[inline]
    pub fn point(&self, i: usize) -> Point2<f64> {
        Point2::new(self.xt[i], self.yt[i])
    }

    /// Mean over all samples.
    pub fn mean(&self) -> Option<Point2<f64>> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        Some(Point2::new(
            self.xt.iter().sum::<f64>() / n,
            self.yt.iter().sum::<f64>() / n,
        ))
    }

    /// Shoelace area of the sampled polygon; positive when counter-clockwise
    /// in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        let n = self.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            acc += self.xt[i] * self.yt[j] - self.xt[j] * self.yt[i];
        }
        0.5 * acc
    }
}

struct Segment {
    dx: f64,
    dy: f64,
    dt: f64,
    t0: f64,
    t1: f64,
}

/// Edges of the closed polygon through `points`, zero-length edges dropped.
fn segments(points: &[Point2<f64>]) -> Vec<Segment> {
    let n = points.len();
    let closing = points[n - 1] != points[0];
    let edges = if closing { n } else { n - 1 };

    let mut out = Vec::with_capacity(edges);
    let mut t = 0.0;
    for i in 0..edges {
        let d = points[(i + 1) % n] - points[i];
        let dt = d.norm();
        if dt <= 0.0 || !dt.is_finite() {
            continue;
        }
        out.push(Segment {
            dx: d.x,
            dy: d.y,
            dt,
            t0: t,
            t1: t + dt,
        });
        t += dt;
    }
    out
}

impl EllipticFourierFit {
    /// Fit `order` harmonics to the closed polygon through `points`.
    ///
    /// The polygon is closed implicitly when the last point differs from the
    /// first.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(points), fields(n = points.len()))
    )]
    pub fn fit(points: &[Point2<f64>], order: usize) -> Result<Self, EfdGraspError> {
        if order == 0 {
            return Err(EfdGraspError::InvalidOrder);
        }
        if points.len() < 2 {
            return Err(EfdGraspError::TooFewPoints {
                needed: 2,
                got: points.len(),
            });
        }
        let segs = segments(points);
        let perimeter = segs.last().map_or(0.0, |s| s.t1);
        if perimeter <= 0.0 {
            return Err(EfdGraspError::DegenerateContour);
        }

        let mut coeffs = Vec::with_capacity(order);
        for n in 1..=order {
            let nf = n as f64;
            let k = perimeter / (2.0 * nf * nf * PI * PI);
            let w = TAU * nf / perimeter;
            let mut acc = [0.0; 4];
            for s in &segs {
                let (sin0, cos0) = (w * s.t0).sin_cos();
                let (sin1, cos1) = (w * s.t1).sin_cos();
                let (d_cos, d_sin) = (cos1 - cos0, sin1 - sin0);
                let (ux, uy) = (s.dx / s.dt, s.dy / s.dt);
                acc[0] += ux * d_cos;
                acc[1] += ux * d_sin;
                acc[2] += uy * d_cos;
                acc[3] += uy * d_sin;
            }
            coeffs.push(acc.map(|v| k * v));
        }

        // DC term relative to the first point, then shifted to absolute.
        let (mut sum_dx, mut sum_dy) = (0.0, 0.0);
        let (mut a0, mut c0) = (0.0, 0.0);
        for s in &segs {
            sum_dx += s.dx;
            sum_dy += s.dy;
            let xi = sum_dx - s.dx / s.dt * s.t1;
            let delta = sum_dy - s.dy / s.dt * s.t1;
            let dt2 = s.t1 * s.t1 - s.t0 * s.t0;
            a0 += s.dx / (2.0 * s.dt) * dt2 + xi * s.dt;
            c0 += s.dy / (2.0 * s.dt) * dt2 + delta * s.dt;
        }
        let dc = Point2::new(
            points[0].x + a0 / perimeter,
            points[0].y + c0 / perimeter,
        );

        Ok(Self {
            coeffs,
            dc,
            perimeter,
        })
    }

    pub fn order(&self) -> usize {
        self.coeffs.len()
    }

    /// Curve position at normalized parameter `t ∈ [0, 1]`.
    pub fn eval(&self, t: f64) -> Point2<f64> {
        let (mut x, mut y) = (self.dc.x, self.dc.y);
        for (i, [a, b, c, d]) in self.coeffs.iter().enumerate() {
            let (s, co) = (TAU * (i + 1) as f64 * t).sin_cos();
            x += a * co + b * s;
            y += c * co + d * s;
        }
        Point2::new(x, y)
    }

    /// `n` samples at evenly spaced parameters on `[0, 1]`, both ends
    /// included, so the first and last samples coincide.
    pub fn sample(&self, n: usize) -> SampledCurve {
        let mut curve = SampledCurve {
            xt: Vec::with_capacity(n),
            yt: Vec::with_capacity(n),
        };
        let denom = n.saturating_sub(1).max(1) as f64;
        for i in 0..n {
            let p = self.eval(i as f64 / denom);
            curve.xt.push(p.x);
            curve.yt.push(p.y);
        }
        curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn circle(cx: f64, cy: f64, r: f64, n: usize) -> Vec<Point2<f64>> {
        (0..n)
            .map(|i| {
                let a = TAU * i as f64 / n as f64;
                Point2::new(cx + r * a.cos(), cy + r * a.sin())
            })
            .collect()
    }

    #[test]
    fn circle_is_a_single_harmonic() {
        let fit = EllipticFourierFit::fit(&circle(3.0, -2.0, 1.5, 720), 6).unwrap();
        let [a, b, c, d] = fit.coeffs[0];
        assert_abs_diff_eq!(a, 1.5, epsilon = 1e-3);
        assert_abs_diff_eq!(b, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(c, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(d, 1.5, epsilon = 1e-3);
        for h in &fit.coeffs[1..] {
            for v in h {
                assert!(v.abs() < 1e-3);
            }
        }
        assert_abs_diff_eq!(fit.dc.x, 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(fit.dc.y, -2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(fit.perimeter, TAU * 1.5, epsilon = 1e-3);
    }

    #[test]
    fn sampled_curve_is_periodic() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(0.5, 1.5),
        ];
        let curve = EllipticFourierFit::fit(&pts, 15).unwrap().sample(300);
        assert_eq!(curve.len(), 300);
        assert_abs_diff_eq!(curve.xt[0], curve.xt[299], epsilon = 1e-9);
        assert_abs_diff_eq!(curve.yt[0], curve.yt[299], epsilon = 1e-9);
    }

    #[test]
    fn explicit_closure_and_repeated_points_change_nothing() {
        let open = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let mut closed = open.clone();
        closed.insert(2, Point2::new(1.0, 0.0));
        closed.push(Point2::new(0.0, 0.0));

        let a = EllipticFourierFit::fit(&open, 8).unwrap();
        let b = EllipticFourierFit::fit(&closed, 8).unwrap();
        assert_abs_diff_eq!(a.perimeter, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.perimeter, 4.0, epsilon = 1e-12);
        for (ha, hb) in a.coeffs.iter().zip(&b.coeffs) {
            for (va, vb) in ha.iter().zip(hb) {
                assert_abs_diff_eq!(va, vb, epsilon = 1e-12);
                assert!(va.is_finite());
            }
        }
        assert_abs_diff_eq!(a.dc.x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(a.dc.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn rejects_bad_input() {
        let pts = circle(0.0, 0.0, 1.0, 16);
        assert_eq!(
            EllipticFourierFit::fit(&pts, 0),
            Err(EfdGraspError::InvalidOrder)
        );
        assert_eq!(
            EllipticFourierFit::fit(&pts[..1], 4),
            Err(EfdGraspError::TooFewPoints { needed: 2, got: 1 })
        );
        let same = vec![Point2::new(1.0, 1.0); 5];
        assert_eq!(
            EllipticFourierFit::fit(&same, 4),
            Err(EfdGraspError::DegenerateContour)
        );
    }
}
