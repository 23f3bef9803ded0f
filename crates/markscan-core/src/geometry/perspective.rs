//! Four-point projective transforms and image resampling through them.
//!
//! A homography has eight degrees of freedom once `h33` is fixed to 1, so
//! four correspondences determine it exactly: each pair contributes
//!
//! ```text
//! u = (h11 x + h12 y + h13) / (h31 x + h32 y + 1)
//! v = (h21 x + h22 y + h23) / (h31 x + h32 y + 1)
//! ```
//!
//! which is linear in the unknowns after multiplying out the denominator.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};
use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::consts::{PARALLEL_PIXEL_THRESHOLD, SINGULAR_EPSILON};
use crate::error::DetectionFailure;
use crate::frame::{CanonicalQuad, ColorFrame, Dimensions, Frame, Point};

/// A 3x3 homogeneous projective mapping between two planes.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveTransform {
    matrix: Matrix3<f64>,
}

impl PerspectiveTransform {
    /// Solve the transform taking each `src[i]` to `dst[i]`.
    pub fn from_points(src: &[Point; 4], dst: &[Point; 4]) -> Result<Self, DetectionFailure> {
        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();

        for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
            let r = 2 * i;
            a[(r, 0)] = s.x;
            a[(r, 1)] = s.y;
            a[(r, 2)] = 1.0;
            a[(r, 6)] = -d.x * s.x;
            a[(r, 7)] = -d.x * s.y;
            b[r] = d.x;

            a[(r + 1, 3)] = s.x;
            a[(r + 1, 4)] = s.y;
            a[(r + 1, 5)] = 1.0;
            a[(r + 1, 6)] = -d.y * s.x;
            a[(r + 1, 7)] = -d.y * s.y;
            b[r + 1] = d.y;
        }

        if a.determinant().abs() < SINGULAR_EPSILON {
            return Err(DetectionFailure::Degenerate(
                "corner correspondences are collinear".into(),
            ));
        }
        let h = a
            .lu()
            .solve(&b)
            .filter(|h| h.iter().all(|v| v.is_finite()))
            .ok_or_else(|| DetectionFailure::Degenerate("singular 4-point system".into()))?;

        Ok(Self {
            matrix: Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0),
        })
    }

    /// Transform flattening `quad` onto a `size` rectangle at the origin.
    pub fn to_rectangle(quad: &CanonicalQuad, size: Dimensions) -> Result<Self, DetectionFailure> {
        let rect = CanonicalQuad::rectangle(size.width as f64, size.height as f64);
        Self::from_points(&quad.to_array(), &rect.to_array())
    }

    /// Transform projecting a `size` rectangle back onto `quad`.
    ///
    /// Same correspondences as [`Self::to_rectangle`] with source and
    /// destination swapped.
    pub fn from_rectangle(size: Dimensions, quad: &CanonicalQuad) -> Result<Self, DetectionFailure> {
        let rect = CanonicalQuad::rectangle(size.width as f64, size.height as f64);
        Self::from_points(&rect.to_array(), &quad.to_array())
    }

    /// Map a point. Points on the vanishing line map to NaN.
    pub fn apply(&self, p: Point) -> Point {
        let v = self.matrix * Vector3::new(p.x, p.y, 1.0);
        if v[2].abs() < 1e-15 {
            return Point::new(f64::NAN, f64::NAN);
        }
        Point::new(v[0] / v[2], v[1] / v[2])
    }

    pub fn inverse(&self) -> Result<Self, DetectionFailure> {
        let inv = self
            .matrix
            .try_inverse()
            .ok_or_else(|| DetectionFailure::Degenerate("transform is not invertible".into()))?;
        let scale = inv[(2, 2)];
        let matrix = if scale.abs() > 1e-15 { inv / scale } else { inv };
        Ok(Self { matrix })
    }
}

/// Resample `src` into a `size` grid so that `transform` maps source pixels
/// onto it (forward warp). Uses bilinear interpolation; samples that fall
/// outside the source are black.
pub fn warp_frame(
    src: &Frame,
    transform: &PerspectiveTransform,
    size: Dimensions,
) -> Result<Frame, DetectionFailure> {
    let back = transform.inverse()?;
    Ok(resample(src, &back, size))
}

/// Color version of [`warp_frame`]; the inverse is computed once.
pub fn warp_color(
    src: &ColorFrame,
    transform: &PerspectiveTransform,
    size: Dimensions,
) -> Result<ColorFrame, DetectionFailure> {
    let back = transform.inverse()?;
    Ok(ColorFrame {
        red: resample(&src.red, &back, size),
        green: resample(&src.green, &back, size),
        blue: resample(&src.blue, &back, size),
    })
}

/// Pull every output pixel from `back(x, y)` in the source.
fn resample(src: &Frame, back: &PerspectiveTransform, size: Dimensions) -> Frame {
    let (h, w) = (size.height, size.width);
    let mut out = Array2::<f32>::zeros((h, w));

    let fill_row = |row: usize, mut line: ndarray::ArrayViewMut1<f32>| {
        for col in 0..w {
            let p = back.apply(Point::new(col as f64, row as f64));
            line[col] = bilinear_sample(&src.data, p.y, p.x);
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, line)| fill_row(row, line));
    } else {
        for (row, line) in out.axis_iter_mut(Axis(0)).enumerate() {
            fill_row(row, line);
        }
    }

    Frame::new(out)
}

pub fn bilinear_sample(data: &Array2<f32>, y: f64, x: f64) -> f32 {
    if !x.is_finite() || !y.is_finite() {
        return 0.0;
    }
    let (h, w) = data.dim();

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = (x - x0 as f64) as f32;
    let fy = (y - y0 as f64) as f32;

    let sample = |r: i64, c: i64| -> f32 {
        if r >= 0 && r < h as i64 && c >= 0 && c < w as i64 {
            data[[r as usize, c as usize]]
        } else {
            0.0
        }
    };

    let v00 = sample(y0, x0);
    let v10 = sample(y0, x1);
    let v01 = sample(y1, x0);
    let v11 = sample(y1, x1);

    v00 * (1.0 - fx) * (1.0 - fy) + v10 * fx * (1.0 - fy) + v01 * (1.0 - fx) * fy + v11 * fx * fy
}
