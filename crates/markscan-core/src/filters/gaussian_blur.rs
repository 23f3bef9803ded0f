use ndarray::{Array2, Axis};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::Frame;

/// Apply Gaussian blur to a frame using separable 1D convolution.
pub fn gaussian_blur(frame: &Frame, sigma: f32) -> Frame {
    Frame::new(gaussian_blur_array(&frame.data, sigma))
}

/// Apply Gaussian blur to a raw array.
///
/// A non-positive sigma returns the input unchanged.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    if sigma <= 0.0 || data.is_empty() {
        return data.clone();
    }
    let kernel = make_gaussian_kernel(sigma);
    let row_pass = convolve(data, &kernel, Axis(1));
    convolve(&row_pass, &kernel, Axis(0))
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let s2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..2 * radius + 1)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-x * x / s2).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Convolve along `axis` (Axis(1) = along rows, Axis(0) = along columns),
/// clamping at the borders.
fn convolve(data: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;

    let tap = |row: usize, col: usize| -> f32 {
        kernel
            .iter()
            .enumerate()
            .map(|(ki, &kv)| {
                let offset = ki as isize - radius;
                let v = if axis == Axis(1) {
                    let c = (col as isize + offset).clamp(0, w as isize - 1) as usize;
                    data[[row, c]]
                } else {
                    let r = (row as isize + offset).clamp(0, h as isize - 1) as usize;
                    data[[r, col]]
                };
                v * kv
            })
            .sum()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut out)| {
                for col in 0..w {
                    out[col] = tap(row, col);
                }
            });
    } else {
        for ((row, col), out) in result.indexed_iter_mut() {
            *out = tap(row, col);
        }
    }
    result
}
