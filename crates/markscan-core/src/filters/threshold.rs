use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BINARIZE_THRESHOLD, OTSU_HISTOGRAM_BINS};

/// How the binarization threshold for the rectified sheet is chosen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ThresholdMethod {
    /// Fixed threshold in [0.0, 1.0].
    Fixed(f32),
    /// Otsu's method: maximizes between-class variance of the histogram.
    Otsu,
}

impl Default for ThresholdMethod {
    fn default() -> Self {
        Self::Fixed(DEFAULT_BINARIZE_THRESHOLD)
    }
}

impl std::fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "Fixed ({v:.3})"),
            Self::Otsu => write!(f, "Otsu"),
        }
    }
}

/// Compute the threshold value using the configured method.
pub fn compute_threshold(data: &Array2<f32>, method: &ThresholdMethod) -> f32 {
    match method {
        ThresholdMethod::Fixed(v) => *v,
        ThresholdMethod::Otsu => otsu_threshold(data),
    }
}

/// Inverted binarization: dark ink becomes foreground.
///
/// A pixel is marked when its value is at or below `threshold`.
pub fn binarize_inverse(data: &Array2<f32>, threshold: f32) -> Array2<bool> {
    data.mapv(|v| v <= threshold)
}

/// Otsu's thresholding: find the value that maximizes between-class variance.
pub fn otsu_threshold(data: &Array2<f32>) -> f32 {
    let bins = OTSU_HISTOGRAM_BINS;
    let mut histogram = vec![0u64; bins];

    for &v in data.iter() {
        let bin = ((v.clamp(0.0, 1.0) * (bins - 1) as f32).round() as usize).min(bins - 1);
        histogram[bin] += 1;
    }

    let total = data.len() as f64;
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut weight_bg = 0.0_f64;
    let mut sum_bg = 0.0_f64;
    let mut best_variance = 0.0_f64;
    let mut best_bin = 0usize;

    for (i, &count) in histogram.iter().enumerate() {
        weight_bg += count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }
        sum_bg += i as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;
        let between_variance = weight_bg * weight_fg * (mean_bg - mean_fg).powi(2);

        if between_variance > best_variance {
            best_variance = between_variance;
            best_bin = i;
        }
    }

    // Bins are rounded 8-bit levels; the winning level itself is ink under `<=`.
    best_bin as f32 / (bins - 1) as f32
}
