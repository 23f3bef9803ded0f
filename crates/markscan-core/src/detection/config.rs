use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEFAULT_EDGE_BLUR_SIGMA, DEFAULT_EDGE_DILATE_ITERATIONS,
    DEFAULT_MIN_QUAD_AREA, DEFAULT_POLY_EPSILON,
};

/// Parameters of the edge extractor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Gaussian blur sigma applied to the grayscale frame before Canny.
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    /// Canny low hysteresis threshold (8-bit gradient scale).
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f32,
    /// Canny high hysteresis threshold (8-bit gradient scale).
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f32,
    /// Number of 3x3 dilation passes over the edge map.
    #[serde(default = "default_dilate_iterations")]
    pub dilate_iterations: usize,
}

fn default_blur_sigma() -> f32 {
    DEFAULT_EDGE_BLUR_SIGMA
}
fn default_low_threshold() -> f32 {
    DEFAULT_CANNY_LOW
}
fn default_high_threshold() -> f32 {
    DEFAULT_CANNY_HIGH
}
fn default_dilate_iterations() -> usize {
    DEFAULT_EDGE_DILATE_ITERATIONS
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            blur_sigma: DEFAULT_EDGE_BLUR_SIGMA,
            low_threshold: DEFAULT_CANNY_LOW,
            high_threshold: DEFAULT_CANNY_HIGH,
            dilate_iterations: DEFAULT_EDGE_DILATE_ITERATIONS,
        }
    }
}

/// Parameters of the quadrilateral detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadConfig {
    /// Minimum contour area in square pixels.
    #[serde(default = "default_min_area")]
    pub min_area: f64,
    /// Douglas-Peucker epsilon as a fraction of the contour perimeter.
    #[serde(default = "default_poly_epsilon")]
    pub poly_epsilon: f64,
}

fn default_min_area() -> f64 {
    DEFAULT_MIN_QUAD_AREA
}
fn default_poly_epsilon() -> f64 {
    DEFAULT_POLY_EPSILON
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            min_area: DEFAULT_MIN_QUAD_AREA,
            poly_epsilon: DEFAULT_POLY_EPSILON,
        }
    }
}
