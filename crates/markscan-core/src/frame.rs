use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// A single grayscale image frame.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    /// All-black frame of the given size.
    pub fn blank(width: usize, height: usize) -> Self {
        Self::new(Array2::zeros((height, width)))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Color image composed of separate channel frames.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    /// All-black color frame, used as the placeholder when a sheet is not found.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            red: Frame::blank(width, height),
            green: Frame::blank(width, height),
            blue: Frame::blank(width, height),
        }
    }

    /// Gray color frame with all three channels equal to `frame`.
    pub fn from_gray(frame: &Frame) -> Self {
        Self {
            red: frame.clone(),
            green: frame.clone(),
            blue: frame.clone(),
        }
    }

    pub fn width(&self) -> usize {
        self.red.width()
    }

    pub fn height(&self) -> usize {
        self.red.height()
    }

    pub fn channels(&self) -> [&Frame; 3] {
        [&self.red, &self.green, &self.blue]
    }

    /// RGB triple at (row, col).
    pub fn pixel(&self, row: usize, col: usize) -> [f32; 3] {
        [
            self.red.data[[row, col]],
            self.green.data[[row, col]],
            self.blue.data[[row, col]],
        ]
    }
}

/// A point in pixel space. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A 4-vertex polygon as it came out of the detector, in contour order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quadrilateral {
    pub points: [Point; 4],
    /// Area enclosed by the source contour, in square pixels.
    pub area: f64,
}

/// Quadrilateral corners in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CanonicalQuad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl CanonicalQuad {
    /// Corners as `[top_left, top_right, bottom_left, bottom_right]`.
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Corners of an axis-aligned `width x height` rectangle at the origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            top_left: Point::new(0.0, 0.0),
            top_right: Point::new(width, 0.0),
            bottom_left: Point::new(0.0, height),
            bottom_right: Point::new(width, height),
        }
    }
}

/// Width and height of a rectified target, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
