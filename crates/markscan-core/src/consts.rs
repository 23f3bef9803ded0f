/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of histogram bins for Otsu's thresholding.
pub const OTSU_HISTOGRAM_BINS: usize = 256;

/// Determinant magnitude below which a 4-point system is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Default size every input frame is resized to before processing.
pub const DEFAULT_FRAME_WIDTH: usize = 700;
pub const DEFAULT_FRAME_HEIGHT: usize = 700;

/// Default rectified answer-sheet size.
pub const DEFAULT_SHEET_WIDTH: usize = 700;
pub const DEFAULT_SHEET_HEIGHT: usize = 700;

/// Default rectified grade-box size.
pub const DEFAULT_GRADE_BOX_WIDTH: usize = 325;
pub const DEFAULT_GRADE_BOX_HEIGHT: usize = 150;

/// Default sheet layout.
pub const DEFAULT_QUESTIONS: usize = 5;
pub const DEFAULT_CHOICES: usize = 5;
pub const DEFAULT_ANSWER_KEY: [usize; 5] = [1, 2, 0, 2, 4];

/// Gaussian blur sigma applied before edge detection.
pub const DEFAULT_EDGE_BLUR_SIGMA: f32 = 1.0;

/// Canny hysteresis thresholds, on the 8-bit gradient scale.
pub const DEFAULT_CANNY_LOW: f32 = 10.0;
pub const DEFAULT_CANNY_HIGH: f32 = 70.0;

/// 3x3 dilation passes applied to the edge map to close small gaps.
pub const DEFAULT_EDGE_DILATE_ITERATIONS: usize = 1;

/// Minimum contour area (square pixels) for a quadrilateral candidate.
pub const DEFAULT_MIN_QUAD_AREA: f64 = 50.0;

/// Polygon approximation epsilon as a fraction of the contour perimeter.
pub const DEFAULT_POLY_EPSILON: f64 = 0.02;

/// Inverse-binarization threshold (170 on the 8-bit scale).
pub const DEFAULT_BINARIZE_THRESHOLD: f32 = 170.0 / 255.0;

/// Rows in which no cell has more than this fraction of its area marked are
/// blank. A filled bubble covers roughly a third of its cell; a printed box
/// outline crossing the outer cells stays well under a tenth.
pub const DEFAULT_MIN_FILL: f32 = 0.15;

/// Scale of each panel in the diagnostics montage.
pub const DEFAULT_MONTAGE_SCALE: f32 = 0.5;

/// Answer marker radius as a fraction of the smaller cell side.
pub const MARKER_RADIUS_FRACTION: f32 = 0.3;

/// Radius of the hint marker drawn on the correct cell of a wrong answer,
/// as a fraction of the smaller cell side.
pub const HINT_RADIUS_FRACTION: f32 = 0.15;
