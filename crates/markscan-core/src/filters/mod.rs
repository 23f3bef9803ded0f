pub mod gaussian_blur;
pub mod threshold;

pub use gaussian_blur::{gaussian_blur, gaussian_blur_array};
pub use threshold::{binarize_inverse, compute_threshold, otsu_threshold, ThresholdMethod};
