use imageproc::edges::canny;
use ndarray::Array2;
use tracing::debug;

use crate::color::luminance;
use crate::filters::gaussian_blur;
use crate::frame::{ColorFrame, Frame};
use crate::io::image_io::{gray_from_frame, mask_from_gray};

use super::config::EdgeConfig;
use super::morphology::dilate_n;

/// Intermediate images produced by the edge extractor.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub gray: Frame,
    pub blurred: Frame,
    /// Edge pixels after dilation.
    pub edges: Array2<bool>,
}

/// Grayscale, blur, Canny, dilate.
pub fn extract_edges(color: &ColorFrame, config: &EdgeConfig) -> EdgeMap {
    let gray = luminance(color);
    let blurred = gaussian_blur(&gray, config.blur_sigma);

    let canny_map = canny(
        &gray_from_frame(&blurred),
        config.low_threshold,
        config.high_threshold,
    );
    let edges = dilate_n(&mask_from_gray(&canny_map), config.dilate_iterations);

    debug!(
        edge_pixels = edges.iter().filter(|&&v| v).count(),
        "Edge map extracted"
    );

    EdgeMap {
        gray,
        blurred,
        edges,
    }
}
