use thiserror::Error;

#[derive(Error, Debug)]
pub enum OmrError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Frame source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, OmrError>;

/// Why a single frame could not be graded.
///
/// Recovered per frame: the pipeline renders blank diagnostics and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionFailure {
    #[error("found {found} quadrilateral(s), need a sheet and a grade box")]
    NotEnoughQuadrilaterals { found: usize },

    #[error("degenerate quadrilateral: {0}")]
    Degenerate(String),
}
