//! Frame sources and sinks around the pure grading pipeline.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{OmrError, Result};
use crate::frame::{ColorFrame, Dimensions};
use crate::pipeline::FrameReport;

use super::image_io::{load_resized, save_color_image};

/// Supplies frames to the grading loop.
pub trait FrameSource {
    /// Next frame, or [`OmrError::SourceUnavailable`] once the source is
    /// exhausted or broken. The loop stops on that error.
    fn next_frame(&mut self) -> Result<ColorFrame>;
}

/// Receives every processed frame for presentation.
pub trait FrameSink {
    fn present(&mut self, report: &FrameReport) -> Result<()>;
}

/// Persists a composited result on request.
pub trait ResultStore {
    /// Write the composite; returns where it went.
    fn save(&mut self, composite: &ColorFrame) -> Result<PathBuf>;
}

/// A still image, decoded and resized once, handed out a fixed number of
/// times (or forever).
pub struct ImageFileSource {
    path: PathBuf,
    size: Dimensions,
    remaining: Option<usize>,
    cached: Option<ColorFrame>,
}

impl ImageFileSource {
    /// Yield the image once.
    pub fn new(path: impl Into<PathBuf>, size: Dimensions) -> Self {
        Self::repeating(path, size, Some(1))
    }

    /// Yield the image `count` times; `None` repeats until the caller stops.
    pub fn repeating(path: impl Into<PathBuf>, size: Dimensions, count: Option<usize>) -> Self {
        Self {
            path: path.into(),
            size,
            remaining: count,
            cached: None,
        }
    }
}

impl FrameSource for ImageFileSource {
    fn next_frame(&mut self) -> Result<ColorFrame> {
        if self.remaining == Some(0) {
            return Err(OmrError::SourceUnavailable(format!(
                "{} has no more frames",
                self.path.display()
            )));
        }

        let frame = match &self.cached {
            Some(frame) => frame.clone(),
            None => {
                let frame = load_resized(&self.path, self.size).map_err(|e| {
                    OmrError::SourceUnavailable(format!(
                        "cannot read image at {}: {e}",
                        self.path.display()
                    ))
                })?;
                debug!(path = %self.path.display(), size = %self.size, "Image decoded");
                self.cached = Some(frame.clone());
                frame
            }
        };

        if let Some(n) = self.remaining.as_mut() {
            *n -= 1;
        }
        Ok(frame)
    }
}

/// Writes the composite to one fixed path, overwriting on each save.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResultStore for FileStore {
    fn save(&mut self, composite: &ColorFrame) -> Result<PathBuf> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        save_color_image(composite, &self.path)?;
        info!(path = %self.path.display(), "Result image saved");
        Ok(self.path.clone())
    }
}

/// Headless stand-in for a display window: writes the diagnostics montage
/// of every presented frame to one path, or does nothing without a path.
pub struct FileSink {
    montage_path: Option<PathBuf>,
    scale: f32,
}

impl FileSink {
    pub fn new(montage_path: Option<PathBuf>, scale: f32) -> Self {
        Self {
            montage_path,
            scale,
        }
    }
}

impl FrameSink for FileSink {
    fn present(&mut self, report: &FrameReport) -> Result<()> {
        if let Some(path) = &self.montage_path {
            save_color_image(&report.diagnostics.montage(self.scale), path)?;
            debug!(path = %path.display(), "Diagnostics montage written");
        }
        Ok(())
    }
}
