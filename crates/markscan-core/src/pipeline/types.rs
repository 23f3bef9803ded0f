use ndarray::Array2;

use crate::error::DetectionFailure;
use crate::frame::{CanonicalQuad, ColorFrame};
use crate::grid::GradeResult;
use crate::render::build_montage;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    EdgeDetection,
    QuadDetection,
    Rectification,
    Thresholding,
    Segmentation,
    Classification,
    Grading,
    Rendering,
    Compositing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EdgeDetection => write!(f, "Detecting edges"),
            Self::QuadDetection => write!(f, "Finding quadrilaterals"),
            Self::Rectification => write!(f, "Rectifying sheet"),
            Self::Thresholding => write!(f, "Thresholding"),
            Self::Segmentation => write!(f, "Splitting bubble grid"),
            Self::Classification => write!(f, "Classifying responses"),
            Self::Grading => write!(f, "Grading"),
            Self::Rendering => write!(f, "Rendering overlay"),
            Self::Compositing => write!(f, "Compositing"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started.
    fn begin_stage(&self, _stage: PipelineStage) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores every event.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// What was read off a sheet that was found and graded.
#[derive(Clone, Debug)]
pub struct GradedSheet {
    pub sheet: CanonicalQuad,
    pub grade_box: CanonicalQuad,
    /// Binarization threshold that was applied to the rectified sheet.
    pub threshold: f32,
    /// Marked-pixel count per (question, choice).
    pub intensities: Array2<u32>,
    /// Raw classifier pick per question.
    pub selected: Vec<usize>,
    /// Picks after the blank-row policy; `None` is unanswered.
    pub responses: Vec<Option<usize>>,
    pub grade: GradeResult,
}

/// Stage images for visual inspection, in montage order.
#[derive(Clone, Debug)]
pub struct Diagnostics {
    pub original: ColorFrame,
    pub gray: ColorFrame,
    pub edges: ColorFrame,
    pub contours: ColorFrame,
    pub located: ColorFrame,
    pub threshold: ColorFrame,
    pub warped: ColorFrame,
    pub result: ColorFrame,
}

impl Diagnostics {
    pub const COLUMNS: usize = 4;

    /// Panels in montage order: top row original, gray, edges, contours;
    /// bottom row located corners, threshold, warped sheet, final composite.
    pub fn panels(&self) -> [&ColorFrame; 8] {
        [
            &self.original,
            &self.gray,
            &self.edges,
            &self.contours,
            &self.located,
            &self.threshold,
            &self.warped,
            &self.result,
        ]
    }

    /// Stage images tiled two rows by four columns.
    pub fn montage(&self, scale: f32) -> ColorFrame {
        build_montage(&self.panels(), Self::COLUMNS, scale)
    }
}

/// Result of processing one frame.
#[derive(Clone, Debug)]
pub struct FrameReport {
    pub outcome: Result<GradedSheet, DetectionFailure>,
    /// The input frame with the overlay applied, or the plain input frame
    /// when no sheet was found.
    pub composite: ColorFrame,
    pub diagnostics: Diagnostics,
}

impl FrameReport {
    pub fn grade(&self) -> Option<&GradeResult> {
        self.outcome.as_ref().ok().map(|sheet| &sheet.grade)
    }

    pub fn is_graded(&self) -> bool {
        self.outcome.is_ok()
    }
}
