use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANSWER_KEY, DEFAULT_CHOICES, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH,
    DEFAULT_GRADE_BOX_HEIGHT, DEFAULT_GRADE_BOX_WIDTH, DEFAULT_MONTAGE_SCALE, DEFAULT_QUESTIONS,
    DEFAULT_SHEET_HEIGHT, DEFAULT_SHEET_WIDTH,
};
use crate::detection::{EdgeConfig, QuadConfig};
use crate::error::{OmrError, Result};
use crate::filters::ThresholdMethod;
use crate::frame::Dimensions;
use crate::grid::{AnswerKey, BlankRowConfig};

/// Everything that stays fixed for a grading run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Number of question rows on the sheet.
    #[serde(default = "default_questions")]
    pub questions: usize,
    /// Number of bubbles per question.
    #[serde(default = "default_choices")]
    pub choices: usize,
    /// Correct choice index per question, 0-based.
    #[serde(default = "default_answer_key")]
    pub answer_key: Vec<usize>,
    /// Size every input frame is resized to.
    #[serde(default = "default_frame_size")]
    pub frame_size: Dimensions,
    /// Rectified answer-area size.
    #[serde(default = "default_sheet_size")]
    pub sheet_size: Dimensions,
    /// Rectified grade-box size.
    #[serde(default = "default_grade_box_size")]
    pub grade_box_size: Dimensions,
    /// Scale of each panel in the diagnostics montage.
    #[serde(default = "default_montage_scale")]
    pub montage_scale: f32,
    #[serde(default)]
    pub binarize: ThresholdMethod,
    #[serde(default)]
    pub edges: EdgeConfig,
    #[serde(default)]
    pub detection: QuadConfig,
    #[serde(default)]
    pub blank_rows: BlankRowConfig,
}

fn default_questions() -> usize {
    DEFAULT_QUESTIONS
}
fn default_choices() -> usize {
    DEFAULT_CHOICES
}
fn default_answer_key() -> Vec<usize> {
    DEFAULT_ANSWER_KEY.to_vec()
}
fn default_frame_size() -> Dimensions {
    Dimensions::new(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT)
}
fn default_sheet_size() -> Dimensions {
    Dimensions::new(DEFAULT_SHEET_WIDTH, DEFAULT_SHEET_HEIGHT)
}
fn default_grade_box_size() -> Dimensions {
    Dimensions::new(DEFAULT_GRADE_BOX_WIDTH, DEFAULT_GRADE_BOX_HEIGHT)
}
fn default_montage_scale() -> f32 {
    DEFAULT_MONTAGE_SCALE
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            questions: DEFAULT_QUESTIONS,
            choices: DEFAULT_CHOICES,
            answer_key: DEFAULT_ANSWER_KEY.to_vec(),
            frame_size: default_frame_size(),
            sheet_size: default_sheet_size(),
            grade_box_size: default_grade_box_size(),
            montage_scale: DEFAULT_MONTAGE_SCALE,
            binarize: ThresholdMethod::default(),
            edges: EdgeConfig::default(),
            detection: QuadConfig::default(),
            blank_rows: BlankRowConfig::default(),
        }
    }
}

impl GradingConfig {
    /// Check the configuration and build the answer key.
    ///
    /// Runs once before the frame loop; any problem here is fatal.
    pub fn validate(&self) -> Result<AnswerKey> {
        if self.questions == 0 || self.choices == 0 {
            return Err(config_error(format!(
                "questions and choices must be positive (got {} x {})",
                self.questions, self.choices
            )));
        }
        if self.answer_key.len() != self.questions {
            return Err(config_error(format!(
                "answer key has {} entries but the sheet has {} questions",
                self.answer_key.len(),
                self.questions
            )));
        }
        let key = AnswerKey::new(self.answer_key.clone(), self.choices)?;

        for (name, dims) in [
            ("frame_size", self.frame_size),
            ("sheet_size", self.sheet_size),
            ("grade_box_size", self.grade_box_size),
        ] {
            if dims.width == 0 || dims.height == 0 {
                return Err(config_error(format!("{name} must be non-zero (got {dims})")));
            }
        }
        if self.sheet_size.width < self.choices || self.sheet_size.height < self.questions {
            return Err(config_error(format!(
                "sheet_size {} is too small for a {} x {} grid",
                self.sheet_size, self.questions, self.choices
            )));
        }

        let edges = &self.edges;
        if !(edges.blur_sigma >= 0.0 && edges.blur_sigma.is_finite()) {
            return Err(config_error("edges.blur_sigma must be a finite value >= 0"));
        }
        if !(edges.low_threshold >= 0.0 && edges.low_threshold <= edges.high_threshold) {
            return Err(config_error(format!(
                "edge thresholds must satisfy 0 <= low <= high (got {} / {})",
                edges.low_threshold, edges.high_threshold
            )));
        }
        if !(self.detection.poly_epsilon > 0.0 && self.detection.poly_epsilon < 1.0) {
            return Err(config_error("detection.poly_epsilon must be in (0, 1)"));
        }
        if self.detection.min_area < 0.0 {
            return Err(config_error("detection.min_area must be >= 0"));
        }
        if let ThresholdMethod::Fixed(t) = self.binarize {
            if !(0.0..=1.0).contains(&t) {
                return Err(config_error(format!(
                    "fixed binarization threshold must be in [0, 1] (got {t})"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.blank_rows.min_fill) {
            return Err(config_error(format!(
                "blank_rows.min_fill must be in [0, 1) (got {})",
                self.blank_rows.min_fill
            )));
        }
        if !(self.montage_scale > 0.0 && self.montage_scale.is_finite()) {
            return Err(config_error("montage_scale must be positive"));
        }

        Ok(key)
    }
}

fn config_error(msg: impl Into<String>) -> OmrError {
    OmrError::Configuration(msg.into())
}
