use image::RgbImage;
use tracing::{debug, info, warn};

use crate::color::{composite_add, luminance};
use crate::detection::{extract_edges, find_quadrilaterals, normalize_corners, QuadDetection};
use crate::error::{DetectionFailure, Result};
use crate::filters::{binarize_inverse, compute_threshold};
use crate::frame::{ColorFrame, Dimensions};
use crate::geometry::{warp_color, PerspectiveTransform};
use crate::grid::{
    apply_blank_policy, cell_intensities, classify_responses, grade, split_grid, AnswerKey,
};
use crate::io::image_io::{color_frame_from_rgb, frame_from_mask, rgb_from_color_frame};
use crate::render::{
    draw_answers, draw_contours, draw_corners, draw_grid, draw_score, CONTOUR_COLOR,
    GRADE_BOX_CORNER_COLOR, SCORE_COLOR, SHEET_CORNER_COLOR,
};

use super::config::GradingConfig;
use super::types::{
    Diagnostics, FrameReport, GradedSheet, NoOpReporter, PipelineStage, ProgressReporter,
};

/// Corner dot radius in the "biggest contour" diagnostic panel.
const CORNER_DOT_RADIUS: i32 = 10;

/// A validated grading setup. Build once, then feed it frames.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: GradingConfig,
    key: AnswerKey,
}

/// Products of a successful pass over one sheet.
struct SheetPass {
    sheet: GradedSheet,
    composite: ColorFrame,
    located: ColorFrame,
    threshold: ColorFrame,
    warped: ColorFrame,
}

impl Pipeline {
    /// Validate `config`; configuration errors surface here, never per frame.
    pub fn new(config: GradingConfig) -> Result<Self> {
        let key = config.validate()?;
        info!(
            questions = config.questions,
            choices = config.choices,
            sheet = %config.sheet_size,
            grade_box = %config.grade_box_size,
            "Grading pipeline ready"
        );
        Ok(Self { config, key })
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    pub fn answer_key(&self) -> &AnswerKey {
        &self.key
    }

    /// Grade one frame.
    pub fn process(&self, frame: &ColorFrame) -> FrameReport {
        self.process_reported(frame, &NoOpReporter)
    }

    /// Grade one frame, reporting each stage.
    ///
    /// A sheet that cannot be located is not an error: the report carries
    /// the failure, blank panels for the later stages, and the input frame
    /// as its composite.
    pub fn process_reported(
        &self,
        frame: &ColorFrame,
        reporter: &dyn ProgressReporter,
    ) -> FrameReport {
        reporter.begin_stage(PipelineStage::EdgeDetection);
        let edge_map = extract_edges(frame, &self.config.edges);
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::QuadDetection);
        let detection = find_quadrilaterals(&edge_map.edges, &self.config.detection);
        reporter.finish_stage();

        let mut contours_rgb = rgb_from_color_frame(frame);
        draw_contours(&mut contours_rgb, &detection.contours, CONTOUR_COLOR);

        let gray = ColorFrame::from_gray(&edge_map.gray);
        let edges = ColorFrame::from_gray(&frame_from_mask(&edge_map.edges));
        let contours = color_frame_from_rgb(&contours_rgb);

        match self.grade_sheet(frame, &detection, reporter) {
            Ok(pass) => {
                info!(
                    score = pass.sheet.grade.score,
                    correct = pass.sheet.grade.correct,
                    questions = self.config.questions,
                    "Frame graded"
                );
                FrameReport {
                    diagnostics: Diagnostics {
                        original: frame.clone(),
                        gray,
                        edges,
                        contours,
                        located: pass.located,
                        threshold: pass.threshold,
                        warped: pass.warped,
                        result: pass.composite.clone(),
                    },
                    outcome: Ok(pass.sheet),
                    composite: pass.composite,
                }
            }
            Err(failure) => {
                warn!(%failure, "Sheet not located; rendering blank panels");
                let blank = ColorFrame::blank(frame.width(), frame.height());
                FrameReport {
                    diagnostics: Diagnostics {
                        original: frame.clone(),
                        gray,
                        edges,
                        contours,
                        located: blank.clone(),
                        threshold: blank.clone(),
                        warped: blank.clone(),
                        result: blank,
                    },
                    outcome: Err(failure),
                    composite: frame.clone(),
                }
            }
        }
    }

    fn grade_sheet(
        &self,
        frame: &ColorFrame,
        detection: &QuadDetection,
        reporter: &dyn ProgressReporter,
    ) -> std::result::Result<SheetPass, DetectionFailure> {
        let cfg = &self.config;
        let frame_size = Dimensions::new(frame.width(), frame.height());

        let (sheet_quad, grade_quad) = detection.sheet_and_grade_box().ok_or(
            DetectionFailure::NotEnoughQuadrilaterals {
                found: detection.quads.len(),
            },
        )?;
        let sheet = normalize_corners(&sheet_quad.points);
        let grade_box = normalize_corners(&grade_quad.points);
        debug!(?sheet, ?grade_box, "Corners normalized");

        reporter.begin_stage(PipelineStage::Rectification);
        let to_sheet = PerspectiveTransform::to_rectangle(&sheet, cfg.sheet_size)?;
        let warped = warp_color(frame, &to_sheet, cfg.sheet_size)?;
        let back_from_sheet = PerspectiveTransform::from_rectangle(cfg.sheet_size, &sheet)?;
        let back_from_grade = PerspectiveTransform::from_rectangle(cfg.grade_box_size, &grade_box)?;
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::Thresholding);
        let warped_gray = luminance(&warped);
        let threshold = compute_threshold(&warped_gray.data, &cfg.binarize);
        let mask = binarize_inverse(&warped_gray.data, threshold);
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::Segmentation);
        let cells = split_grid(
            cfg.sheet_size.width,
            cfg.sheet_size.height,
            cfg.questions,
            cfg.choices,
        );
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::Classification);
        let intensities = cell_intensities(&mask, &cells, cfg.questions, cfg.choices);
        let selected = classify_responses(&intensities);
        let responses = apply_blank_policy(&intensities, &cells, &selected, &cfg.blank_rows);
        reporter.finish_stage();
        debug!(?selected, ?responses, "Responses classified");

        reporter.begin_stage(PipelineStage::Grading);
        let result = grade(&responses, &self.key);
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::Rendering);
        let mut warped_rgb = rgb_from_color_frame(&warped);
        draw_answers(&mut warped_rgb, &cells, cfg.choices, &responses, &result, &self.key);
        draw_grid(&mut warped_rgb, &cells);

        let mut answers_rgb =
            RgbImage::new(cfg.sheet_size.width as u32, cfg.sheet_size.height as u32);
        draw_answers(&mut answers_rgb, &cells, cfg.choices, &responses, &result, &self.key);

        let mut score_rgb =
            RgbImage::new(cfg.grade_box_size.width as u32, cfg.grade_box_size.height as u32);
        draw_score(&mut score_rgb, result.display_percent(), SCORE_COLOR);

        let mut located_rgb = rgb_from_color_frame(frame);
        draw_corners(&mut located_rgb, &sheet, CORNER_DOT_RADIUS, SHEET_CORNER_COLOR);
        draw_corners(&mut located_rgb, &grade_box, CORNER_DOT_RADIUS, GRADE_BOX_CORNER_COLOR);
        reporter.finish_stage();

        reporter.begin_stage(PipelineStage::Compositing);
        let answers_overlay = warp_color(
            &color_frame_from_rgb(&answers_rgb),
            &back_from_sheet,
            frame_size,
        )?;
        let score_overlay = warp_color(
            &color_frame_from_rgb(&score_rgb),
            &back_from_grade,
            frame_size,
        )?;
        let composite = composite_add(&composite_add(frame, &answers_overlay), &score_overlay);
        reporter.finish_stage();

        Ok(SheetPass {
            sheet: GradedSheet {
                sheet,
                grade_box,
                threshold,
                intensities,
                selected,
                responses,
                grade: result,
            },
            composite,
            located: color_frame_from_rgb(&located_rgb),
            threshold: ColorFrame::from_gray(&frame_from_mask(&mask)),
            warped: color_frame_from_rgb(&warped_rgb),
        })
    }
}
