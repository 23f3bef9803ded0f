//! Bubble grid: segmentation, response classification and grading.

pub mod classify;
pub mod grade;
pub mod segment;

pub use classify::{
    apply_blank_policy, cell_intensities, classify_responses, BlankRowPolicy, BlankRowConfig,
};
pub use grade::{grade, AnswerKey, GradeResult};
pub use segment::{split_grid, GridCell};
