//! Drawing: answer markers, grid lines, score text, diagnostic panels.

pub mod annotate;
pub mod montage;
pub mod score;

use image::Rgb;

pub const CORRECT_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const INCORRECT_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Marks the right bubble on a question that was answered wrong.
pub const HINT_COLOR: Rgb<u8> = Rgb([0, 128, 255]);
pub const GRID_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const SCORE_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const SHEET_CORNER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const GRADE_BOX_CORNER_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

pub use annotate::{draw_answers, draw_contours, draw_corners, draw_grid};
pub use montage::build_montage;
pub use score::draw_score;
