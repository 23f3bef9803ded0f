use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::consts::{HINT_RADIUS_FRACTION, MARKER_RADIUS_FRACTION};
use crate::frame::{CanonicalQuad, Point};
use crate::grid::{AnswerKey, GradeResult, GridCell};

use super::{CORRECT_COLOR, GRID_COLOR, HINT_COLOR, INCORRECT_COLOR};

/// Mark each question's response on a rectified canvas.
///
/// The chosen bubble gets a green (correct) or red (incorrect) disc. When a
/// question is wrong or unanswered, the bubble the key expects gets a
/// smaller disc in the hint colour.
pub fn draw_answers(
    canvas: &mut RgbImage,
    cells: &[GridCell],
    choices: usize,
    responses: &[Option<usize>],
    grade: &GradeResult,
    key: &AnswerKey,
) {
    let cell_at = |q: usize, c: usize| cells.get(q * choices + c);

    for (q, (response, &answer)) in responses.iter().zip(key.answers()).enumerate() {
        let correct = grade.correctness.get(q).copied().unwrap_or(false);

        if let Some(cell) = response.and_then(|c| cell_at(q, c)) {
            let color = if correct { CORRECT_COLOR } else { INCORRECT_COLOR };
            draw_disc(canvas, cell, MARKER_RADIUS_FRACTION, color);
        }
        if !correct {
            if let Some(cell) = cell_at(q, answer) {
                draw_disc(canvas, cell, HINT_RADIUS_FRACTION, HINT_COLOR);
            }
        }
    }
}

/// Outline every cell boundary.
pub fn draw_grid(canvas: &mut RgbImage, cells: &[GridCell]) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);

    let mut xs: Vec<usize> = cells.iter().map(|c| c.x).collect();
    let mut ys: Vec<usize> = cells.iter().map(|c| c.y).collect();
    xs.sort_unstable();
    xs.dedup();
    ys.sort_unstable();
    ys.dedup();

    for &x in xs.iter().skip(1) {
        draw_line_segment_mut(canvas, (x as f32, 0.0), (x as f32, h - 1.0), GRID_COLOR);
    }
    for &y in ys.iter().skip(1) {
        draw_line_segment_mut(canvas, (0.0, y as f32), (w - 1.0, y as f32), GRID_COLOR);
    }
}

/// Trace closed contours as one-pixel polylines.
pub fn draw_contours(canvas: &mut RgbImage, contours: &[Vec<Point>], color: Rgb<u8>) {
    for contour in contours {
        if contour.len() < 2 {
            continue;
        }
        for (a, b) in contour.iter().zip(contour.iter().cycle().skip(1)) {
            draw_line_segment_mut(
                canvas,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                color,
            );
        }
    }
}

/// Dot each corner of a located quadrilateral.
pub fn draw_corners(canvas: &mut RgbImage, quad: &CanonicalQuad, radius: i32, color: Rgb<u8>) {
    for p in quad.to_array() {
        draw_filled_circle_mut(canvas, (p.x.round() as i32, p.y.round() as i32), radius, color);
    }
}

fn draw_disc(canvas: &mut RgbImage, cell: &GridCell, fraction: f32, color: Rgb<u8>) {
    let (cx, cy) = cell.center();
    let radius = (cell.width.min(cell.height) as f32 * fraction).round().max(1.0) as i32;
    draw_filled_circle_mut(canvas, (cx as i32, cy as i32), radius, color);
}
