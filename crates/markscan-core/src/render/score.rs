//! Seven-segment rendering of the percentage score.
//!
//! Keeps the renderer free of font files: digits are built from filled
//! rectangles and the percent sign from two blocks and a thick diagonal.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Segment bits, `a` (top) through `g` (middle) as bits 0..=6.
const DIGIT_SEGMENTS: [u8; 10] = [
    0b011_1111, // 0: a b c d e f
    0b000_0110, // 1: b c
    0b101_1011, // 2: a b d e g
    0b100_1111, // 3: a b c d g
    0b110_0110, // 4: b c f g
    0b110_1101, // 5: a c d f g
    0b111_1101, // 6: a c d e f g
    0b000_0111, // 7: a b c
    0b111_1111, // 8
    0b110_1111, // 9: a b c d f g
];

/// Text height as a fraction of the canvas height.
const TEXT_HEIGHT_FRACTION: f32 = 0.6;
/// Glyph width relative to glyph height.
const GLYPH_ASPECT: f32 = 0.5;

/// Write `NN%` centred on the canvas.
pub fn draw_score(canvas: &mut RgbImage, percent: u32, color: Rgb<u8>) {
    let text = format!("{percent}%");
    let glyph_h = ((canvas.height() as f32 * TEXT_HEIGHT_FRACTION) as i32).max(5);
    let glyph_w = ((glyph_h as f32 * GLYPH_ASPECT) as i32).max(3);
    let gap = (glyph_w / 4).max(1);
    let stroke = (glyph_h / 8).max(1);

    let count = text.chars().count() as i32;
    let total_w = count * glyph_w + (count - 1) * gap;
    let mut x = (canvas.width() as i32 - total_w) / 2;
    let y = (canvas.height() as i32 - glyph_h) / 2;

    for ch in text.chars() {
        match ch.to_digit(10) {
            Some(d) => draw_digit(canvas, d as usize, x, y, glyph_w, glyph_h, stroke, color),
            None => draw_percent(canvas, x, y, glyph_w, glyph_h, stroke, color),
        }
        x += glyph_w + gap;
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_digit(
    canvas: &mut RgbImage,
    digit: usize,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    t: i32,
    color: Rgb<u8>,
) {
    let half = h / 2;
    let segments = [
        (x, y, w, t), // a
        (x + w - t, y, t, half), // b
        (x + w - t, y + half, t, h - half), // c
        (x, y + h - t, w, t), // d
        (x, y + half, t, h - half), // e
        (x, y, t, half), // f
        (x, y + half - t / 2, w, t), // g
    ];
    let bits = DIGIT_SEGMENTS[digit % 10];
    for (i, &(sx, sy, sw, sh)) in segments.iter().enumerate() {
        if bits & (1 << i) != 0 {
            fill(canvas, sx, sy, sw, sh, color);
        }
    }
}

fn draw_percent(canvas: &mut RgbImage, x: i32, y: i32, w: i32, h: i32, t: i32, color: Rgb<u8>) {
    let block = (w / 3).max(1);
    fill(canvas, x, y, block, block, color);
    fill(canvas, x + w - block, y + h - block, block, block, color);
    for offset in 0..t {
        let dx = (offset - t / 2) as f32;
        draw_line_segment_mut(
            canvas,
            ((x + w) as f32 + dx, y as f32),
            (x as f32 + dx, (y + h) as f32),
            color,
        );
    }
}

fn fill(canvas: &mut RgbImage, x: i32, y: i32, w: i32, h: i32, color: Rgb<u8>) {
    if w > 0 && h > 0 {
        draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(w as u32, h as u32), color);
    }
}
