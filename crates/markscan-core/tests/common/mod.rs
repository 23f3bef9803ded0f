#![allow(dead_code)]

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut};
use imageproc::rect::Rect;

use markscan_core::frame::ColorFrame;
use markscan_core::io::image_io::color_frame_from_rgb;

pub const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
pub const INK: Rgb<u8> = Rgb([0, 0, 0]);
/// Printed bubble outline; lighter than the binarization threshold.
pub const PRINT: Rgb<u8> = Rgb([210, 210, 210]);

pub const KEY: [usize; 5] = [1, 2, 0, 2, 4];

/// Geometry of a synthetic answer sheet photographed head-on.
#[derive(Clone, Copy, Debug)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
    /// Answer box outer rectangle, `(x0, y0, x1, y1)` with exclusive ends.
    pub answer_box: (i32, i32, i32, i32),
    pub grade_box: (i32, i32, i32, i32),
    pub border: i32,
    pub questions: usize,
    pub choices: usize,
    pub bubble_radius: i32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            answer_box: (60, 60, 460, 560),
            grade_box: (500, 60, 660, 140),
            border: 4,
            questions: 5,
            choices: 5,
            bubble_radius: 28,
        }
    }
}

impl SheetLayout {
    /// Centre of bubble `(question, choice)` in image coordinates.
    pub fn bubble_center(&self, question: usize, choice: usize) -> (f64, f64) {
        let (x0, y0, x1, y1) = self.answer_box;
        let cw = (x1 - x0) as f64 / self.choices as f64;
        let ch = (y1 - y0) as f64 / self.questions as f64;
        (
            x0 as f64 + (choice as f64 + 0.5) * cw,
            y0 as f64 + (question as f64 + 0.5) * ch,
        )
    }

    /// Draw the sheet with the given filled bubble per question.
    pub fn draw(&self, marks: &[Option<usize>]) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, PAPER);
        draw_outline(&mut img, self.answer_box, self.border, INK);
        draw_outline(&mut img, self.grade_box, self.border, INK);

        for q in 0..self.questions {
            for c in 0..self.choices {
                let (cx, cy) = self.bubble_center(q, c);
                let center = (cx.round() as i32, cy.round() as i32);
                if marks.get(q).copied().flatten() == Some(c) {
                    draw_filled_circle_mut(&mut img, center, self.bubble_radius, INK);
                } else {
                    draw_hollow_circle_mut(&mut img, center, self.bubble_radius, PRINT);
                }
            }
        }
        img
    }

    pub fn frame(&self, marks: &[Option<usize>]) -> ColorFrame {
        color_frame_from_rgb(&self.draw(marks))
    }
}

/// Marks answering every question with the key.
pub fn key_marks() -> Vec<Option<usize>> {
    KEY.iter().map(|&a| Some(a)).collect()
}

/// Thick rectangular outline, `(x0, y0, x1, y1)` with exclusive ends.
pub fn draw_outline(img: &mut RgbImage, rect: (i32, i32, i32, i32), thickness: i32, color: Rgb<u8>) {
    let (x0, y0, x1, y1) = rect;
    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
    let t = thickness as u32;
    draw_filled_rect_mut(img, Rect::at(x0, y0).of_size(w, t), color);
    draw_filled_rect_mut(img, Rect::at(x0, y1 - thickness).of_size(w, t), color);
    draw_filled_rect_mut(img, Rect::at(x0, y0).of_size(t, h), color);
    draw_filled_rect_mut(img, Rect::at(x1 - thickness, y0).of_size(t, h), color);
}

/// Uniform colour frame.
pub fn flat_frame(width: u32, height: u32, color: Rgb<u8>) -> ColorFrame {
    color_frame_from_rgb(&RgbImage::from_pixel(width, height, color))
}

/// Pixel of `frame` nearest to `(x, y)`.
pub fn pixel_at(frame: &ColorFrame, x: f64, y: f64) -> [f32; 3] {
    frame.pixel(y.round() as usize, x.round() as usize)
}
