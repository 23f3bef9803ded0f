use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::frame::ColorFrame;
use crate::io::image_io::{color_frame_from_rgb, rgb_from_color_frame};

/// Tile panels into a grid, `columns` per row, each scaled to `scale` times
/// the size of the first panel. Empty cells stay black.
pub fn build_montage(panels: &[&ColorFrame], columns: usize, scale: f32) -> ColorFrame {
    let Some(first) = panels.first() else {
        return ColorFrame::blank(0, 0);
    };
    let columns = columns.max(1);
    let rows = panels.len().div_ceil(columns);

    let panel_w = ((first.width() as f32 * scale).round() as u32).max(1);
    let panel_h = ((first.height() as f32 * scale).round() as u32).max(1);

    let mut canvas = RgbImage::new(panel_w * columns as u32, panel_h * rows as u32);
    for (i, panel) in panels.iter().enumerate() {
        let tile = imageops::resize(
            &rgb_from_color_frame(panel),
            panel_w,
            panel_h,
            FilterType::Triangle,
        );
        let x = (i % columns) as i64 * panel_w as i64;
        let y = (i / columns) as i64 * panel_h as i64;
        imageops::replace(&mut canvas, &tile, x, y);
    }

    color_frame_from_rgb(&canvas)
}
