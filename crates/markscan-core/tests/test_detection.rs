mod common;

use approx::assert_abs_diff_eq;
use image::RgbImage;

use common::{draw_outline, flat_frame, SheetLayout, INK, PAPER};
use markscan_core::detection::{
    extract_edges, find_quadrilaterals, normalize_corners, EdgeConfig, QuadConfig,
};
use markscan_core::io::image_io::color_frame_from_rgb;

// ---------------------------------------------------------------------------
// extract_edges
// ---------------------------------------------------------------------------

#[test]
fn test_flat_frame_has_no_edges() {
    let frame = flat_frame(120, 80, PAPER);
    let map = extract_edges(&frame, &EdgeConfig::default());
    assert_eq!(map.edges.dim(), (80, 120));
    assert!(map.edges.iter().all(|&e| !e));
    assert_eq!(map.gray.width(), 120);
}

#[test]
fn test_outline_produces_edges_near_border() {
    let mut img = RgbImage::from_pixel(120, 120, PAPER);
    draw_outline(&mut img, (20, 20, 100, 100), 4, INK);
    let map = extract_edges(&color_frame_from_rgb(&img), &EdgeConfig::default());

    assert!(map.edges[[60, 20]] || map.edges[[60, 19]] || map.edges[[60, 21]]);
    assert!(!map.edges[[60, 60]], "centre of the box should be edge-free");
    assert!(!map.edges[[5, 5]]);
}

// ---------------------------------------------------------------------------
// find_quadrilaterals
// ---------------------------------------------------------------------------

#[test]
fn test_blank_frame_yields_no_quadrilaterals() {
    let frame = flat_frame(200, 200, PAPER);
    let map = extract_edges(&frame, &EdgeConfig::default());
    let detection = find_quadrilaterals(&map.edges, &QuadConfig::default());
    assert!(detection.quads.is_empty());
    assert!(detection.contours.is_empty());
    assert!(detection.sheet_and_grade_box().is_none());
}

#[test]
fn test_sheet_and_grade_box_found_largest_first() {
    let layout = SheetLayout::default();
    let frame = layout.frame(&common::key_marks());
    let map = extract_edges(&frame, &EdgeConfig::default());
    let detection = find_quadrilaterals(&map.edges, &QuadConfig::default());

    assert_eq!(detection.quads.len(), 2, "bubbles sit inside the box and are skipped");
    let (sheet, grade_box) = detection.sheet_and_grade_box().unwrap();
    assert!(sheet.area > grade_box.area);
    assert!(sheet.area > 400.0 * 500.0 * 0.95);

    let s = normalize_corners(&sheet.points);
    assert_abs_diff_eq!(s.top_left.x, 60.0, epsilon = 5.0);
    assert_abs_diff_eq!(s.top_left.y, 60.0, epsilon = 5.0);
    assert_abs_diff_eq!(s.bottom_right.x, 460.0, epsilon = 5.0);
    assert_abs_diff_eq!(s.bottom_right.y, 560.0, epsilon = 5.0);

    let g = normalize_corners(&grade_box.points);
    assert_abs_diff_eq!(g.top_right.x, 660.0, epsilon = 5.0);
    assert_abs_diff_eq!(g.top_right.y, 60.0, epsilon = 5.0);
    assert_abs_diff_eq!(g.bottom_left.x, 500.0, epsilon = 5.0);
    assert_abs_diff_eq!(g.bottom_left.y, 140.0, epsilon = 5.0);
}

#[test]
fn test_small_boxes_below_min_area_are_ignored() {
    let mut img = RgbImage::from_pixel(200, 200, PAPER);
    draw_outline(&mut img, (20, 20, 180, 180), 3, INK);
    let map = extract_edges(&color_frame_from_rgb(&img), &EdgeConfig::default());

    let strict = QuadConfig {
        min_area: 200.0 * 200.0,
        ..Default::default()
    };
    assert!(find_quadrilaterals(&map.edges, &strict).quads.is_empty());
    assert_eq!(find_quadrilaterals(&map.edges, &QuadConfig::default()).quads.len(), 1);
}
