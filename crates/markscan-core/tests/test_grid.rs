use ndarray::{array, Array2};

use markscan_core::grid::{
    apply_blank_policy, cell_intensities, classify_responses, split_grid, BlankRowConfig,
    BlankRowPolicy,
};

// ---------------------------------------------------------------------------
// split_grid
// ---------------------------------------------------------------------------

#[test]
fn test_split_count_and_order() {
    let cells = split_grid(700, 700, 5, 5);
    assert_eq!(cells.len(), 25);
    for (i, cell) in cells.iter().enumerate() {
        assert_eq!(cell.question, i / 5);
        assert_eq!(cell.choice, i % 5);
        assert_eq!((cell.width, cell.height), (140, 140));
    }
    assert_eq!((cells[7].x, cells[7].y), (280, 140));
}

#[test]
fn test_split_tiles_uneven_sides_exactly() {
    let (w, h) = (703, 501);
    let cells = split_grid(w, h, 4, 3);
    assert_eq!(cells.len(), 12);

    let mut coverage = Array2::<u32>::zeros((h, w));
    for cell in &cells {
        for r in cell.y..cell.y + cell.height {
            for c in cell.x..cell.x + cell.width {
                coverage[[r, c]] += 1;
            }
        }
    }
    assert!(coverage.iter().all(|&n| n == 1), "cells overlap or leave gaps");

    let widths: Vec<usize> = cells[..3].iter().map(|c| c.width).collect();
    assert_eq!(widths, vec![234, 234, 235]);
    assert_eq!(cells.iter().map(|c| c.area()).sum::<usize>(), w * h);
}

#[test]
fn test_split_zero_parts_is_empty() {
    assert!(split_grid(100, 100, 0, 5).is_empty());
    assert!(split_grid(100, 100, 5, 0).is_empty());
}

#[test]
fn test_cell_center() {
    let cells = split_grid(700, 700, 5, 5);
    assert_eq!(cells[0].center(), (70.0, 70.0));
    assert_eq!(cells[24].center(), (630.0, 630.0));
}

// ---------------------------------------------------------------------------
// cell_intensities
// ---------------------------------------------------------------------------

#[test]
fn test_intensities_count_marked_pixels() {
    let mut mask = Array2::from_elem((40, 60), false);
    // question 1, choice 2 of a 2x3 grid: rows 20..40, cols 40..60
    for r in 25..30 {
        for c in 45..49 {
            mask[[r, c]] = true;
        }
    }
    mask[[0, 0]] = true;

    let cells = split_grid(60, 40, 2, 3);
    let m = cell_intensities(&mask, &cells, 2, 3);
    assert_eq!(m, array![[1u32, 0, 0], [0, 0, 20]]);
}

// ---------------------------------------------------------------------------
// classify_responses
// ---------------------------------------------------------------------------

#[test]
fn test_classify_picks_maximum() {
    let m = array![[0, 900, 10, 0, 3], [12, 0, 0, 4000, 0]];
    assert_eq!(classify_responses(&m), vec![1, 3]);
}

#[test]
fn test_classify_tie_goes_to_lowest_index() {
    let m = array![[5, 5, 3, 0, 0], [0, 2, 7, 7, 1]];
    assert_eq!(classify_responses(&m), vec![0, 2]);
}

#[test]
fn test_classify_all_zero_row_selects_first() {
    let m = Array2::<u32>::zeros((3, 4));
    assert_eq!(classify_responses(&m), vec![0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Blank rows
// ---------------------------------------------------------------------------

#[test]
fn test_blank_row_unanswered_by_default() {
    // 2 questions x 3 choices of 10x10 cells
    let cells = split_grid(30, 20, 2, 3);
    let m = array![[0, 0, 0], [0, 50, 0]];
    let selected = classify_responses(&m);
    let responses = apply_blank_policy(&m, &cells, &selected, &BlankRowConfig::default());
    assert_eq!(responses, vec![None, Some(1)]);
}

#[test]
fn test_blank_row_first_choice_keeps_pick() {
    let cells = split_grid(30, 20, 2, 3);
    let m = array![[0, 0, 0], [0, 50, 0]];
    let selected = classify_responses(&m);
    let config = BlankRowConfig {
        policy: BlankRowPolicy::FirstChoice,
        ..Default::default()
    };
    assert_eq!(
        apply_blank_policy(&m, &cells, &selected, &config),
        vec![Some(0), Some(1)]
    );
}

#[test]
fn test_faint_edge_ink_does_not_count_as_a_mark() {
    // a border stroke along the outer cells, no bubble filled in row 0
    let cells = split_grid(30, 20, 2, 3);
    let m = array![[12, 0, 10], [10, 40, 0]];
    let selected = classify_responses(&m);
    let responses = apply_blank_policy(&m, &cells, &selected, &BlankRowConfig::default());
    assert_eq!(responses, vec![None, Some(1)]);
}

#[test]
fn test_blank_row_fill_scales_with_cell_area() {
    let m = array![[30, 0], [0, 0]];
    let selected = classify_responses(&m);
    let config = BlankRowConfig::default();

    // 30 of 100 pixels marked
    let small = split_grid(20, 20, 2, 2);
    assert_eq!(apply_blank_policy(&m, &small, &selected, &config)[0], Some(0));

    // 30 of 10000 pixels marked
    let large = split_grid(200, 200, 2, 2);
    assert_eq!(apply_blank_policy(&m, &large, &selected, &config)[0], None);
}

#[test]
fn test_zero_min_fill_counts_any_pixel() {
    let cells = split_grid(20, 20, 2, 2);
    let m = array![[0, 1], [0, 0]];
    let selected = classify_responses(&m);
    let config = BlankRowConfig {
        policy: BlankRowPolicy::Unanswered,
        min_fill: 0.0,
    };
    assert_eq!(
        apply_blank_policy(&m, &cells, &selected, &config),
        vec![Some(1), None]
    );
}

#[test]
fn test_blank_row_policy_display() {
    assert_eq!(format!("{}", BlankRowPolicy::Unanswered), "Unanswered");
    assert_eq!(format!("{}", BlankRowPolicy::FirstChoice), "First Choice");
    assert_eq!(BlankRowPolicy::default(), BlankRowPolicy::Unanswered);
}
