use serde::Serialize;

/// One bubble region of the rectified sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub question: usize,
    pub choice: usize,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl GridCell {
    /// Centre of the cell in rectified pixel coordinates.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Partition a `width x height` image into `questions x choices` cells.
///
/// Column `c` spans `[floor(c*W/choices), floor((c+1)*W/choices))`, rows
/// likewise, so the cells tile the image exactly even when the sides do not
/// divide evenly. Cells come back question-major.
pub fn split_grid(width: usize, height: usize, questions: usize, choices: usize) -> Vec<GridCell> {
    if questions == 0 || choices == 0 {
        return Vec::new();
    }
    let cols = boundaries(width, choices);
    let rows = boundaries(height, questions);

    let mut cells = Vec::with_capacity(questions * choices);
    for question in 0..questions {
        for choice in 0..choices {
            cells.push(GridCell {
                question,
                choice,
                x: cols[choice],
                y: rows[question],
                width: cols[choice + 1] - cols[choice],
                height: rows[question + 1] - rows[question],
            });
        }
    }
    cells
}

/// `parts + 1` floor boundaries from 0 to `length` inclusive.
fn boundaries(length: usize, parts: usize) -> Vec<usize> {
    (0..=parts).map(|i| i * length / parts).collect()
}
