use ndarray::{s, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MIN_FILL;

use super::segment::GridCell;

/// What to report for a question row in which nothing looks marked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlankRowPolicy {
    /// Report the row as unanswered; it is graded incorrect.
    #[default]
    Unanswered,
    /// Keep the classifier's pick (choice 0 on an all-zero row).
    FirstChoice,
}

impl std::fmt::Display for BlankRowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unanswered => write!(f, "Unanswered"),
            Self::FirstChoice => write!(f, "First Choice"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlankRowConfig {
    #[serde(default)]
    pub policy: BlankRowPolicy,
    /// A row is blank when none of its cells has more than this fraction
    /// of its area marked.
    #[serde(default = "default_min_fill")]
    pub min_fill: f32,
}

fn default_min_fill() -> f32 {
    DEFAULT_MIN_FILL
}

impl Default for BlankRowConfig {
    fn default() -> Self {
        Self {
            policy: BlankRowPolicy::default(),
            min_fill: DEFAULT_MIN_FILL,
        }
    }
}

/// Count marked pixels per cell into a `questions x choices` matrix.
///
/// Cells are independent, so they are counted in parallel.
pub fn cell_intensities(
    mask: &Array2<bool>,
    cells: &[GridCell],
    questions: usize,
    choices: usize,
) -> Array2<u32> {
    let counts: Vec<(usize, usize, u32)> = cells
        .par_iter()
        .map(|cell| {
            let region = mask.slice(s![
                cell.y..cell.y + cell.height,
                cell.x..cell.x + cell.width
            ]);
            let marked = region.iter().filter(|&&v| v).count() as u32;
            (cell.question, cell.choice, marked)
        })
        .collect();

    let mut matrix = Array2::<u32>::zeros((questions, choices));
    for (q, c, marked) in counts {
        matrix[[q, c]] = marked;
    }
    matrix
}

/// Pick the most intense choice of every row.
///
/// Ties go to the lowest choice index, so an all-zero row selects 0.
pub fn classify_responses(intensities: &Array2<u32>) -> Vec<usize> {
    intensities
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0usize, None::<u32>), |(best, max), (i, &v)| match max {
                    Some(m) if v <= m => (best, max),
                    _ => (i, Some(v)),
                })
                .0
        })
        .collect()
}

/// Turn raw picks into answers, blanking rows that carry no mark.
///
/// Fill is measured against each cell's own area, so the same policy holds
/// at any sheet resolution.
pub fn apply_blank_policy(
    intensities: &Array2<u32>,
    cells: &[GridCell],
    selected: &[usize],
    config: &BlankRowConfig,
) -> Vec<Option<usize>> {
    let mut marked = vec![false; selected.len()];
    for cell in cells {
        let Some(&count) = intensities.get([cell.question, cell.choice]) else {
            continue;
        };
        let fill = count as f32 / cell.area().max(1) as f32;
        if fill > config.min_fill {
            if let Some(row) = marked.get_mut(cell.question) {
                *row = true;
            }
        }
    }

    selected
        .iter()
        .zip(&marked)
        .map(|(&choice, &has_mark)| match config.policy {
            BlankRowPolicy::Unanswered if !has_mark => None,
            _ => Some(choice),
        })
        .collect()
}
