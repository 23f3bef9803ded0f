use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{OmrError, Result};

/// Correct choice index for every question. Validated on construction and
/// never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerKey(Vec<usize>);

impl AnswerKey {
    /// Build a key for a sheet with `choices` bubbles per question.
    pub fn new(answers: Vec<usize>, choices: usize) -> Result<Self> {
        if answers.is_empty() {
            return Err(OmrError::Configuration("answer key is empty".into()));
        }
        if let Some((q, &a)) = answers.iter().enumerate().find(|&(_, &a)| a >= choices) {
            return Err(OmrError::Configuration(format!(
                "answer for question {} is choice {a}, but the sheet only has {choices} choices",
                q + 1
            )));
        }
        Ok(Self(answers))
    }

    pub fn answers(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Outcome of grading one sheet.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GradeResult {
    /// Per question: did the response match the key?
    pub correctness: Vec<bool>,
    pub correct: usize,
    /// Percentage in [0, 100].
    pub score: f64,
}

impl GradeResult {
    pub fn questions(&self) -> usize {
        self.correctness.len()
    }

    /// Score truncated toward zero, as shown on the sheet.
    pub fn display_percent(&self) -> u32 {
        self.score.trunc() as u32
    }

    pub fn all_correct(&self) -> bool {
        self.correct == self.questions()
    }
}

/// Compare responses against the key. Unanswered questions are incorrect.
///
/// The key decides the question count: a question with no response entry
/// is graded as unanswered and responses past the end of the key are
/// ignored.
pub fn grade(responses: &[Option<usize>], key: &AnswerKey) -> GradeResult {
    if responses.len() != key.len() {
        warn!(
            responses = responses.len(),
            questions = key.len(),
            "Response count does not match the answer key"
        );
    }

    let correctness: Vec<bool> = key
        .answers()
        .iter()
        .enumerate()
        .map(|(q, &answer)| responses.get(q).copied().flatten() == Some(answer))
        .collect();
    let correct = correctness.iter().filter(|&&ok| ok).count();
    let score = if correctness.is_empty() {
        0.0
    } else {
        correct as f64 / correctness.len() as f64 * 100.0
    };

    debug!(correct, total = correctness.len(), score, "Sheet graded");

    GradeResult {
        correctness,
        correct,
        score,
    }
}
