//! Questions and the category board.
//!
//! The board is an ordered list of categories, each an ordered list of
//! questions. The usual shape is 5 categories × 6 questions but any shape is
//! accepted, including ragged ones.

use serde::{Deserialize, Serialize};

/// Number of answer options per question.
pub const OPTION_COUNT: usize = 4;

/// Position of a question on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionRef {
    pub category: usize,
    pub question: usize,
}

impl QuestionRef {
    #[must_use]
    pub const fn new(category: usize, question: usize) -> Self {
        Self { category, question }
    }
}

impl std::fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.category, self.question)
    }
}

/// A multiple-choice question worth `points`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub category: String,
    pub points: u32,
    pub text: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer_index: usize,
    #[serde(default)]
    pub answered: bool,
}

impl Question {
    /// Create an unanswered question.
    pub fn new(
        category: impl Into<String>,
        points: u32,
        text: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_answer_index: usize,
    ) -> Self {
        Self {
            category: category.into(),
            points,
            text: text.into(),
            options,
            correct_answer_index,
            answered: false,
        }
    }
}

/// The grid of categories and their questions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    categories: Vec<Vec<Question>>,
}

impl Board {
    /// Build a board from already-grouped categories.
    pub fn new(categories: Vec<Vec<Question>>) -> Self {
        Self { categories }
    }

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Vec<Question>] {
        &self.categories
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Look up a question; `None` if the cell does not exist.
    #[must_use]
    pub fn get(&self, at: QuestionRef) -> Option<&Question> {
        self.categories.get(at.category)?.get(at.question)
    }

    pub fn get_mut(&mut self, at: QuestionRef) -> Option<&mut Question> {
        self.categories.get_mut(at.category)?.get_mut(at.question)
    }

    /// Total number of questions across all categories.
    ///
    /// Recomputed on every call so a ragged or hand-edited board still
    /// reports its real size.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Number of questions flagged as answered.
    #[must_use]
    pub fn answered_questions(&self) -> usize {
        self.categories
            .iter()
            .flatten()
            .filter(|q| q.answered)
            .count()
    }

    /// Questions per category, in order.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        self.categories.iter().map(Vec::len).collect()
    }

    /// Whether the board has exactly `categories` columns of `per_category`.
    #[must_use]
    pub fn has_shape(&self, categories: usize, per_category: usize) -> bool {
        self.categories.len() == categories
            && self.categories.iter().all(|c| c.len() == per_category)
    }

    /// Render-friendly snapshot of the board.
    #[must_use]
    pub fn view(&self) -> BoardView {
        let columns = self
            .categories
            .iter()
            .map(|questions| CategoryColumn {
                title: questions
                    .first()
                    .map(|q| q.category.clone())
                    .unwrap_or_default(),
                cells: questions
                    .iter()
                    .map(|q| CellView {
                        points: q.points,
                        answered: q.answered,
                    })
                    .collect(),
            })
            .collect();
        BoardView { columns }
    }
}

/// What the UI needs to draw the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub columns: Vec<CategoryColumn>,
}

impl BoardView {
    /// Height of the tallest column.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub title: String,
    pub cells: Vec<CellView>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub points: u32,
    pub answered: bool,
}
