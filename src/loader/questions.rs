//! Question list: one `|`-separated record per line.
//!
//! ```text
//! category | points | text | option 1 | option 2 | option 3 | option 4 | correct (0-3)
//! ```
//!
//! Bad rows are skipped and reported; they never abort a load.

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::core::{Board, Question, OPTION_COUNT};
use crate::error::LoadError;

const FIELD_COUNT: usize = 8;

/// Why a row was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// Row did not have exactly eight fields.
    FieldCount(usize),
    /// Points field is not a non-negative integer.
    InvalidPoints(String),
    /// Correct-answer field is not an integer in 0..=3.
    InvalidAnswerIndex(String),
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected {FIELD_COUNT} fields, found {n}"),
            Self::InvalidPoints(raw) => write!(f, "invalid points {raw:?}"),
            Self::InvalidAnswerIndex(raw) => write!(f, "invalid answer index {raw:?}"),
        }
    }
}

/// A skipped question row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number in the source.
    pub line: usize,
    pub content: String,
    pub reason: MalformedReason,
}

impl std::fmt::Display for MalformedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.reason, self.content)
    }
}

/// Parsed board plus the rows that were skipped.
#[derive(Clone, Debug)]
pub struct QuestionSet {
    pub board: Board,
    pub malformed: Vec<MalformedRecord>,
}

impl QuestionSet {
    /// Log a warning if the board is not `categories` × `per_category`.
    ///
    /// Returns whether the shape matched.
    pub fn check_shape(&self, categories: usize, per_category: usize) -> bool {
        let ok = self.board.has_shape(categories, per_category);
        if !ok {
            warn!(
                expected_categories = categories,
                expected_per_category = per_category,
                found = ?self.board.shape(),
                "unexpected board shape"
            );
        }
        ok
    }
}

/// Parse question records into a board grouped by category.
///
/// Categories appear in the order they are first seen. Fails only when no
/// valid row remains.
pub fn parse_questions(source: &str) -> Result<QuestionSet, LoadError> {
    let mut categories: Vec<Vec<Question>> = Vec::new();
    let mut category_index: FxHashMap<String, usize> = FxHashMap::default();
    let mut malformed = Vec::new();

    for (i, line) in source.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(question) => {
                let next = categories.len();
                let index = *category_index
                    .entry(question.category.clone())
                    .or_insert(next);
                if index == next {
                    categories.push(Vec::new());
                }
                categories[index].push(question);
            }
            Err(reason) => {
                let record = MalformedRecord {
                    line: i + 1,
                    content: line.to_string(),
                    reason,
                };
                warn!(%record, "skipping malformed question");
                malformed.push(record);
            }
        }
    }

    let board = Board::new(categories);
    if board.total_questions() == 0 {
        return Err(LoadError::NoQuestions);
    }
    info!(
        categories = board.category_count(),
        total = board.total_questions(),
        skipped = malformed.len(),
        "questions loaded"
    );
    Ok(QuestionSet { board, malformed })
}

fn parse_record(line: &str) -> Result<Question, MalformedReason> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let [category, points, text, o1, o2, o3, o4, correct] = fields[..] else {
        return Err(MalformedReason::FieldCount(fields.len()));
    };

    let points: u32 = points
        .parse()
        .map_err(|_| MalformedReason::InvalidPoints(points.to_string()))?;
    let correct_answer_index = correct
        .parse::<usize>()
        .ok()
        .filter(|&i| i < OPTION_COUNT)
        .ok_or_else(|| MalformedReason::InvalidAnswerIndex(correct.to_string()))?;

    Ok(Question::new(
        category,
        points,
        text,
        [o1.into(), o2.into(), o3.into(), o4.into()],
        correct_answer_index,
    ))
}
