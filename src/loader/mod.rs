//! Team and question sources.
//!
//! Both are plain UTF-8 text. The parsers work on strings; the `*_file`
//! helpers read from disk first.

mod questions;
mod teams;

pub use questions::{parse_questions, MalformedReason, MalformedRecord, QuestionSet};
pub use teams::parse_teams;

use std::path::{Path, PathBuf};

use crate::error::LoadError;

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Where a fresh game gets its teams and questions.
pub trait GameSource {
    fn teams(&self) -> Result<Vec<String>, LoadError>;
    fn questions(&self) -> Result<QuestionSet, LoadError>;
}

/// Sources already held in memory.
#[derive(Clone, Debug, Default)]
pub struct TextSource {
    pub teams: String,
    pub questions: String,
}

impl TextSource {
    pub fn new(teams: impl Into<String>, questions: impl Into<String>) -> Self {
        Self {
            teams: teams.into(),
            questions: questions.into(),
        }
    }
}

impl GameSource for TextSource {
    fn teams(&self) -> Result<Vec<String>, LoadError> {
        parse_teams(&self.teams)
    }

    fn questions(&self) -> Result<QuestionSet, LoadError> {
        parse_questions(&self.questions)
    }
}

/// Sources read from disk when the game starts.
#[derive(Clone, Debug)]
pub struct FileSource {
    pub teams_path: PathBuf,
    pub questions_path: PathBuf,
}

impl FileSource {
    pub fn new(teams_path: impl Into<PathBuf>, questions_path: impl Into<PathBuf>) -> Self {
        Self {
            teams_path: teams_path.into(),
            questions_path: questions_path.into(),
        }
    }
}

impl GameSource for FileSource {
    fn teams(&self) -> Result<Vec<String>, LoadError> {
        load_teams_file(&self.teams_path)
    }

    fn questions(&self) -> Result<QuestionSet, LoadError> {
        load_questions_file(&self.questions_path)
    }
}

/// Read and parse a team file.
pub fn load_teams_file(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    parse_teams(&read(path.as_ref())?)
}

/// Read and parse a question file.
pub fn load_questions_file(path: impl AsRef<Path>) -> Result<QuestionSet, LoadError> {
    parse_questions(&read(path.as_ref())?)
}
