use log::info;
use rand::seq::SliceRandom;
use std::convert::TryFrom;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Index;
use std::path::{Path, PathBuf};

use crate::game::error::LoadError;

pub mod question;

pub use question::{ChoiceMatch, Question, RawQuestion};


/// The ordered questions of one quiz. Positions never change once a session starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<QuestionSet, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }
        Ok(QuestionSet { questions })
    }

    pub fn from_raw(raw_questions: Vec<RawQuestion>) -> Result<QuestionSet, LoadError> {
        let questions = raw_questions
            .into_iter()
            .enumerate()
            .map(|(index, raw_question)| {
                Question::try_from(raw_question).map_err(|reason| LoadError::Malformed { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;
        QuestionSet::new(questions)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<QuestionSet, LoadError> {
        let raw_questions: Vec<RawQuestion> = serde_json::from_reader(reader)?;
        QuestionSet::from_raw(raw_questions)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<QuestionSet, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut raw_questions = Vec::new();
        for question in csv_reader.deserialize() {
            let raw_question: RawQuestion = question?;
            raw_questions.push(raw_question);
        }
        QuestionSet::from_raw(raw_questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn shuffle(&mut self) {
        self.questions.shuffle(&mut rand::thread_rng());
    }
}

impl Index<usize> for QuestionSet {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

pub trait QuestionSource {
    fn fetch(&self) -> Result<QuestionSet, LoadError>;
}

/// Reads questions from a `.json` file, or from CSV for any other extension.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: &Path) -> Self {
        FileSource {
            path: path.to_path_buf(),
        }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .map_or(false, |e| e.eq_ignore_ascii_case("json"))
    }
}

impl QuestionSource for FileSource {
    fn fetch(&self) -> Result<QuestionSet, LoadError> {
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);
        let questions = if self.is_json() {
            QuestionSet::from_json_reader(reader)?
        } else {
            QuestionSet::from_csv_reader(reader)?
        };
        info!("Loaded {} questions from {:?}", questions.len(), self.path);
        Ok(questions)
    }
}
