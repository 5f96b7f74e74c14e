use itertools::Itertools;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::game::quiz::definition::{Question, QuestionSet};

mod feedback;

pub use feedback::{FeedbackTier, FeedbackTiers};


const MESSAGE_ZERO: &str = "You scored zero. Better luck next time!";
const MESSAGE_LOW: &str = "You need more practice. Keep trying!";
const MESSAGE_MID: &str = "You're getting there. Keep up the good work!";
const MESSAGE_HIGH: &str = "Congratulations! You did great!";

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPolicy {
    SimpleCount,
    NetScore,
    ExcludeReviewed,
    CorrectOnly,
}

impl ScoringPolicy {
    pub const ALL: [ScoringPolicy; 4] = [
        ScoringPolicy::SimpleCount,
        ScoringPolicy::NetScore,
        ScoringPolicy::ExcludeReviewed,
        ScoringPolicy::CorrectOnly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScoringPolicy::SimpleCount => "simple-count",
            ScoringPolicy::NetScore => "net-score",
            ScoringPolicy::ExcludeReviewed => "exclude-reviewed",
            ScoringPolicy::CorrectOnly => "correct-only",
        }
    }

    pub fn correct_weight(self) -> i64 {
        match self {
            ScoringPolicy::SimpleCount => 1,
            ScoringPolicy::NetScore | ScoringPolicy::ExcludeReviewed => 3,
            ScoringPolicy::CorrectOnly => 2,
        }
    }

    pub fn incorrect_weight(self) -> i64 {
        match self {
            ScoringPolicy::NetScore | ScoringPolicy::ExcludeReviewed => -1,
            ScoringPolicy::SimpleCount | ScoringPolicy::CorrectOnly => 0,
        }
    }

    /// Answered questions still marked for review at submission count for nothing.
    pub fn excludes_reviewed(self) -> bool {
        self == ScoringPolicy::ExcludeReviewed
    }

    pub fn default_feedback(self) -> FeedbackTiers {
        match self {
            ScoringPolicy::SimpleCount => {
                FeedbackTiers::from_static(&[], "You scored {score} out of {total}")
            }
            ScoringPolicy::NetScore | ScoringPolicy::ExcludeReviewed => FeedbackTiers::from_static(
                &[(1, MESSAGE_ZERO), (10, MESSAGE_LOW), (20, MESSAGE_MID)],
                MESSAGE_HIGH,
            ),
            ScoringPolicy::CorrectOnly => FeedbackTiers::from_static(
                &[(1, MESSAGE_ZERO), (4, MESSAGE_LOW), (6, MESSAGE_MID)],
                MESSAGE_HIGH,
            ),
        }
    }

    /// Weighted total, floored at zero.
    pub fn score(self, total_correct: u32, total_incorrect: u32) -> u32 {
        let raw = self.correct_weight() * i64::from(total_correct)
            + self.incorrect_weight() * i64::from(total_incorrect);
        u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoringPolicy::ALL
            .iter()
            .copied()
            .find(|policy| policy.name() == s.trim())
            .ok_or_else(|| {
                format!(
                    "unknown scoring policy {:?}, expected one of {}",
                    s,
                    ScoringPolicy::ALL.iter().map(|p| p.name()).join(", ")
                )
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionStatus {
    Correct,
    Incorrect,
    Unattempted,
    ExcludedReviewed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub index: usize,
    pub question: Question,
    pub selected: Option<usize>,
    pub status: QuestionStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResults {
    pub score: u32,
    pub total_correct: u32,
    pub total_incorrect: u32,
    pub feedback: String,
    pub breakdown: Vec<QuestionOutcome>,
}

impl QuizResults {
    pub fn outcomes_with_status(
        &self,
        status: QuestionStatus,
    ) -> impl Iterator<Item = &QuestionOutcome> {
        self.breakdown
            .iter()
            .filter(move |outcome| outcome.status == status)
    }
}

fn classify(
    question: &Question,
    selected: Option<usize>,
    marked: bool,
    policy: ScoringPolicy,
) -> QuestionStatus {
    match selected {
        None => QuestionStatus::Unattempted,
        Some(_) if marked && policy.excludes_reviewed() => QuestionStatus::ExcludedReviewed,
        Some(choice) if question.is_choice_correct(choice) => QuestionStatus::Correct,
        Some(_) => QuestionStatus::Incorrect,
    }
}

pub fn compute_results(
    questions: &QuestionSet,
    answers: &BTreeMap<usize, usize>,
    review: &BTreeSet<usize>,
    policy: ScoringPolicy,
    feedback: &FeedbackTiers,
) -> QuizResults {
    let breakdown: Vec<QuestionOutcome> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = answers.get(&index).copied();
            QuestionOutcome {
                index,
                question: question.clone(),
                selected,
                status: classify(question, selected, review.contains(&index), policy),
            }
        })
        .collect();

    let count = |status| breakdown.iter().filter(|o| o.status == status).count() as u32;
    let total_correct = count(QuestionStatus::Correct);
    let total_incorrect = count(QuestionStatus::Incorrect);
    let score = policy.score(total_correct, total_incorrect);

    QuizResults {
        score,
        total_correct,
        total_incorrect,
        feedback: feedback.message_for(score, questions.len()),
        breakdown,
    }
}
