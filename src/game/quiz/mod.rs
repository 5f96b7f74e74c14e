use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

use self::definition::*;
use self::palette::*;
use self::scoring::*;
use self::settings::*;
use crate::game::error::SessionError;
use crate::output::{Message, QuestionView, QuizOutput};

pub mod definition;
pub mod palette;
pub mod scoring;
pub mod settings;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Submitted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub can_submit: bool,
}

/// One attempt at a quiz: where the player is, what they answered and what they flagged.
pub struct QuizSession<O: QuizOutput> {
    questions: QuestionSet,
    settings: Settings,
    feedback: FeedbackTiers,
    current_index: usize,
    answers: BTreeMap<usize, usize>,
    review: BTreeSet<usize>,
    phase: Phase,
    results: Option<QuizResults>,
    output: O,
}

impl<O: QuizOutput> QuizSession<O> {
    pub fn initialize(questions: QuestionSet, settings: Settings, output: O) -> Self {
        info!(
            "Starting quiz with {} questions ({} scoring, {:?} navigation)",
            questions.len(),
            settings.policy,
            settings.navigation
        );
        let session = QuizSession {
            feedback: settings.feedback_tiers(),
            questions,
            settings,
            current_index: 0,
            answers: BTreeMap::new(),
            review: BTreeSet::new(),
            phase: Phase::InProgress,
            results: None,
            output,
        };
        for index in 0..session.questions.len() {
            session.render_palette_state(index);
        }
        session.render_question();
        session.render_navigation();
        session
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(&index).copied()
    }

    pub fn is_marked_for_review(&self, index: usize) -> bool {
        self.review.contains(&index)
    }

    pub fn palette_state(&self, index: usize) -> PaletteState {
        palette_state(index, &self.answers, &self.review)
    }

    pub fn results(&self) -> Option<&QuizResults> {
        self.results.as_ref()
    }

    pub fn navigation(&self) -> NavigationState {
        if self.phase() == Phase::Submitted {
            return NavigationState::default();
        }
        let last_index = self.questions.len() - 1;
        NavigationState {
            can_go_prev: self.current_index > 0,
            can_go_next: self.current_index < last_index,
            can_submit: self.settings.navigation == NavigationMode::Linear
                || self.current_index == last_index,
        }
    }

    /// Records an answer for the current question.
    ///
    /// In linear navigation this also moves to the next question, and answering the last
    /// question submits the quiz, in which case the results are returned.
    pub fn select_answer(&mut self, choice_index: usize) -> Result<Option<QuizResults>, SessionError> {
        self.ensure_in_progress()?;
        let choice_count = self.current_question().choices.len();
        if choice_index >= choice_count {
            return Err(SessionError::Range {
                index: isize::try_from(choice_index).unwrap_or(isize::MAX),
                len: choice_count,
            });
        }

        let index = self.current_index;
        self.answers.insert(index, choice_index);
        self.review.remove(&index);
        debug!("Question {} answered with choice {}", index, choice_index);
        self.render_palette_state(index);

        match self.settings.navigation {
            NavigationMode::Palette => Ok(None),
            NavigationMode::Linear => {
                if index + 1 < self.questions.len() {
                    self.move_to(index + 1);
                    Ok(None)
                } else {
                    self.submit().map(Some)
                }
            }
        }
    }

    /// Flags or unflags the current question. Returns whether it is now flagged.
    pub fn toggle_review_mark(&mut self) -> Result<bool, SessionError> {
        self.ensure_in_progress()?;
        let index = self.current_index;
        let marked = if self.review.remove(&index) {
            false
        } else {
            self.review.insert(index);
            true
        };
        debug!("Question {} review mark: {}", index, marked);
        self.render_palette_state(index);
        Ok(marked)
    }

    pub fn go_to(&mut self, index: isize) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        let len = self.questions.len();
        match usize::try_from(index) {
            Ok(index) if index < len => {
                self.move_to(index);
                Ok(())
            }
            _ => Err(SessionError::Range { index, len }),
        }
    }

    pub fn advance(&mut self, delta: isize) -> Result<(), SessionError> {
        let current_index = isize::try_from(self.current_index).unwrap_or(isize::MAX);
        self.go_to(current_index.saturating_add(delta))
    }

    pub fn submit(&mut self) -> Result<QuizResults, SessionError> {
        self.ensure_in_progress()?;
        let results = compute_results(
            &self.questions,
            &self.answers,
            &self.review,
            self.settings.policy,
            &self.feedback,
        );
        self.phase = Phase::Submitted;
        self.results = Some(results.clone());
        info!(
            "Quiz submitted: score {} ({} correct, {} incorrect)",
            results.score, results.total_correct, results.total_incorrect
        );
        self.render_navigation();
        self.output.say(&Message::Results(results.clone()));
        Ok(results)
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.phase() {
            Phase::InProgress => Ok(()),
            Phase::Submitted => Err(SessionError::InvalidState("The quiz was already submitted")),
        }
    }

    fn move_to(&mut self, index: usize) {
        debug!("Moving from question {} to {}", self.current_index, index);
        self.current_index = index;
        self.render_question();
        self.render_navigation();
    }

    fn render_question(&self) {
        let index = self.current_index;
        self.output.say(&Message::Question(QuestionView {
            question: self.current_question().clone(),
            index,
            total: self.questions.len(),
            selected: self.answer(index),
            marked: self.is_marked_for_review(index),
        }));
    }

    fn render_palette_state(&self, index: usize) {
        self.output
            .say(&Message::PaletteState(index, self.palette_state(index)));
    }

    fn render_navigation(&self) {
        self.output.say(&Message::Navigation(self.navigation()));
    }
}
