use crate::game::quiz::definition::Question;
use crate::game::quiz::palette::PaletteState;
use crate::game::quiz::scoring::QuizResults;
use crate::game::quiz::NavigationState;

pub mod console;
#[cfg(test)]
pub mod mock;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionView {
    pub question: Question,
    pub index: usize,
    pub total: usize,
    pub selected: Option<usize>,
    pub marked: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    LoadFailed(String),
    Navigation(NavigationState),
    PaletteState(usize, PaletteState),
    Question(QuestionView),
    Results(QuizResults),
}

/// Receives everything the player should see. Snapshots only, never live session state.
pub trait QuizOutput {
    fn say(&self, message: &Message);
}
