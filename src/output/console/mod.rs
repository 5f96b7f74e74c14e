use itertools::Itertools;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::game::quiz::palette::PaletteState;
use crate::game::quiz::scoring::{QuestionStatus, QuizResults};
use crate::game::quiz::NavigationState;
use crate::output::{Message, QuestionView, QuizOutput};


/// Renders quiz messages as plain text on stdout.
#[derive(Clone, Debug, Default)]
pub struct ConsoleOutput {
    screen: Arc<RwLock<Screen>>,
}

#[derive(Debug, Default)]
struct Screen {
    palette: Vec<PaletteState>,
    question_shown: bool,
}

pub fn choice_label(choice_index: usize) -> char {
    (b'A' + (choice_index % 26) as u8) as char
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns whether the palette is already on screen below a question.
    fn update_palette(&self, index: usize, state: PaletteState) -> bool {
        let mut screen = self.screen.write();
        let palette = &mut screen.palette;
        if palette.len() <= index {
            palette.resize(index + 1, PaletteState::Unattempted);
        }
        palette[index] = state;
        screen.question_shown
    }

    fn render_palette(&self) -> String {
        self.screen
            .read()
            .palette
            .iter()
            .enumerate()
            .map(|(index, state)| {
                let marker = match state {
                    PaletteState::Unattempted => ' ',
                    PaletteState::Attempted => '✓',
                    PaletteState::Review => '?',
                };
                format!("[{}{}]", index + 1, marker)
            })
            .join(" ")
    }

    fn render_question(&self, view: &QuestionView) -> String {
        let mut message = format!(
            "Question {} of {}{}\n{}",
            view.index + 1,
            view.total,
            if view.marked { " (marked for review)" } else { "" },
            view.question.text
        );
        for (choice_index, choice) in view.question.choices.iter().enumerate() {
            let selected = if view.selected == Some(choice_index) { "*" } else { " " };
            message += &format!("\n {} {}) {}", selected, choice_label(choice_index), choice);
        }
        let palette = self.render_palette();
        if !palette.is_empty() {
            message += &format!("\n{}", palette);
        }
        self.screen.write().question_shown = true;
        message
    }

    fn render_navigation(navigation: &NavigationState) -> String {
        let mut commands = vec!["<choice>", "review"];
        if navigation.can_go_prev {
            commands.push("prev");
        }
        if navigation.can_go_next {
            commands.push("next");
        }
        commands.push("goto N");
        if navigation.can_submit {
            commands.push("submit");
        }
        format!("Commands: {}", commands.join(" | "))
    }

    fn render_results(results: &QuizResults) -> String {
        let mut message = format!(
            "🎓 Quiz Results\nYour total score: {}\nTotal correct answers: {}\nTotal incorrect answers: {}\n{}",
            results.score, results.total_correct, results.total_incorrect, results.feedback
        );
        let sections = [
            (QuestionStatus::Correct, "✅ Questions attempted correctly:"),
            (QuestionStatus::Incorrect, "❌ Questions attempted incorrectly:"),
            (QuestionStatus::ExcludedReviewed, "🔖 Questions left marked for review:"),
        ];
        for (status, title) in sections.iter() {
            let outcomes = results.outcomes_with_status(*status).collect::<Vec<_>>();
            if outcomes.is_empty() {
                continue;
            }
            message += &format!("\n{}", title);
            for outcome in outcomes {
                message += &format!("\n- {}", outcome.question.text);
                if outcome.status == QuestionStatus::Incorrect {
                    message += &format!(" (answer: {})", outcome.question.correct_choice);
                }
            }
        }
        message
    }

    pub fn interpret_message(&self, message: &Message) -> Option<String> {
        use Message::*;
        match message {
            LoadFailed(reason) => Some(format!("⚠️ Could not load the quiz: {}", reason)),
            Navigation(navigation) => {
                if *navigation == NavigationState::default() {
                    None
                } else {
                    Some(Self::render_navigation(navigation))
                }
            }
            PaletteState(index, state) => {
                if self.update_palette(*index, *state) {
                    Some(self.render_palette())
                } else {
                    None
                }
            }
            Question(view) => Some(self.render_question(view)),
            Results(results) => Some(Self::render_results(results)),
        }
    }
}

impl QuizOutput for ConsoleOutput {
    fn say(&self, message: &Message) {
        if let Some(content) = self.interpret_message(message) {
            println!("{}\n", content);
        }
    }
}
