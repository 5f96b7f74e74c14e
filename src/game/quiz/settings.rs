use serde::Deserialize;

use crate::game::quiz::scoring::{FeedbackTiers, ScoringPolicy};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationMode {
    /// Free movement between questions through the palette, explicit submission.
    Palette,
    /// Selecting an answer moves on to the next question; the last answer submits.
    Linear,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub navigation: NavigationMode,
    pub policy: ScoringPolicy,
    pub feedback: Option<FeedbackTiers>,
    pub confirm_submit: bool,
    pub shuffle_questions: bool,
}

impl Settings {
    pub fn feedback_tiers(&self) -> FeedbackTiers {
        self.feedback
            .clone()
            .unwrap_or_else(|| self.policy.default_feedback())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            navigation: NavigationMode::Palette,
            policy: ScoringPolicy::ExcludeReviewed,
            feedback: None,
            confirm_submit: true,
            shuffle_questions: false,
        }
    }
}
