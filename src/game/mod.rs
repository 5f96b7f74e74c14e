use log::{error, info, warn};

pub mod error;
pub mod quiz;

use self::error::{LoadError, SessionError};
use self::quiz::definition::{Question, QuestionSet, QuestionSource};
use self::quiz::scoring::QuizResults;
use self::quiz::settings::Settings;
use self::quiz::QuizSession;
use crate::output::{Message, QuizOutput};


enum Lifecycle<O: QuizOutput> {
    Loading,
    LoadFailed,
    Quiz(QuizSession<O>),
}

impl<O: QuizOutput> Lifecycle<O> {
    fn name(&self) -> &'static str {
        match self {
            Lifecycle::Loading => "loading",
            Lifecycle::LoadFailed => "load failed",
            Lifecycle::Quiz(_) => "quiz",
        }
    }
}

/// Owns a quiz from the moment its questions are requested until it is submitted.
///
/// Every interaction is rejected until the question set has arrived, and the question set
/// can only arrive once.
pub struct Widget<O: QuizOutput + Clone> {
    lifecycle: Lifecycle<O>,
    settings: Settings,
    output: O,
}

impl<O: QuizOutput + Clone> Widget<O> {
    pub fn new(settings: Settings, output: O) -> Self {
        Widget {
            lifecycle: Lifecycle::Loading,
            settings,
            output,
        }
    }

    fn set_lifecycle(&mut self, lifecycle: Lifecycle<O>) {
        info!("Entering widget phase: {}", lifecycle.name());
        self.lifecycle = lifecycle;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn load(&mut self, source: &dyn QuestionSource) -> Result<(), SessionError> {
        if let Some(e) = self.reject_load() {
            return Err(e);
        }
        let result = source.fetch();
        self.on_loaded(result)
    }

    pub fn on_loaded(&mut self, result: Result<QuestionSet, LoadError>) -> Result<(), SessionError> {
        if let Some(e) = self.reject_load() {
            return Err(e);
        }
        match result {
            Ok(mut questions) => {
                if self.settings.shuffle_questions {
                    questions.shuffle();
                }
                let session =
                    QuizSession::initialize(questions, self.settings.clone(), self.output.clone());
                self.set_lifecycle(Lifecycle::Quiz(session));
                Ok(())
            }
            Err(e) => {
                error!("Could not load questions: {}", e);
                self.output.say(&Message::LoadFailed(e.to_string()));
                self.set_lifecycle(Lifecycle::LoadFailed);
                Err(e.into())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Loading)
    }

    pub fn is_over(&self) -> bool {
        match &self.lifecycle {
            Lifecycle::Loading => false,
            Lifecycle::LoadFailed => true,
            Lifecycle::Quiz(session) => session.results().is_some(),
        }
    }

    pub fn session(&self) -> Result<&QuizSession<O>, SessionError> {
        match &self.lifecycle {
            Lifecycle::Quiz(session) => Ok(session),
            Lifecycle::Loading => Err(SessionError::InvalidState("The quiz has not finished loading")),
            Lifecycle::LoadFailed => Err(SessionError::InvalidState("The quiz failed to load")),
        }
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession<O>, SessionError> {
        match &mut self.lifecycle {
            Lifecycle::Quiz(session) => Ok(session),
            Lifecycle::Loading => Err(SessionError::InvalidState("The quiz has not finished loading")),
            Lifecycle::LoadFailed => Err(SessionError::InvalidState("The quiz failed to load")),
        }
    }

    pub fn current_question(&self) -> Result<&Question, SessionError> {
        self.session().map(|session| session.current_question())
    }

    pub fn select_answer(&mut self, choice_index: usize) -> Result<Option<QuizResults>, SessionError> {
        Self::log_rejection(
            self.session_mut()
                .and_then(|session| session.select_answer(choice_index)),
        )
    }

    pub fn toggle_review_mark(&mut self) -> Result<bool, SessionError> {
        Self::log_rejection(self.session_mut().and_then(|session| session.toggle_review_mark()))
    }

    pub fn go_to(&mut self, index: isize) -> Result<(), SessionError> {
        Self::log_rejection(self.session_mut().and_then(|session| session.go_to(index)))
    }

    pub fn advance(&mut self, delta: isize) -> Result<(), SessionError> {
        Self::log_rejection(self.session_mut().and_then(|session| session.advance(delta)))
    }

    pub fn submit(&mut self) -> Result<QuizResults, SessionError> {
        Self::log_rejection(self.session_mut().and_then(|session| session.submit()))
    }

    fn reject_load(&self) -> Option<SessionError> {
        match &self.lifecycle {
            Lifecycle::Loading => None,
            Lifecycle::LoadFailed => {
                warn!("Ignoring a question set after a failed load");
                Some(SessionError::InvalidState(
                    "The quiz failed to load and cannot be restarted",
                ))
            }
            Lifecycle::Quiz(_) => {
                warn!("Ignoring a second question set");
                Some(SessionError::InvalidState("The quiz questions were already loaded"))
            }
        }
    }

    fn log_rejection<T>(result: Result<T, SessionError>) -> Result<T, SessionError> {
        if let Err(e) = &result {
            warn!("Rejected quiz operation: {}", e);
        }
        result
    }
}
