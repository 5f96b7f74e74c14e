use proptest::prelude::*;

use super::*;
use crate::output::mock::MockQuizOutput;

struct ContextBuilder {
    questions: Vec<RawQuestion>,
    settings: Settings,
}

impl ContextBuilder {
    fn new() -> Self {
        let question = |text: &str, choices: &[&str], correct_answer: &str| RawQuestion {
            question: text.to_owned(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_answer: correct_answer.to_owned(),
        };
        ContextBuilder {
            questions: vec![
                question(
                    "Which planet is known as the Red Planet?",
                    &["Earth", "Mars", "Venus", "Jupiter"],
                    "Mars",
                ),
                question(
                    "What is the capital of France?",
                    &["Paris", "London", "Berlin", "Madrid"],
                    "Paris",
                ),
                question(
                    "What is the largest ocean on Earth?",
                    &["Atlantic", "Indian", "Pacific"],
                    "Pacific",
                ),
            ],
            settings: Settings::default(),
        }
    }

    fn policy(mut self, policy: ScoringPolicy) -> Self {
        self.settings.policy = policy;
        self
    }

    fn linear(mut self) -> Self {
        self.settings.navigation = NavigationMode::Linear;
        self
    }

    fn question_count(mut self, count: usize) -> Self {
        self.questions.truncate(count);
        self
    }

    fn build(self) -> Context {
        let output = MockQuizOutput::new();
        let questions = QuestionSet::from_raw(self.questions).unwrap();
        let session = QuizSession::initialize(questions, self.settings, output.clone());
        Context { session, output }
    }
}

struct Context {
    session: QuizSession<MockQuizOutput>,
    output: MockQuizOutput,
}

#[test]
fn initialize_renders_first_question_and_palette() {
    let ctx = ContextBuilder::new().build();
    let messages = ctx.output.flush();
    assert_eq!(messages.len(), 5);
    for index in 0..3 {
        assert_eq!(
            messages[index],
            Message::PaletteState(index, PaletteState::Unattempted)
        );
    }
    match &messages[3] {
        Message::Question(view) => {
            assert_eq!(view.index, 0);
            assert_eq!(view.total, 3);
            assert_eq!(view.selected, None);
            assert!(!view.marked);
        }
        other => panic!("unexpected message: {:?}", other),
    }
    assert_eq!(
        messages[4],
        Message::Navigation(NavigationState {
            can_go_prev: false,
            can_go_next: true,
            can_submit: false,
        })
    );
    assert_eq!(ctx.session.current_index(), 0);
    assert_eq!(ctx.session.phase(), Phase::InProgress);
}

#[test]
fn selecting_marks_question_attempted() {
    let mut ctx = ContextBuilder::new().build();
    ctx.output.flush();
    assert_eq!(ctx.session.select_answer(1).unwrap(), None);
    assert_eq!(ctx.session.answer(0), Some(1));
    assert_eq!(ctx.session.current_index(), 0);
    assert_eq!(
        ctx.output.flush(),
        [Message::PaletteState(0, PaletteState::Attempted)]
    );
}

#[test]
fn selecting_again_overwrites_answer() {
    let mut ctx = ContextBuilder::new().build();
    ctx.session.select_answer(0).unwrap();
    ctx.session.select_answer(3).unwrap();
    assert_eq!(ctx.session.answer(0), Some(3));
}

#[test]
fn selecting_out_of_range_choice_fails() {
    let mut ctx = ContextBuilder::new().build();
    ctx.session.select_answer(1).unwrap();
    ctx.output.flush();
    assert!(ctx.session.select_answer(4).unwrap_err().is_range());
    assert_eq!(ctx.session.answer(0), Some(1));
    assert!(ctx.output.is_empty());
}

#[test]
fn selecting_clears_review_mark() {
    let mut ctx = ContextBuilder::new().build();
    assert!(ctx.session.toggle_review_mark().unwrap());
    assert_eq!(ctx.session.palette_state(0), PaletteState::Review);
    ctx.output.flush();
    ctx.session.select_answer(2).unwrap();
    assert!(!ctx.session.is_marked_for_review(0));
    assert_eq!(
        ctx.output.flush(),
        [Message::PaletteState(0, PaletteState::Attempted)]
    );
}

#[test]
fn toggling_review_twice_restores_membership() {
    let mut ctx = ContextBuilder::new().build();
    ctx.session.select_answer(1).unwrap();
    assert!(ctx.session.toggle_review_mark().unwrap());
    assert_eq!(ctx.session.palette_state(0), PaletteState::Review);
    assert!(!ctx.session.toggle_review_mark().unwrap());
    assert_eq!(ctx.session.palette_state(0), PaletteState::Attempted);
    assert_eq!(ctx.session.answer(0), Some(1));
}

#[test]
fn review_mark_shows_over_answer() {
    let mut ctx = ContextBuilder::new().build();
    ctx.session.select_answer(1).unwrap();
    ctx.output.flush();
    ctx.session.toggle_review_mark().unwrap();
    assert_eq!(
        ctx.output.flush(),
        [Message::PaletteState(0, PaletteState::Review)]
    );
}

#[test]
fn go_to_moves_and_renders() {
    let mut ctx = ContextBuilder::new().build();
    ctx.output.flush();
    ctx.session.go_to(2).unwrap();
    assert_eq!(ctx.session.current_index(), 2);
    let messages = ctx.output.flush();
    assert!(matches!(&messages[0], Message::Question(view) if view.index == 2));
    assert_eq!(
        messages[1],
        Message::Navigation(NavigationState {
            can_go_prev: true,
            can_go_next: false,
            can_submit: true,
        })
    );
}

#[test]
fn go_to_rejects_out_of_range_indices() {
    let mut ctx = ContextBuilder::new().build();
    ctx.session.go_to(1).unwrap();
    ctx.output.flush();
    assert!(ctx.session.go_to(-1).unwrap_err().is_range());
    assert!(ctx.session.go_to(3).unwrap_err().is_range());
    assert_eq!(ctx.session.current_index(), 1);
    assert!(ctx.output.is_empty());
}

#[test]
fn advance_respects_bounds() {
    let mut ctx = ContextBuilder::new().build();
    assert!(ctx.session.advance(-1).unwrap_err().is_range());
    ctx.session.advance(1).unwrap();
    ctx.session.advance(1).unwrap();
    assert_eq!(ctx.session.current_index(), 2);
    assert!(ctx.session.advance(1).unwrap_err().is_range());
    ctx.session.advance(-1).unwrap();
    assert_eq!(ctx.session.current_index(), 1);
}

#[test]
fn answers_persist_across_navigation() {
    let mut ctx = ContextBuilder::new().build();
    ctx.session.select_answer(2).unwrap();
    ctx.session.toggle_review_mark().unwrap();
    ctx.session.advance(1).unwrap();
    ctx.output.flush();
    ctx.session.advance(-1).unwrap();
    let messages = ctx.output.flush();
    match &messages[0] {
        Message::Question(view) => {
            assert_eq!(view.selected, Some(2));
            assert!(view.marked);
        }
        other => panic!("unexpected message: {:?}", other),
    }
}

#[test]
fn submit_is_terminal() {
    let mut ctx = ContextBuilder::new().build();
    ctx.session.select_answer(1).unwrap();
    let results = ctx.session.submit().unwrap();
    assert_eq!(ctx.session.phase(), Phase::Submitted);
    assert!(ctx.output.contains_message(&Message::Results(results.clone())));
    assert!(ctx
        .output
        .contains_message(&Message::Navigation(NavigationState::default())));

    ctx.output.flush();
    assert!(ctx.session.submit().unwrap_err().is_invalid_state());
    assert!(ctx.session.select_answer(0).unwrap_err().is_invalid_state());
    assert!(ctx.session.toggle_review_mark().unwrap_err().is_invalid_state());
    assert!(ctx.session.go_to(1).unwrap_err().is_invalid_state());
    assert!(ctx.session.advance(1).unwrap_err().is_invalid_state());
    assert!(ctx.output.is_empty());

    assert_eq!(ctx.session.answer(0), Some(1));
    assert_eq!(ctx.session.current_index(), 0);
    assert_eq!(ctx.session.results(), Some(&results));
}

#[test]
fn net_score_scenario() {
    let mut ctx = ContextBuilder::new().policy(ScoringPolicy::NetScore).build();
    ctx.session.select_answer(1).unwrap();
    ctx.session.go_to(2).unwrap();
    ctx.session.select_answer(0).unwrap();
    let results = ctx.session.submit().unwrap();
    assert_eq!(results.total_correct, 1);
    assert_eq!(results.total_incorrect, 1);
    assert_eq!(results.score, 2);
}

#[test]
fn exclude_reviewed_scenario() {
    let mut ctx = ContextBuilder::new()
        .policy(ScoringPolicy::ExcludeReviewed)
        .build();
    ctx.session.select_answer(1).unwrap();
    ctx.session.toggle_review_mark().unwrap();
    let results = ctx.session.submit().unwrap();
    assert_eq!(results.total_correct, 0);
    assert_eq!(results.total_incorrect, 0);
    assert_eq!(results.breakdown[0].status, QuestionStatus::ExcludedReviewed);
}

#[test]
fn simple_count_scenario() {
    let mut ctx = ContextBuilder::new()
        .policy(ScoringPolicy::SimpleCount)
        .question_count(2)
        .build();
    ctx.session.select_answer(1).unwrap();
    ctx.session.advance(1).unwrap();
    ctx.session.select_answer(0).unwrap();
    let results = ctx.session.submit().unwrap();
    assert_eq!(results.score, 2);
    assert_eq!(results.total_incorrect, 0);
    assert_eq!(results.feedback, "You scored 2 out of 2");
}

#[test]
fn linear_mode_advances_on_answer() {
    let mut ctx = ContextBuilder::new().linear().build();
    assert!(ctx.session.navigation().can_submit);
    assert_eq!(ctx.session.select_answer(1).unwrap(), None);
    assert_eq!(ctx.session.current_index(), 1);
    assert_eq!(ctx.session.select_answer(0).unwrap(), None);
    assert_eq!(ctx.session.current_index(), 2);
}

#[test]
fn linear_mode_submits_after_last_answer() {
    let mut ctx = ContextBuilder::new()
        .linear()
        .policy(ScoringPolicy::SimpleCount)
        .build();
    ctx.session.select_answer(1).unwrap();
    ctx.session.select_answer(0).unwrap();
    let results = ctx.session.select_answer(2).unwrap().unwrap();
    assert_eq!(results.score, 3);
    assert_eq!(ctx.session.phase(), Phase::Submitted);
    assert_eq!(ctx.session.current_index(), 2);
    assert!(ctx.output.contains_message(&Message::Results(results)));
}

#[test]
fn single_question_quiz_can_submit_immediately() {
    let ctx = ContextBuilder::new().question_count(1).build();
    assert_eq!(
        ctx.session.navigation(),
        NavigationState {
            can_go_prev: false,
            can_go_next: false,
            can_submit: true,
        }
    );
}

#[derive(Clone, Debug)]
enum Action {
    Select(usize),
    ToggleReview,
    GoTo(isize),
}

fn actions() -> impl Strategy<Value = Vec<Action>> {
    proptest::collection::vec(
        prop_oneof![
            (0usize..3).prop_map(Action::Select),
            Just(Action::ToggleReview),
            (-1isize..4).prop_map(Action::GoTo),
        ],
        0..40,
    )
}

proptest! {
    #[test]
    fn tracks_latest_answer_and_review_marks(actions in actions()) {
        let mut ctx = ContextBuilder::new().build();
        let mut expected_answers = BTreeMap::new();
        let mut expected_review = BTreeSet::new();
        let mut expected_index = 0usize;

        for action in actions {
            match action {
                Action::Select(choice) => {
                    ctx.session.select_answer(choice).unwrap();
                    expected_answers.insert(expected_index, choice);
                    expected_review.remove(&expected_index);
                }
                Action::ToggleReview => {
                    let marked = ctx.session.toggle_review_mark().unwrap();
                    prop_assert_eq!(marked, expected_review.insert(expected_index));
                    if !marked {
                        expected_review.remove(&expected_index);
                    }
                }
                Action::GoTo(index) => {
                    let result = ctx.session.go_to(index);
                    if (0..3).contains(&index) {
                        prop_assert!(result.is_ok());
                        expected_index = index as usize;
                    } else {
                        prop_assert!(result.unwrap_err().is_range());
                    }
                }
            }
            prop_assert_eq!(ctx.session.current_index(), expected_index);
        }

        for index in 0..3 {
            prop_assert_eq!(ctx.session.answer(index), expected_answers.get(&index).copied());
            prop_assert_eq!(ctx.session.is_marked_for_review(index), expected_review.contains(&index));
            let expected_state = palette_state(index, &expected_answers, &expected_review);
            prop_assert_eq!(ctx.session.palette_state(index), expected_state);
        }

        let results = ctx.session.submit().unwrap();
        prop_assert!(ctx.session.submit().is_err());
        prop_assert_eq!(ctx.session.results(), Some(&results));
    }
}
