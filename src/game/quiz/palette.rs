use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteState {
    Unattempted,
    Attempted,
    Review,
}

/// A review mark hides whether the question was answered.
pub fn palette_state(
    index: usize,
    answers: &BTreeMap<usize, usize>,
    review: &BTreeSet<usize>,
) -> PaletteState {
    if review.contains(&index) {
        PaletteState::Review
    } else if answers.contains_key(&index) {
        PaletteState::Attempted
    } else {
        PaletteState::Unattempted
    }
}
