use itertools::Itertools;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::convert::TryFrom;
use std::fmt;
use unidecode::unidecode;

lazy_static! {
    static ref FORBIDDEN_CHOICE_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
}

pub fn sanitize(text: &str) -> String {
    let text = unidecode(text);
    FORBIDDEN_CHOICE_CHARACTERS_REGEX
        .replace_all(&text.to_lowercase(), "")
        .into()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceMatch {
    Exact(usize),
    Loose(usize),
    Ambiguous,
    NotFound,
}

// JSON files list choices as an array, CSV files as a single `|` separated cell.
fn choices_from_list_or_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ChoicesVisitor;

    impl<'de> Visitor<'de> for ChoicesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of choices or a '|' separated string")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value.split('|').map(|c| c.trim().to_owned()).collect())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut choices = Vec::new();
            while let Some(choice) = seq.next_element::<String>()? {
                choices.push(choice);
            }
            Ok(choices)
        }
    }

    deserializer.deserialize_any(ChoicesVisitor)
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RawQuestion {
    pub question: String,
    #[serde(deserialize_with = "choices_from_list_or_string")]
    pub choices: Vec<String>,
    #[serde(alias = "correctAnswer")]
    pub correct_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub choices: Vec<String>,
    pub correct_choice: String,
}

impl Question {
    pub fn is_choice_correct(&self, choice_index: usize) -> bool {
        self.choices
            .get(choice_index)
            .map_or(false, |choice| *choice == self.correct_choice)
    }

    /// Finds the choice a player typed out. An exact match (ignoring case and surrounding
    /// whitespace) wins; otherwise accents and punctuation are ignored too, as long as
    /// that leaves a single candidate.
    pub fn find_choice(&self, input: &str) -> ChoiceMatch {
        let input = input.trim().to_lowercase();
        if let Some(index) = self
            .choices
            .iter()
            .position(|choice| choice.trim().to_lowercase() == input)
        {
            return ChoiceMatch::Exact(index);
        }

        let sanitized_input = sanitize(&input);
        if sanitized_input.is_empty() {
            return ChoiceMatch::NotFound;
        }
        let candidates = self
            .choices
            .iter()
            .positions(|choice| sanitize(choice) == sanitized_input)
            .collect::<Vec<_>>();
        match candidates.as_slice() {
            [] => ChoiceMatch::NotFound,
            [index] => ChoiceMatch::Loose(*index),
            _ => ChoiceMatch::Ambiguous,
        }
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = String;

    fn try_from(raw_question: RawQuestion) -> Result<Self, Self::Error> {
        let text = raw_question.question.trim().to_owned();
        if text.is_empty() {
            return Err("question text is blank".into());
        }

        let choices: Vec<String> = raw_question
            .choices
            .into_iter()
            .map(|c| c.trim().to_owned())
            .collect();
        if choices.len() < 2 {
            return Err(format!("expected at least 2 choices, found {}", choices.len()));
        }
        if choices.iter().any(|c| c.is_empty()) {
            return Err("a choice is blank".into());
        }

        let correct_choice = raw_question.correct_answer.trim().to_owned();
        match choices.iter().filter(|c| **c == correct_choice).count() {
            0 => {
                return Err(format!(
                    "correct answer {:?} is not one of the choices",
                    correct_choice
                ))
            }
            1 => (),
            _ => {
                return Err(format!(
                    "correct answer {:?} appears more than once",
                    correct_choice
                ))
            }
        }

        if choices.iter().unique().count() != choices.len() {
            warn!("Question {:?} has duplicate choices", text);
        }

        Ok(Question {
            text,
            choices,
            correct_choice,
        })
    }
}
