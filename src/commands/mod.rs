use anyhow::{anyhow, Error};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;

use crate::game::quiz::definition::{ChoiceMatch, Question};

pub mod player;


lazy_static! {
    static ref GOTO_COMMAND_REGEX: Regex = Regex::new(r"^(?:goto|g)\s+(-?\d+)$").unwrap();
}

pub const HELP: &str = "Answer with a choice letter (A, B, ...), its number or its text.
  next, n        go to the next question
  prev, p        go to the previous question
  goto N, g N    jump to question N
  review, r      mark or unmark the current question for review
  submit, s      submit your answers
  quit, q        leave without submitting";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Choose(String),
    Next,
    Prev,
    /// 1-based, as shown on the palette.
    GoTo(isize),
    Review,
    Submit,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let command = match input.to_lowercase().as_str() {
            "" => return Err(anyhow!("Type a command, or `help` to list them")),
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "review" | "r" => Command::Review,
            "submit" | "s" => Command::Submit,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            lowercase => match GOTO_COMMAND_REGEX.captures(lowercase) {
                Some(captures) => {
                    let number = captures[1]
                        .parse()
                        .map_err(|_| anyhow!("{} is not a question number", &captures[1]))?;
                    Command::GoTo(number)
                }
                None => Command::Choose(input.to_owned()),
            },
        };
        Ok(command)
    }
}

/// Picks a choice by its exact text first, then by letter or 1-based number, and only then
/// by text that is missing accents or punctuation.
pub fn resolve_choice(question: &Question, input: &str) -> Result<usize, Error> {
    let text_match = question.find_choice(input);
    if let ChoiceMatch::Exact(index) = text_match {
        return Ok(index);
    }
    if let Some(index) = choice_by_position(question.choices.len(), input.trim()) {
        return Ok(index);
    }
    match text_match {
        ChoiceMatch::Exact(index) | ChoiceMatch::Loose(index) => Ok(index),
        ChoiceMatch::Ambiguous => Err(anyhow!(
            "{:?} matches more than one choice, type it out exactly or use its letter",
            input
        )),
        ChoiceMatch::NotFound => Err(anyhow!("{:?} is not one of the choices", input)),
    }
}

fn choice_by_position(choice_count: usize, input: &str) -> Option<usize> {
    let mut chars = input.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            let index = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
            return Some(index).filter(|i| *i < choice_count);
        }
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .filter(|i| *i < choice_count)
}
