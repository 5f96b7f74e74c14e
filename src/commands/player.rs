use anyhow::Result;

use crate::commands::{resolve_choice, Command, HELP};
use crate::game::Widget;
use crate::output::console::choice_label;
use crate::output::QuizOutput;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Finished,
    Quit,
}

/// Applies one player command. `confirm` is only asked before submitting.
pub fn run<O, C>(widget: &mut Widget<O>, command: &Command, confirm: C) -> Result<Flow>
where
    O: QuizOutput + Clone,
    C: FnOnce() -> Result<bool>,
{
    match command {
        Command::Choose(input) => {
            let question = widget.current_question()?;
            let choice_index = resolve_choice(question, input)?;
            let index = widget.session()?.current_index();
            let results = widget.select_answer(choice_index)?;
            println!(
                "Answer {} recorded for question {}.\n",
                choice_label(choice_index),
                index + 1
            );
            Ok(match results {
                Some(_) => Flow::Finished,
                None => Flow::Continue,
            })
        }
        Command::Next => {
            widget.advance(1)?;
            Ok(Flow::Continue)
        }
        Command::Prev => {
            widget.advance(-1)?;
            Ok(Flow::Continue)
        }
        Command::GoTo(number) => {
            widget.go_to(number.saturating_sub(1))?;
            Ok(Flow::Continue)
        }
        Command::Review => {
            let index = widget.session()?.current_index();
            if widget.toggle_review_mark()? {
                println!("Question {} marked for review.\n", index + 1);
            } else {
                println!("Question {} is no longer marked for review.\n", index + 1);
            }
            Ok(Flow::Continue)
        }
        Command::Submit => {
            widget.session()?;
            if widget.settings().confirm_submit && !confirm()? {
                return Ok(Flow::Continue);
            }
            widget.submit()?;
            Ok(Flow::Finished)
        }
        Command::Help => {
            println!("{}\n", HELP);
            Ok(Flow::Continue)
        }
        Command::Quit => Ok(Flow::Quit),
    }
}
