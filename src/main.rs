use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod commands;
mod game;
mod output;
mod settings;

use crate::commands::player::{self, Flow};
use crate::commands::Command;
use crate::game::quiz::definition::FileSource;
use crate::game::quiz::scoring::ScoringPolicy;
use crate::game::quiz::settings::NavigationMode;
use crate::game::Widget;
use crate::output::console::ConsoleOutput;

/// Take a multiple-choice quiz in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Question file, `.json` or CSV
    questions: PathBuf,

    /// Settings file (defaults to the per-user settings.toml, if any)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Scoring policy: simple-count, net-score, exclude-reviewed or correct-only
    #[arg(long)]
    policy: Option<ScoringPolicy>,

    /// Move on to the next question as soon as an answer is selected
    #[arg(long)]
    linear: bool,

    /// Submit without asking for confirmation
    #[arg(long)]
    no_confirm: bool,
}

fn confirm<I>(lines: &mut I) -> Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("Are you sure you want to submit? [y/N] ");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => {
            let answer = line?.trim().to_lowercase();
            Ok(answer == "y" || answer == "yes")
        }
        None => Ok(false),
    }
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let mut settings = settings::load(args.settings.as_deref())?;
    if let Some(policy) = args.policy {
        settings.policy = policy;
    }
    if args.linear {
        settings.navigation = NavigationMode::Linear;
    }
    if args.no_confirm {
        settings.confirm_submit = false;
    }

    let mut widget = Widget::new(settings, ConsoleOutput::new());
    let source = FileSource::new(&args.questions);
    widget
        .load(&source)
        .with_context(|| format!("Could not begin quiz with path {:?}", args.questions))?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while let Some(line) = lines.next() {
        let line = line?;
        let result = line
            .parse::<Command>()
            .and_then(|command| player::run(&mut widget, &command, || confirm(&mut lines)));
        match result {
            Ok(Flow::Continue) => (),
            Ok(Flow::Finished) | Ok(Flow::Quit) => break,
            Err(e) => eprintln!("{:#}\n", e),
        }
    }

    if !widget.is_over() {
        info!("Leaving before the quiz was submitted");
    }

    Ok(())
}
