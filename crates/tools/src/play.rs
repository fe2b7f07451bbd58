//! Line-oriented terminal front end over a [`Game`].

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use elevator_core::{
    Game, Intent, IntentOutcome, JournalWriter, LogEvent, MAX_FLOOR, MIN_FLOOR, Operator, Phase,
    TOTAL_QUESTIONS,
};
use log::debug;

use crate::strings::Catalog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Help,
    Quit,
}

/// One whitespace-separated token of player input.
pub fn parse_command(token: &str) -> Option<Command> {
    let command = match token.to_ascii_lowercase().as_str() {
        "+" | "up" => Command::Intent(Intent::SelectOperator(Operator::Up)),
        "-" | "down" => Command::Intent(Intent::SelectOperator(Operator::Down)),
        "ok" | "submit" | "=" => Command::Intent(Intent::Submit),
        "new" | "start" | "restart" => Command::Intent(Intent::StartGame),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Intent(Intent::SelectNumber(other.parse().ok()?)),
    };
    Some(command)
}

pub fn default_journal_path(seed: u64) -> Option<PathBuf> {
    ProjectDirs::from("", "", "ElevatorMath").map(|dirs| {
        let mut path = dirs.data_dir().to_path_buf();
        path.push("journals");
        path.push(format!("session-{seed:016x}.jsonl"));
        path
    })
}

pub struct Session<'a> {
    game: Game,
    catalog: &'a Catalog,
    journal: Option<JournalWriter>,
    /// Log events already shown to the player.
    shown: usize,
}

impl<'a> Session<'a> {
    pub fn new(game: Game, catalog: &'a Catalog, journal: Option<JournalWriter>) -> Self {
        Self { game, catalog, journal, shown: 0 }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let t = self.catalog;
        writeln!(out, "{}", t.get("initialScreen.title"))?;
        writeln!(out, "{}", t.get("initialScreen.description"))?;
        writeln!(out, "{}", t.get("cli.commands"))?;
        self.render_prompt(out)?;

        for line in input.lines() {
            let line = line.context("failed to read player input")?;
            for token in line.split_whitespace() {
                match parse_command(token) {
                    Some(Command::Intent(intent)) => self.apply(intent, out)?,
                    Some(Command::Help) => writeln!(out, "{}", t.get("cli.commands"))?,
                    Some(Command::Quit) => return Ok(()),
                    None => writeln!(out, "{}", t.text("cli.unknown", &[("input", &token)]))?,
                }
            }
            self.game.settle();
            self.render_events(out)?;
            self.render_prompt(out)?;
        }
        Ok(())
    }

    fn apply<W: Write>(&mut self, intent: Intent, out: &mut W) -> Result<()> {
        match self.game.apply(intent) {
            IntentOutcome::Applied => {
                if let (Some(writer), Some(record)) =
                    (self.journal.as_mut(), self.game.journal().last())
                {
                    writer
                        .append(record.at_ms, record.intent)
                        .context("failed to append to the session journal")?;
                }
            }
            IntentOutcome::Ignored(reason) => {
                debug!("{intent:?} ignored: {reason:?}");
                writeln!(out, "{}", self.catalog.get("cli.notNow"))?;
            }
        }
        // A restart or submit produces events worth showing before the rest
        // of the line is processed.
        self.render_events(out)
    }

    fn render_events<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let t = self.catalog;
        for event in &self.game.log()[self.shown..] {
            match event {
                LogEvent::ProblemLoaded { question, difficulty, problem } => {
                    writeln!(
                        out,
                        "{}  {}",
                        t.text("scoreboard.question", &[
                            ("questionNumber", question),
                            ("totalQuestions", &TOTAL_QUESTIONS),
                        ]),
                        t.text("scoreboard.difficulty", &[("difficulty", difficulty)]),
                    )?;
                    writeln!(
                        out,
                        "{}",
                        t.text("problemStatement.monkeyWantsToGo", &[
                            ("startFloor", &problem.start_floor()),
                            ("targetFloor", &problem.target_floor()),
                        ])
                    )?;
                }
                LogEvent::AnswerSubmitted { result_floor, correct, .. } => {
                    // The car stops at the shaft's end even when the answer overshoots.
                    let floor = (*result_floor).clamp(MIN_FLOOR, MAX_FLOOR);
                    writeln!(out, "{}", t.get("controls.elevatorMoving"))?;
                    writeln!(out, "{}", t.text("cli.arrived", &[("floor", &floor)]))?;
                    let mood =
                        if *correct { "controls.monkeyHappy" } else { "controls.monkeyConfused" };
                    writeln!(out, "{}", t.get(mood))?;
                }
                LogEvent::PointsAwarded { score, .. } => {
                    writeln!(out, "{}", t.text("scoreboard.score", &[("score", score)]))?;
                }
                LogEvent::SessionFinished { score, correct_answers } => {
                    writeln!(out, "{}", t.get("gameOverScreen.title"))?;
                    let final_score = t.text("gameOverScreen.yourFinalScore", &[("score", score)]);
                    writeln!(out, "{final_score}")?;
                    writeln!(
                        out,
                        "{}",
                        t.text("gameOverScreen.answeredCorrectly", &[
                            ("correctCount", correct_answers),
                            ("totalQuestions", &TOTAL_QUESTIONS),
                        ])
                    )?;
                }
                LogEvent::SessionStarted { .. }
                | LogEvent::DifficultyChanged { .. }
                | LogEvent::StaleTimerDiscarded { .. } => {}
            }
        }
        self.shown = self.game.log().len();
        Ok(())
    }

    fn render_prompt<W: Write>(&self, out: &mut W) -> Result<()> {
        let t = self.catalog;
        let line = match self.game.session().phase {
            Phase::Initial => {
                t.text("cli.startHint", &[("action", &t.get("initialScreen.startGame"))])
            }
            Phase::GameOver => {
                t.text("cli.startHint", &[("action", &t.get("gameOverScreen.playAgain"))])
            }
            Phase::AwaitingOperator => t.get("controls.operatorPrompt"),
            Phase::AwaitingNumber => t.get("controls.numberPrompt"),
            Phase::Entering => t.get("controls.monkeyGettingReady"),
            Phase::Transit | Phase::Feedback => t.get("controls.elevatorMoving"),
        };
        if let Some(equation) = self.game.snapshot().equation() {
            writeln!(out, "{equation}")?;
        }
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
