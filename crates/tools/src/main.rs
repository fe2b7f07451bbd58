use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use elevator_core::{
    Difficulty, Game, JournalWriter, SessionConfig, load_journal_from_file, replay_game,
};
use elevator_tools::format_snapshot_hash;
use elevator_tools::play::{Session, default_journal_path};
use elevator_tools::sample::sample;
use elevator_tools::seed::SeedChoice;
use elevator_tools::strings::{Catalog, Locale};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a session in the terminal
    Play {
        #[arg(short, long)]
        seed: Option<u64>,
        /// Session tuning in TOML
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = Locale::En)]
        locale: Locale,
        /// Where to write the session journal
        #[arg(short, long)]
        journal: Option<PathBuf>,
    },
    /// Verify a journal file and replay it to the end
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
        /// Also print the final snapshot as JSON
        #[arg(long)]
        snapshot: bool,
    },
    /// Report the generator's distribution at one difficulty
    Sample {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        difficulty: u8,
        #[arg(short, long, default_value_t = 10_000)]
        count: usize,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        near_zero_percent: u8,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Play { seed, config, locale, journal } => play(seed, config, locale, journal),
        Command::Replay { journal, snapshot } => replay(&journal, snapshot),
        Command::Sample { difficulty, count, seed, near_zero_percent, json } => {
            let difficulty = Difficulty::try_from(difficulty)?;
            let stats = sample(difficulty, count, seed, near_zero_percent);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                for line in stats.report_lines() {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

fn play(
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    locale: Locale,
    journal_path: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => SessionConfig::load(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let seed = SeedChoice::resolve(seed);
    info!("playing with {seed:?}");

    let catalog = Catalog::new(locale);
    let journal_path = journal_path.or_else(|| default_journal_path(seed.value()));
    let writer = match &journal_path {
        Some(path) => Some(
            JournalWriter::create(path, seed.value(), &config)
                .with_context(|| format!("Failed to create journal: {}", path.display()))?,
        ),
        None => None,
    };

    let mut session = Session::new(Game::new(seed.value(), config), &catalog, writer);
    let stdin = io::stdin();
    session.run(stdin.lock(), &mut io::stdout())?;

    println!("Seed: {}", seed.value());
    println!("Snapshot Hash: {}", format_snapshot_hash(session.game().snapshot_hash()));
    if let Some(path) = journal_path {
        println!("{}", catalog.text("cli.journal", &[("path", &path.display())]));
    }
    Ok(())
}

fn replay(path: &Path, print_snapshot: bool) -> Result<()> {
    let loaded = load_journal_from_file(path)
        .with_context(|| format!("Failed to load journal file: {}", path.display()))?;
    let mut game = replay_game(&loaded.journal).context("Replay failed during execution")?;
    game.settle();

    let session = game.session();
    println!("Replay complete.");
    println!("Inputs: {}", loaded.journal.inputs.len());
    println!("Final Phase: {:?}", session.phase);
    println!("Score: {} ({} correct)", session.score, session.correct_answers);
    println!("Final Time: {} ms", game.current_time_ms());
    println!("Snapshot Hash: {}", format_snapshot_hash(game.snapshot_hash()));
    if print_snapshot {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }
    Ok(())
}
