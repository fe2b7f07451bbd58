use anyhow::{Result, ensure};
use clap::Parser;
use elevator_core::problem::mix_seed_stream;
use elevator_core::{
    Game, Intent, IntentOutcome, MAX_FLOOR, MIN_FLOOR, Operator, POINTS_PER_CORRECT, Phase,
    SessionConfig, TOTAL_QUESTIONS, replay_to_end,
};
use elevator_tools::format_snapshot_hash;
use log::debug;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short = 'n', long, default_value_t = 100)]
    sessions: u32,
    /// Intents fed to each session
    #[arg(long, default_value_t = 500)]
    steps: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

/// Mostly sensible play with restarts, stray submits and bad operands mixed in.
fn next_intent(rng: &mut ChaCha8Rng, game: &Game) -> Intent {
    let session = game.session();
    if rng.next_u64() % 25 == 0 {
        return Intent::StartGame;
    }
    match session.phase {
        Phase::Initial | Phase::GameOver => {
            choose(rng, &[Intent::StartGame, Intent::StartGame, Intent::Submit])
        }
        Phase::AwaitingOperator | Phase::AwaitingNumber => {
            let solution = session.problem.map(|problem| problem.solution());
            match (rng.next_u64() % 6, solution) {
                (0, Some((operator, _))) => Intent::SelectOperator(operator),
                (1, Some((_, operand))) => Intent::SelectNumber(operand),
                (2, _) => Intent::SelectOperator(choose(rng, &[Operator::Up, Operator::Down])),
                (3, _) => Intent::SelectNumber((rng.next_u64() % 12) as u8),
                _ => Intent::Submit,
            }
        }
        Phase::Entering | Phase::Transit | Phase::Feedback => {
            choose(rng, &[Intent::Submit, Intent::SelectNumber(3)])
        }
    }
}

fn check_invariants(game: &Game) -> Result<()> {
    let session = game.session();
    ensure!(
        session.score == u32::from(session.correct_answers) * POINTS_PER_CORRECT,
        "score {} does not match {} correct answers",
        session.score,
        session.correct_answers
    );
    ensure!(session.question_index <= TOTAL_QUESTIONS, "question {}", session.question_index);
    let selection_cleared = session.selection.operand.is_none() || session.verdict.is_some();
    ensure!(
        session.phase.is_interactive() || selection_cleared,
        "selection survived into {:?}",
        session.phase
    );
    if let Some(problem) = session.problem {
        ensure!((1..=10).contains(&problem.distance()), "unanswerable {problem:?}");
    }
    if let Some(floor) = game.snapshot().display_floor {
        ensure!((MIN_FLOOR..=MAX_FLOOR).contains(&floor), "car drawn at floor {floor}");
    }
    Ok(())
}

fn run_session(seed: u64, steps: u32) -> Result<u64> {
    let mut game = Game::new(seed, SessionConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..steps {
        let intent = next_intent(&mut rng, &game);
        let before = game.snapshot_hash();
        if let IntentOutcome::Ignored(reason) = game.apply(intent) {
            ensure!(
                game.snapshot_hash() == before,
                "ignored {intent:?} ({reason:?}) changed the session"
            );
        }
        check_invariants(&game)?;
        game.advance(rng.next_u64() % 3_000);
        check_invariants(&game)?;
    }
    game.settle();

    let replayed = replay_to_end(game.journal())?;
    ensure!(
        replayed.final_snapshot_hash == game.snapshot_hash(),
        "replay diverged: {} vs {}",
        format_snapshot_hash(replayed.final_snapshot_hash),
        format_snapshot_hash(game.snapshot_hash())
    );
    Ok(game.snapshot_hash())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seed {} for {} sessions of {} intents...",
        args.seed, args.sessions, args.steps
    );
    let mut finished = 0;
    for index in 0..u64::from(args.sessions) {
        let seed = mix_seed_stream(args.seed, index);
        let hash = run_session(seed, args.steps)?;
        debug!("session {index} (seed {seed}) ended at {}", format_snapshot_hash(hash));
        finished += 1;
    }

    println!("Fuzzing completed successfully: {finished} sessions replayed identically.");
    Ok(())
}
