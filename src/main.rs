//! Carrom Sim headless runner
//!
//! Plays the AI against the autopilot and reports the result.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Default tick limit (about an hour of play at 60 ticks/sec)
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 60 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "carrom-sim")]
#[command(about = "Play a headless AI-vs-autopilot carrom match", long_about = None)]
struct Args {
    /// Settings JSON to start from
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Seed for the AI aim error
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty name (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<String>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = MAX_TICKS)]
    max_ticks: u64,

    /// Write the effective settings here
    #[arg(long)]
    save: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use carrom_sim::sim::Turn;
    use carrom_sim::{Session, Settings};

    env_logger::init();
    log::info!("Carrom Sim (headless) starting...");

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(difficulty) = &args.difficulty {
        settings.difficulty = difficulty.clone();
    }
    settings.autopilot = true;
    if let Some(path) = &args.save {
        settings.save_to(path);
    }

    let mut session = Session::new(&settings);
    let winner = session.run_until_over(args.max_ticks);

    let state = session.state();
    println!(
        "ticks: {}  turns: {}  coins left: player {}, ai {}  queen: {:?}",
        state.time_ticks,
        state.turn_serial,
        state.coins_left(Turn::Player),
        state.coins_left(Turn::Ai),
        state.queen
    );
    match winner {
        Some(side) => println!("{} wins", side.as_str()),
        None => println!("No winner after {} ticks", args.max_ticks),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the wasm surface; nothing to run here
}
