//! Nexus Bird headless runner
//!
//! Drives the simulation with the autopilot, logging every event the audio and
//! UI collaborators would receive, and persists the high score.
//!
//! Usage: `nexus-bird [--seed N] [--ticks N] [--runs N] [--settings PATH]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;

use nexus_bird::sim::{GameEvent, GameState, RunPhase, TickInput, leaderboard_summary, tick};
use nexus_bird::{HighScoreStore, HighScoreTracker, JsonFileStore, Settings};

/// Headless autopilot runs with high-score persistence
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed; falls back to the settings file, then the clock
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Maximum ticks to simulate (60 per second)
    #[arg(
        long,
        value_name = "TICKS",
        default_value_t = 60 * 60 * 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ticks: u64,
    /// Stop after this many finished runs
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    runs: u32,
    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Nexus Bird (headless) starting...");

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
    let mut tracker = HighScoreTracker::new(JsonFileStore::new(&settings.high_score_path));
    let mut state = GameState::with_config(seed, settings.sim_config()).with_high_score(tracker.best());

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut finished_runs = 0;
    for _ in 0..args.ticks {
        // Autopilot restarts after game over; stop before the extra run begins
        if state.phase == RunPhase::GameOver && finished_runs >= args.runs {
            break;
        }
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::Sound(cue) => log::trace!("sound: {}", cue.as_str()),
                GameEvent::Notify { message, severity } => log::info!("[{severity:?}] {message}"),
                GameEvent::AchievementUnlocked { text, .. } => log::info!("Achievement: {text}"),
                GameEvent::LevelUp { level } => log::debug!("level -> {level}"),
                GameEvent::LifeLost { lives } => log::debug!("lives -> {lives}"),
                GameEvent::GameOver(summary) => {
                    finished_runs += 1;
                    if let Err(e) = tracker.submit(&summary) {
                        log::error!(
                            "Could not save high score to {}: {e}",
                            tracker.store().path().display()
                        );
                    }
                    println!(
                        "run {finished_runs}: score {} wave {} efficiency {}% (best {})",
                        summary.score, summary.level, summary.efficiency, summary.high_score
                    );
                }
            }
        }
    }

    println!("{}", leaderboard_summary(&state));
    log::info!(
        "Stopped after {} runs; stored best {}",
        finished_runs,
        tracker.store().load().map(|r| r.high_score).unwrap_or(0)
    );
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
