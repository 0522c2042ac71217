//! Hoop Flick entry point
//!
//! Headless runner: plays one seeded session with the demo player, records
//! the result in the leaderboard file and prints the standings.
//!
//! Usage:
//!   RUST_LOG=info cargo run --release -- --seed 42

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use hoop_flick::autoplay::run_session;
use hoop_flick::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use hoop_flick::highscores::{HighScoreStore, JsonFileStore, format_age, unix_millis};
use hoop_flick::settings::Settings;
use hoop_flick::sim::WorldBounds;

#[derive(Parser)]
#[command(name = "hoop-flick")]
#[command(about = "Play a seeded flick-to-shoot basketball session headlessly")]
struct Args {
    /// RNG seed for the demo player (defaults to the current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings JSON (missing fields fall back to defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Leaderboard JSON file
    #[arg(long, default_value = "hoop_flick_highscores.json")]
    highscores: PathBuf,

    /// World width in pixels
    #[arg(long, default_value_t = WORLD_WIDTH)]
    width: f32,

    /// World height in pixels
    #[arg(long, default_value_t = WORLD_HEIGHT)]
    height: f32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    for warning in settings.validate() {
        println!("warning: {warning}");
    }

    let seed = args.seed.unwrap_or_else(|| unix_millis() as u64);
    let frame_dt = 1.0 / args.fps.max(1) as f32;
    let bounds = WorldBounds::new(args.width, args.height);
    log::info!("Hoop Flick starting (seed {seed}, {}x{}, {} fps)", args.width, args.height, args.fps);

    let store = JsonFileStore::new(&args.highscores);
    let summary = run_session(settings, bounds, Box::new(store), seed, frame_dt);

    println!();
    println!("=== SESSION OVER ===");
    println!("  Seed:         {seed}");
    println!("  Score:        {}", summary.score);
    println!("  Shots:        {}", summary.shots);
    println!("  Accuracy:     {:.0}%", summary.accuracy() * 100.0);
    println!("  Bounce-outs:  {}", summary.bounce_outs);
    println!("  Frames:       {}", summary.frames);
    match summary.high_score {
        Some(outcome) if outcome.new_high_score => {
            println!("  High score:   {} (NEW!)", outcome.high_score)
        }
        Some(outcome) => println!("  High score:   {}", outcome.high_score),
        None => println!("  High score:   unavailable (see log)"),
    }

    let scores = JsonFileStore::new(&args.highscores).load()?;
    if !scores.is_empty() {
        let now = unix_millis();
        println!();
        println!("=== LEADERBOARD ===");
        for (i, entry) in scores.entries.iter().enumerate() {
            println!(
                "  {:>2}. {:>4}  {}",
                i + 1,
                entry.score,
                format_age(entry.timestamp, now)
            );
        }
    }
    Ok(())
}
