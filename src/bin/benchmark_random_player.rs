/// Benchmark Random Player (Baseline)
///
/// Plays games with uniformly random legal actions to establish a baseline
/// for comparison with the MCTS agent.
use calico_mcts::game::action::ActionMode;
use calico_mcts::logging::setup_logging;
use calico_mcts::runner::ScoreSummary;
use calico_mcts::{GameOptions, GameState};
use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "benchmark-random-player",
    about = "Benchmark random action selection as baseline for MCTS comparison"
)]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value_t = 100)]
    games: usize,

    /// Seed of the first game; game i uses seed + i
    #[arg(short = 'r', long, default_value_t = 2025)]
    seed: u64,

    /// Place and choose as a single action
    #[arg(long, default_value_t = false)]
    combined: bool,

    /// CSV path to append results (empty to skip)
    #[arg(long, default_value = "benchmark_random_player.csv")]
    log_path: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging("info", None)?;

    let mode = if args.combined {
        ActionMode::Combined
    } else {
        ActionMode::Separate
    };
    log::info!("Random Player Baseline");
    log::info!("   Games: {}, Seed: {}, Mode: {:?}", args.games, args.seed, mode);

    let options = GameOptions::default();
    let mut scores = Vec::with_capacity(args.games);
    for game_idx in 0..args.games {
        let mut state = GameState::new(&options, args.seed.wrapping_add(game_idx as u64));
        scores.push(state.play_random_game(mode));

        if (game_idx + 1) % 10 == 0 {
            log::info!("   Completed {}/{} games", game_idx + 1, args.games);
        }
    }

    let Some(summary) = ScoreSummary::from_scores(&scores) else {
        println!("No games played.");
        return Ok(());
    };

    println!("\n{}", "=".repeat(60));
    println!("===== Random Player Baseline =====");
    println!("Games simulated    : {}", summary.games);
    println!("Score              : {}", summary);
    println!("{}", "=".repeat(60));

    if !args.log_path.is_empty() {
        let path = Path::new(&args.log_path);
        let needs_header = !path.exists();

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        if needs_header {
            writeln!(file, "timestamp,games,mode,seed,mean,std_dev,min,max")?;
        }

        writeln!(
            file,
            "{},{},{:?},{},{:.2},{:.2},{},{}",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            summary.games,
            mode,
            args.seed,
            summary.mean,
            summary.std_dev,
            summary.min,
            summary.max
        )?;

        log::info!("Results appended to {}", args.log_path);
    }

    Ok(())
}
