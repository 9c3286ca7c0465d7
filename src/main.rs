use calico_mcts::game::action::ActionMode;
use calico_mcts::game::layouts::BoardLayout;
use calico_mcts::logging::setup_logging;
use calico_mcts::runner::{play_games, ScoreSummary};
use calico_mcts::{CalicoError, EngineConfig};
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ActionModeCli {
    Separate,
    Combined,
}

impl From<ActionModeCli> for ActionMode {
    fn from(cli: ActionModeCli) -> Self {
        match cli {
            ActionModeCli::Separate => ActionMode::Separate,
            ActionModeCli::Combined => ActionMode::Combined,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LayoutCli {
    Teal,
    Yellow,
    Purple,
    Green,
}

impl From<LayoutCli> for BoardLayout {
    fn from(cli: LayoutCli) -> Self {
        match cli {
            LayoutCli::Teal => BoardLayout::Teal,
            LayoutCli::Yellow => BoardLayout::Yellow,
            LayoutCli::Purple => BoardLayout::Purple,
            LayoutCli::Green => BoardLayout::Green,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "calico_mcts", about = "Play Calico games with the MCTS agent")]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 10)]
    num_games: usize,

    /// Seed of the first game; game i uses seed + i
    #[arg(short = 'r', long, default_value_t = 2025)]
    seed: u64,

    /// JSON engine configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search iterations per decision
    #[arg(short = 's', long)]
    iterations: Option<usize>,

    /// UCB1 exploration constant
    #[arg(long)]
    exploration: Option<f64>,

    /// Empty cells at or below which leaves are scored by rollouts
    #[arg(long)]
    late_game_threshold: Option<usize>,

    /// Score every leaf with a rollout instead of the heuristic
    #[arg(long, default_value_t = false)]
    no_heuristic: bool,

    /// Use greedy heuristic rollouts instead of random ones
    #[arg(long, default_value_t = false)]
    deterministic_rollout: bool,

    /// Action model: place and choose as one action or as two
    #[arg(long, value_enum)]
    action_mode: Option<ActionModeCli>,

    /// Rim layout of the player board
    #[arg(long, value_enum)]
    layout: Option<LayoutCli>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Directory for one JSON record per game
    #[arg(long)]
    record_dir: Option<PathBuf>,

    /// Log to rotating files in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig, CalicoError> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };
        let search = &mut config.search;
        if let Some(iterations) = self.iterations {
            search.iterations = iterations;
        }
        if let Some(c) = self.exploration {
            search.exploration_constant = c;
        }
        if let Some(threshold) = self.late_game_threshold {
            search.late_game_threshold = threshold;
        }
        if self.no_heuristic {
            search.use_heuristic = false;
        }
        if self.deterministic_rollout {
            search.deterministic_rollout = true;
        }
        if let Some(mode) = self.action_mode {
            search.action_mode = mode.into();
        }
        if let Some(layout) = self.layout {
            config.game.layout = layout.into();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging("info", args.log_dir.as_deref())?;

    let config = args.engine_config()?;
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    log::info!("{} {}", calico_mcts::NAME, calico_mcts::VERSION);
    log::info!(
        "Games: {}, first seed: {}, search: {}",
        args.num_games,
        args.seed,
        config.search.to_config_string()
    );

    let seeds: Vec<u64> = (0..args.num_games as u64)
        .map(|i| args.seed.wrapping_add(i))
        .collect();
    let records = play_games(&config.game, &config.search, &seeds);

    for record in &records {
        log::info!("seed {}: {} points", record.seed, record.final_score);
        if let Some(breakdown) = &record.breakdown {
            log::debug!("seed {}:\n{}", record.seed, breakdown);
        }
    }

    if let Some(dir) = &args.record_dir {
        std::fs::create_dir_all(dir)?;
        for record in &records {
            record.save(dir.join(format!("game_{}_{}.json", record.seed, record.game_id)))?;
        }
        log::info!("Wrote {} game records to {}", records.len(), dir.display());
    }

    let scores: Vec<u32> = records.iter().map(|r| r.final_score).collect();
    println!("\n{}", "=".repeat(60));
    println!("===== MCTS Self-Play =====");
    println!("Configuration : {}", config.search.to_config_string());
    match ScoreSummary::from_scores(&scores) {
        Some(summary) => println!("Score         : {}", summary),
        None => println!("No games played."),
    }
    println!("{}", "=".repeat(60));

    Ok(())
}
