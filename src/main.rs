//! Headless AI-vs-AI runner (default binary).
//!
//! Plays one duel between two tree-search agents on a shared 7-bag queue and prints the
//! final report as JSON on stdout. Logs go to stderr.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use tetro_duel::search::{Duel, DuelConfig, Weights};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Seed for the piece queue and garbage holes
    #[arg(long)]
    seed: Option<u32>,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<usize>,

    /// Length of the shared piece queue
    #[arg(long)]
    queue_len: Option<usize>,

    /// Search depth for both players (root counts as 1)
    #[arg(long)]
    depth: Option<usize>,

    /// Children kept per node for both players
    #[arg(long)]
    beam: Option<usize>,

    /// Comma-separated weights for the first player (12 values)
    #[arg(long)]
    weights_first: Option<Weights>,

    /// Comma-separated weights for the second player (12 values)
    #[arg(long)]
    weights_second: Option<Weights>,

    /// Also print both final boards to stderr
    #[arg(long)]
    show_boards: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn duel_config(&self) -> DuelConfig {
        let mut config = DuelConfig::from_env();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(queue_len) = self.queue_len {
            config.queue_len = queue_len;
        }
        for search in [&mut config.first, &mut config.second] {
            if let Some(depth) = self.depth {
                search.max_depth = depth;
            }
            if let Some(beam) = self.beam {
                search.beam_width = beam;
            }
        }
        if let Some(weights) = self.weights_first {
            config.first.evaluator.weights = weights;
        }
        if let Some(weights) = self.weights_second {
            config.second.evaluator.weights = weights;
        }
        config
    }
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = args.duel_config();
    config.validate().context("invalid duel configuration")?;
    log::info!(
        "starting duel: seed {}, depth {}/{}, beam {}/{}",
        config.seed,
        config.first.max_depth,
        config.second.max_depth,
        config.first.beam_width,
        config.second.beam_width
    );

    let report = Duel::new(config).run();

    if args.show_boards {
        for (i, player) in report.players.iter().enumerate() {
            eprintln!("player {}:", i + 1);
            for line in player.snapshot.board_lines() {
                eprintln!("  {line}");
            }
        }
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize duel report")?;
    println!("{json}");

    Ok(())
}
