use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::error;
use tracing_subscriber::EnvFilter;

use chess_referee::config::{GameConfig, DEFAULT_INITIAL_TIME_SECS};
use chess_referee::console::session::run_console;

/// Two-player chess at the terminal, with move legality and draw rules enforced.
#[derive(Parser, Debug)]
#[command(name = "chess_referee", version, about)]
struct Args {
    /// Play without clocks.
    #[arg(long)]
    untimed: bool,

    /// Minutes on each clock in timed play.
    #[arg(long, value_name = "N", conflicts_with = "untimed")]
    minutes: Option<u64>,

    /// Start from this position instead of the standard one.
    #[arg(long, value_name = "FEN")]
    fen: Option<String>,

    /// Seed for the `random` command.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        if self.untimed {
            return GameConfig::untimed();
        }
        let secs = self
            .minutes
            .map_or(DEFAULT_INITIAL_TIME_SECS, |minutes| minutes.saturating_mul(60));
        GameConfig::timed(secs)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    match run_console(args.game_config(), args.fen.as_deref(), rng) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "console session failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
