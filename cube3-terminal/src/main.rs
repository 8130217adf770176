/// Cube3 Terminal - 3x3x3 puzzle in the terminal
///
/// Controls:
///   - U/D/L/R/F/B: Turn that face clockwise
///   - Arrow Keys: Orbit the view
///   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use cube3_core::{scramble, Algorithm, LayerRotator};
use cube3_terminal::TerminalApp;
use log::LevelFilter;
use rand::Rng;

#[derive(Parser, Debug)]
#[command(version, about = "Turn a 3x3x3 cube puzzle in the terminal")]
struct Cli {
    /// Log level; records go to stderr
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Number of random moves applied at start-up
    #[arg(short, long)]
    scramble: Option<usize>,

    /// Seed for --scramble (random when omitted)
    #[arg(long, requires = "scramble")]
    seed: Option<u64>,

    /// Moves applied at start-up, after any scramble, e.g. "R U R' U'"
    #[arg(short, long)]
    moves: Option<Algorithm>,
}

/// The given seed, or a fresh one from the thread-local RNG
fn scramble_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .init();

    let mut rotator = LayerRotator::default();

    if let Some(length) = cli.scramble {
        let seed = scramble_seed(cli.seed);
        let alg = scramble(length, seed);
        log::info!("scrambling with seed {seed}: {alg}");
        alg.apply(&mut rotator).context("applying scramble")?;
    }

    if let Some(alg) = &cli.moves {
        log::info!("applying {alg}");
        alg.apply(&mut rotator).context("applying --moves")?;
    }

    let mut app = TerminalApp::new(rotator, cli.fps).context("reading terminal size")?;
    app.run().context("terminal I/O")?;

    Ok(())
}
