//! Console Othello: you play Black against the greedy computer.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use othello::ai::GreedySelector;
use othello::config::GameConfig;
use othello::error::FrontendError;
use othello::frontend::Driver;
use othello::frontend::console::{ConsoleInput, ConsoleRenderer};
use othello::game::Session;

#[derive(Debug, Parser)]
#[command(about = "Play Othello against a greedy computer opponent")]
struct Args {
    /// Seed for the computer's tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before each computer move, in milliseconds
    #[arg(long, default_value_t = 0)]
    ai_delay_ms: u64,
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        GameConfig {
            seed: args.seed,
            ai_delay_ms: args.ai_delay_ms,
            ..GameConfig::default()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match play(Args::parse().into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "console game failed");
            ExitCode::FAILURE
        }
    }
}

fn play(config: GameConfig) -> Result<(), FrontendError> {
    let config = config.validate()?;
    let mut session = Session::new();
    let mut driver = Driver::new(GreedySelector::from_seed(config.seed));
    let mut renderer = ConsoleRenderer::new(
        io::stdout().lock(),
        driver.human(),
        Duration::from_millis(config.ai_delay_ms),
    );
    let mut input = ConsoleInput::new(io::stdin().lock());

    driver.run(&mut session, &mut renderer, &mut input)?;
    Ok(())
}
