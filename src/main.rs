use std::io;
use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use log::info;
use slide_2048::engine::TileSpawner;
use slide_2048::game::Game;
use slide_2048::ui::{self, TerminalFrontend};

#[derive(Parser, Debug)]
#[command(
    name = "slide-2048",
    version,
    about = "Play 2048 in the terminal (W/A/S/D to move, Q to quit)"
)]
struct Args {
    /// Seed for tile placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Pause after each redraw, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
    /// Do not clear the screen between turns
    #[arg(long)]
    no_clear: bool,
    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    let spawner = match args.seed {
        Some(seed) => TileSpawner::seeded(seed),
        None => TileSpawner::from_entropy(),
    };
    let mut game = Game::with_spawner(spawner);
    info!("new game, seed={:?}", args.seed);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut frontend = TerminalFrontend::new(stdin.lock(), stdout.lock())
        .with_delay(Duration::from_millis(args.delay_ms))
        .with_clear(!args.no_clear);

    match ui::run(&mut game, &mut frontend)? {
        Some(score) => info!("finished with {score} after {} moves", game.moves()),
        None => info!("quit after {} moves", game.moves()),
    }
    Ok(())
}
