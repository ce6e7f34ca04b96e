//! Jam Pong entry point
//!
//! Runs the game loop against the wall clock with the terminal as player 1's
//! keyboard and log-backed display, lights and audio.
//!
//! Usage: `jam-pong [settings.json]` (or set `JAM_PONG_SETTINGS`).

use std::io::Write;
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use jam_pong::audio::{AudioManager, LogSink};
use jam_pong::input::InputAggregator;
use jam_pong::platform::{NativeProcess, RawTerminal, Session, TerminalKeyboard};
use jam_pong::renderer::{LogLights, LogRenderer};
use jam_pong::sim::GameState;
use jam_pong::{GameLoop, LoopStatus, Outputs, Settings};

/// Lights on the simulated ambient strip
const AMBIENT_LIGHTS: usize = 5;

fn main() -> ExitCode {
    // Raw mode drops the carriage return from newlines
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            write!(buf, "[{} {}] {}\r\n", record.level(), record.target(), record.args())
        })
        .init();
    log::info!("Jam Pong (native) starting...");

    let path = Settings::resolve_path(std::env::args().nth(1));
    let settings = match Settings::load_or_default(path.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let state = match GameState::new(settings.clone(), seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Game initialized with seed: {}", seed);

    let terminal = match RawTerminal::enable() {
        Ok(terminal) => terminal,
        Err(e) => {
            log::error!("Failed to switch the terminal to raw mode: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let input = InputAggregator::new(&settings).with_keyboard(Box::new(TerminalKeyboard::new()));
    let outputs = Outputs {
        renderer: Box::new(LogRenderer::default()),
        audio: AudioManager::new(Some(Box::new(LogSink))),
        ambient: Some(Box::new(LogLights::new(AMBIENT_LIGHTS))),
    };
    // Releasing the session restores the terminal, on exit or on drop
    let session = Session::new(Some(Box::new(terminal)), Box::new(NativeProcess));
    let mut game = GameLoop::new(state, input, outputs, session);

    log::info!("Press Enter or Space to serve, arrow keys to move, Esc or q to quit");

    let start = Instant::now();
    while let Some(due) = game.next_due() {
        let elapsed = start.elapsed();
        if due > elapsed {
            std::thread::sleep(due - elapsed);
        }
        if game.step() == LoopStatus::Exited {
            break;
        }
    }

    ExitCode::SUCCESS
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
