//! BLOCKFALL terminal driver
//!
//! Polls the keyboard, runs the gravity clock and draws; one engine call per
//! recognised event.

use blockfall::input::KeyBindings;
use blockfall::settings::Settings;
use blockfall::{ui, view, Action, GameEngine};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Input delay after game over to prevent an accidental exit
const GAME_OVER_INPUT_DELAY: Duration = Duration::from_millis(750);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file: the terminal belongs to the game
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "blockfall=debug".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let keys = KeyBindings::from_settings(&settings);
    let mut game = match settings.gameplay.seed {
        Some(seed) => GameEngine::with_seed(seed),
        None => GameEngine::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut game, &keys, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result?;
    // Leave the final board on the restored terminal
    println!("{}", view::render_text(&game, false));
    if game.is_game_over() {
        println!("Game Over!");
    }
    println!(
        "Lines: {} | Blocks: {}",
        game.lines_cleared(),
        game.blocks_locked()
    );
    tracing::info!(
        lines = game.lines_cleared(),
        blocks = game.blocks_locked(),
        "session ended"
    );
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut GameEngine,
    keys: &KeyBindings,
    settings: &Settings,
) -> io::Result<()> {
    let tick = Duration::from_millis(settings.gameplay.tick_ms.max(1));
    let mut last_tick = Instant::now();
    let mut game_over_at: Option<Instant> = None;

    loop {
        let next = game.next_kind();
        terminal.draw(|frame| ui::render_game(frame, game, next, settings))?;

        if game.is_game_over() {
            let since = *game_over_at.get_or_insert_with(Instant::now);
            // Wait for any key once the overlay has been up briefly
            if event::poll(FRAME_DURATION)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && since.elapsed() >= GAME_OVER_INPUT_DELAY
                    {
                        return Ok(());
                    }
                }
            }
            continue;
        }

        let timeout = tick.saturating_sub(last_tick.elapsed()).min(FRAME_DURATION);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match keys.action_for(key) {
                        Some(Action::Quit) => {
                            tracing::info!("quit requested");
                            return Ok(());
                        }
                        Some(action) => game.process_action(action),
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick {
            game.process_action(Action::SoftDrop);
            last_tick = Instant::now();
        }
    }
}
