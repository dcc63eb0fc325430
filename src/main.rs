//! Terminal racer (default binary).
//!
//! Loads settings, splits the terminal between the players and runs the
//! race one turn per frame until every car has finished, crashed, or the
//! players quit with Esc. The result stays on screen until Esc is pressed.

use std::fs::File;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use tui_racer::core::{InputSource, Race};
use tui_racer::input::TerminalInput;
use tui_racer::settings;
use tui_racer::term::{draw_message, Cell, FrameBuffer, SplitLayout, TerminalRenderer};
use tui_racer::types::RaceConfig;

fn main() -> Result<()> {
    let settings = settings::load()?;
    init_logging(settings.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &settings.race);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file when one is configured. The screen belongs to the game.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &RaceConfig) -> Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let config = config.resolved(width, height);
    let layout = SplitLayout::new(config.split, config.player_count(), width, height);
    let delay = Duration::from_millis(config.frame_delay_ms);

    let mut race = Race::new(config, layout.panes())?;
    let mut input = TerminalInput::new();
    let mut screen = FrameBuffer::new(width, height);

    loop {
        let going = race.tick(&mut input);

        screen.clear(Cell::default());
        layout.compose(race.players().iter().map(|p| p.surface()), &mut screen);
        if !going {
            break;
        }
        term.draw_swap(&mut screen)?;
        thread::sleep(delay);
    }

    if let Some(summary) = race.summary() {
        draw_message(&mut screen, &summary.to_string());
    }
    term.draw_swap(&mut screen)?;

    wait_for_quit(&mut input, delay);
    if input.errors() > 0 {
        log::warn!("{} terminal input errors during the race", input.errors());
    }
    Ok(())
}

fn wait_for_quit<I: InputSource>(input: &mut I, delay: Duration) {
    loop {
        while let Some(key) = input.poll_key() {
            if key.is_quit() {
                return;
            }
        }
        thread::sleep(delay);
    }
}
