//! Terminal arcade runner.
//!
//! `tui-arcade [2048|snake|fall]`; without an argument the hub menu opens.
//! crossterm for input, the framebuffer diff renderer for output.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event;

use tui_arcade::app::{App, Flow, HostEnv};
use tui_arcade::config::{parse_args, HostConfig};
use tui_arcade::logger;
use tui_arcade::term::{FrameBuffer, TerminalRenderer, Viewport};
use tui_arcade::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let choice = parse_args(&args)?;
    let config = HostConfig::from_env();
    if let Some(path) = &config.log_path {
        logger::init(path, config.log_level)?;
    }
    log::info!("[main] starting with {:?}", config);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let viewport = Viewport::new(w, h);
    let host = HostEnv::from_config(&config);
    // Fatal init fails here, before the terminal is taken over
    let app = match choice {
        Some(choice) => App::with_game(host, viewport, choice)?,
        None => App::new(host, viewport),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, app);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("[main] {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, mut app: App) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        app.render(&mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            let ev = event::read()?;
            if let event::Event::Resize(w, h) = ev {
                app.resize(Viewport::new(w, h));
                term.invalidate();
            } else if app.handle_event(&ev)? == Flow::Quit {
                return Ok(());
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            app.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
            last_tick = Instant::now();
        }
    }
}
