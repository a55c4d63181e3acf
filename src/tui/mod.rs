//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders `App`, and turns
//! crossterm events into core actions through [`event_loop::EventLoop`].
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Three sources are merged with `tokio::select!`: terminal input, a tick
//! timer, and the completion channel. A frame is drawn only when handling an
//! event reported `Flow::Redraw`. Ticks only redraw while a request is
//! pending, so an idle screen costs nothing.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, which makes a blinking cursor stutter under the spinner.

mod component;
mod components;
pub mod event;
pub mod event_loop;
pub mod theme;
mod ui;

use std::io::{Write, stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    EventStream,
};
use crossterm::execute;
use futures::StreamExt;
use log::{error, info, warn};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::Provider;
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{CompletionClient, CompletionError, LmStudioProvider, OpenAiProvider};
use crate::tui::event_loop::{EventLoop, Flow, LoopEvent};
use crate::tui::theme::Theme;

/// Spinner frame interval.
const TICK_INTERVAL: Duration = Duration::from_millis(80);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for query editing
            SetCursorStyle::SteadyBlock, // Non-blinking, see module docs
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

/// Undo what `TerminalModeGuard::new` enabled.
///
/// Ends with the cursor visible: ratatui only re-shows a cursor it hid
/// itself, and the query prompt leaves it shown from ratatui's point of view.
fn reset_terminal_modes<W: Write>(out: &mut W) -> std::io::Result<()> {
    execute!(
        out,
        DisableMouseCapture,
        DisableBracketedPaste,
        SetCursorStyle::DefaultUserShape,
        Show
    )
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = reset_terminal_modes(&mut stdout());
    }
}

/// Build the completion client selected by the resolved config.
///
/// Fails with `CompletionError::Authentication` when the provider needs a key
/// and none was found.
pub fn build_client(config: &ResolvedConfig) -> Result<Arc<dyn CompletionClient>, CompletionError> {
    let client: Arc<dyn CompletionClient> = match config.provider {
        Provider::OpenAi => Arc::new(OpenAiProvider::new(
            config.api_key.clone(),
            Some(config.openai_base_url.clone()),
            config.model_name.clone(),
            config.request_timeout,
        )?),
        Provider::LmStudio => Arc::new(LmStudioProvider::new(
            Some(config.lmstudio_base_url.clone()),
            config.model_name.clone(),
            config.request_timeout,
        )?),
    };
    Ok(client)
}

/// Build the initial app: ready to type, or Misconfigured if no client.
fn initial_state(config: &ResolvedConfig) -> (App, Option<Arc<dyn CompletionClient>>) {
    let app = App::from_config(config);
    match build_client(config) {
        Ok(client) => {
            info!("Using provider '{}' with model '{}'", client.name(), config.model_name);
            (app, Some(client))
        }
        Err(e) => {
            warn!("No usable completion client: {}", e);
            (app.misconfigured(e.to_string()), None)
        }
    }
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let theme = Theme::named(&config.theme);
    info!("Using theme '{}'", theme.name);
    let (app, client) = initial_state(&config);

    let (tx, rx) = mpsc::unbounded_channel();
    let mut event_loop = EventLoop::new(app, client, tx);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Could not enable terminal modes: {}", e);
    }

    let result = drive(&mut terminal, &mut event_loop, rx, &theme).await;

    event_loop.shutdown();
    drop(terminal_mode_guard);
    ratatui::restore();

    if let Err(e) = &result {
        error!("Terminal I/O failed: {}", e);
    }
    info!("Exiting");
    result
}

/// Pump events into the loop until it asks to quit or the terminal fails.
async fn drive(
    terminal: &mut DefaultTerminal,
    event_loop: &mut EventLoop,
    mut completions: mpsc::UnboundedReceiver<LoopEvent>,
    theme: &Theme,
) -> std::io::Result<()> {
    let size = terminal.size()?;
    event_loop.handle(LoopEvent::Resize {
        width: size.width,
        height: size.height,
    });

    let mut input = EventStream::new();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, event_loop.app(), theme))?;
            needs_redraw = false;
        }

        let event = tokio::select! {
            Some(event) = completions.recv() => event,
            maybe_event = input.next() => match maybe_event {
                Some(Ok(raw)) => match event::translate(raw) {
                    Some(tui_event) => LoopEvent::from(tui_event),
                    None => continue,
                },
                Some(Err(e)) => return Err(e),
                None => return Ok(()), // stdin closed
            },
            _ = ticker.tick() => LoopEvent::Tick,
        };

        match event_loop.handle(event) {
            Flow::Redraw => needs_redraw = true,
            Flow::Idle => {}
            Flow::Quit => return Ok(()),
        }
    }
}
