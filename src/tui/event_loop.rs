//! # Event Loop
//!
//! Feeds events into `update()` one at a time and performs the `Effect`s it
//! returns. This is the only place a request task is spawned or aborted.
//!
//! ```text
//!  terminal ─┐
//!  timer ────┼──▶ LoopEvent ──▶ update() ──▶ Effect ──▶ spawn / abort / quit
//!  channel ──┘                                  │
//!     ▲                                         │
//!     └──── LoopEvent::Completion ◀── task ◀────┘
//! ```
//!
//! The loop itself holds at most one `AbortHandle`. A new dispatch aborts
//! whatever is still recorded there before spawning, and completions carry
//! their request id so the reducer can drop anything stale.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::inference::{Completion, CompletionClient, CompletionError, CompletionRequest};
use crate::tui::event::{TuiEvent, action_for};
use crate::tui::ui;

#[derive(Debug)]
pub enum LoopEvent {
    Key(TuiEvent),
    /// Terminal resized to this many columns and rows.
    Resize { width: u16, height: u16 },
    Tick,
    Completion {
        request_id: u64,
        result: Result<Completion, CompletionError>,
    },
}

impl From<TuiEvent> for LoopEvent {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Resize { width, height } => LoopEvent::Resize { width, height },
            other => LoopEvent::Key(other),
        }
    }
}

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Idle,
    Quit,
}

struct InFlight {
    request_id: u64,
    handle: AbortHandle,
}

pub struct EventLoop {
    app: App,
    client: Option<Arc<dyn CompletionClient>>,
    completions: UnboundedSender<LoopEvent>,
    in_flight: Option<InFlight>,
}

impl EventLoop {
    /// `client` is `None` when no usable provider could be built; the app is
    /// then expected to be Misconfigured and never dispatches.
    pub fn new(
        app: App,
        client: Option<Arc<dyn CompletionClient>>,
        completions: UnboundedSender<LoopEvent>,
    ) -> Self {
        Self {
            app,
            client,
            completions,
            in_flight: None,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Id of the request whose task is still running, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.request_id)
    }

    pub fn handle(&mut self, event: LoopEvent) -> Flow {
        let action = match event {
            LoopEvent::Key(key) => match action_for(&key, self.app.phase_kind()) {
                Some(action) => action,
                None => return Flow::Idle,
            },
            LoopEvent::Resize { width, height } => {
                let (width, height) = ui::result_area_size(width, height);
                Action::Resize { width, height }
            }
            LoopEvent::Tick => Action::Tick,
            LoopEvent::Completion { request_id, result } => {
                if self.in_flight() == Some(request_id) {
                    self.in_flight = None;
                }
                Action::CompletionFinished { request_id, result }
            }
        };

        let effect = update(&mut self.app, action);
        self.apply(effect)
    }

    /// Abort the outstanding request, if any. Called on shutdown.
    pub fn shutdown(&mut self) {
        self.abort_in_flight();
    }

    fn apply(&mut self, effect: Effect) -> Flow {
        match effect {
            Effect::None => Flow::Idle,
            Effect::Render => Flow::Redraw,
            Effect::Dispatch {
                request_id,
                request,
            } => {
                self.abort_in_flight();
                self.spawn_request(request_id, request);
                Flow::Redraw
            }
            Effect::Abort { request_id } => {
                if self.in_flight() == Some(request_id) {
                    self.abort_in_flight();
                }
                Flow::Redraw
            }
            Effect::Quit => {
                self.abort_in_flight();
                Flow::Quit
            }
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!("Aborting request {}", in_flight.request_id);
            in_flight.handle.abort();
        }
    }

    fn spawn_request(&mut self, request_id: u64, request: CompletionRequest) {
        let tx = self.completions.clone();

        let Some(client) = self.client.clone() else {
            warn!("No completion client; failing request {}", request_id);
            let result = Err(CompletionError::Authentication(
                "no completion provider configured".to_string(),
            ));
            // Delivered through the channel so it arrives like any other result
            let _ = tx.send(LoopEvent::Completion { request_id, result });
            return;
        };

        info!("Spawning request {} on {}", request_id, client.name());
        let handle = tokio::spawn(async move {
            let result = client.complete(&request).await;
            match &result {
                Ok(completion) => debug!(
                    "Request {} returned {} choice(s)",
                    request_id,
                    completion.choices().len()
                ),
                Err(e) => warn!("Request {} failed: {}", request_id, e),
            }
            if tx.send(LoopEvent::Completion { request_id, result }).is_err() {
                debug!("Event loop gone; dropping result of request {}", request_id);
            }
        });

        self.in_flight = Some(InFlight {
            request_id,
            handle: handle.abort_handle(),
        });
    }
}
