//! # Actions
//!
//! Everything that can happen in Commander becomes an `Action`.
//! User presses Enter? That's `Action::Confirm`.
//! The service answers? That's `Action::CompletionFinished { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! [`Effect`] describing the I/O the caller must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Transitions:
//!
//! ```text
//!              confirm (non-blank)            success
//!   Entering ───────────────────▶ Pending ───────────▶ Presenting
//!      ▲  ▲        failure / cancel │                      │
//!      │  └─────────────────────────┘                      │
//!      └──────────────────── new query ────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::core::state::{App, Phase};
use crate::inference::{Completion, CompletionError, CompletionRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Query editing
    Insert(char),
    Paste(String),
    DeleteBack,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // Flow
    Confirm,
    /// Esc: quit from Entering/Presenting, abort while Pending.
    Cancel,
    /// Ctrl+C: quit from anywhere.
    Quit,
    NewQuery,

    // Result scrolling
    Scroll(i32),
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,

    /// The result area changed size.
    Resize { width: u16, height: u16 },
    /// Animation timer.
    Tick,
    CompletionFinished {
        request_id: u64,
        result: Result<Completion, CompletionError>,
    },
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// State changed; redraw.
    Render,
    /// Start the request on a background task.
    Dispatch {
        request_id: u64,
        request: CompletionRequest,
    },
    /// Stop waiting for the request.
    Abort { request_id: u64 },
    Quit,
}

fn changed(did_change: bool) -> Effect {
    if did_change { Effect::Render } else { Effect::None }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    // Phase-independent actions first
    match action {
        Action::Quit => {
            info!("Quit requested in {:?}", app.phase_kind());
            return Effect::Quit;
        }
        Action::Resize { width, height } => {
            app.viewport_size = (width, height);
            if let Phase::Presenting { viewport, .. } = &mut app.phase {
                viewport.resize(width, height);
            }
            return Effect::Render;
        }
        _ => {}
    }

    match &mut app.phase {
        Phase::Entering { error } => match action {
            Action::Cancel => Effect::Quit,
            Action::Confirm => {
                if app.query.is_blank() {
                    debug!("Ignoring confirm on blank query");
                    return Effect::None;
                }
                let (request_id, request) = app.begin_request();
                info!(
                    "Dispatching request {} ({} chars)",
                    request_id,
                    request.prompt.chars().count()
                );
                app.phase = Phase::Pending { request_id };
                app.spinner_tick = 0;
                app.status_message.clear();
                Effect::Dispatch {
                    request_id,
                    request,
                }
            }
            edit => {
                let did_change = match edit {
                    Action::Insert(c) => app.query.insert(c),
                    Action::Paste(text) => app.query.insert_str(&text),
                    Action::DeleteBack => app.query.delete_back(),
                    Action::DeleteForward => app.query.delete_forward(),
                    Action::CursorLeft => app.query.move_left(),
                    Action::CursorRight => app.query.move_right(),
                    Action::CursorHome => app.query.move_home(),
                    Action::CursorEnd => app.query.move_end(),
                    _ => false,
                };
                // Editing acknowledges the last error
                if did_change && error.is_some() {
                    *error = None;
                }
                changed(did_change)
            }
        },

        Phase::Pending { request_id } => {
            let pending_id = *request_id;
            match action {
                Action::Tick => {
                    app.spinner_tick = app.spinner_tick.wrapping_add(1);
                    Effect::Render
                }
                Action::Cancel => {
                    info!("Request {} cancelled by user", pending_id);
                    app.phase = Phase::Entering { error: None };
                    app.status_message = "Request cancelled".to_string();
                    Effect::Abort {
                        request_id: pending_id,
                    }
                }
                Action::CompletionFinished { request_id, result } => {
                    if request_id != pending_id {
                        warn!(
                            "Dropping stale completion {} (waiting on {})",
                            request_id, pending_id
                        );
                        return Effect::None;
                    }
                    finish_request(app, result);
                    Effect::Render
                }
                _ => Effect::None,
            }
        }

        Phase::Presenting { viewport, .. } => match action {
            Action::Cancel => Effect::Quit,
            Action::NewQuery => {
                app.query.clear();
                app.phase = Phase::Entering { error: None };
                app.status_message.clear();
                Effect::Render
            }
            scroll => {
                let before = viewport.scroll_offset();
                match scroll {
                    Action::Scroll(delta) => viewport.scroll(delta),
                    Action::PageUp => viewport.page_up(),
                    Action::PageDown => viewport.page_down(),
                    Action::ScrollToTop => viewport.scroll_to_top(),
                    Action::ScrollToBottom => viewport.scroll_to_bottom(),
                    _ => {}
                }
                changed(viewport.scroll_offset() != before)
            }
        },

        Phase::Misconfigured { .. } => match action {
            Action::Cancel => Effect::Quit,
            _ => Effect::None,
        },
    }
}

/// Apply the result of the pending request.
fn finish_request(app: &mut App, result: Result<Completion, CompletionError>) {
    match result {
        Ok(completion) => {
            let viewport = app.build_viewport(&completion.joined_text());
            info!(
                "Completion received: {} choice(s), {} wrapped line(s)",
                completion.choices().len(),
                viewport.line_count()
            );
            app.phase = Phase::Presenting {
                completion,
                viewport,
            };
        }
        Err(err) if err.is_service_error() => {
            warn!("Completion failed: {}", err);
            app.phase = Phase::Entering {
                error: Some(err.to_string()),
            };
        }
        Err(err) => {
            warn!("Completion cannot be retried: {}", err);
            let reason = match err {
                CompletionError::Authentication(reason) => reason,
                other => other.to_string(),
            };
            app.phase = Phase::Misconfigured { reason };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::PhaseKind;
    use crate::test_support::{app_with_query, test_app};

    fn dispatch(app: &mut App) -> u64 {
        match update(app, Action::Confirm) {
            Effect::Dispatch { request_id, .. } => request_id,
            other => panic!("expected Dispatch, got {other:?}"),
        }
    }

    fn success(texts: &[&str]) -> Result<Completion, CompletionError> {
        Ok(Completion::from_texts(texts.iter().copied()).unwrap())
    }

    #[test]
    fn test_typing_updates_query() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Insert('l')), Effect::Render);
        assert_eq!(update(&mut app, Action::Insert('s')), Effect::Render);
        assert_eq!(app.query.value(), "ls");
        assert_eq!(update(&mut app, Action::DeleteBack), Effect::Render);
        assert_eq!(app.query.value(), "l");
    }

    #[test]
    fn test_confirm_on_empty_query_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Confirm), Effect::None);
        assert_eq!(app.phase_kind(), PhaseKind::Entering);

        let mut blank = app_with_query("   ");
        assert_eq!(update(&mut blank, Action::Confirm), Effect::None);
        assert_eq!(blank.phase_kind(), PhaseKind::Entering);
    }

    #[test]
    fn test_confirm_dispatches_query_with_tuning() {
        let mut app = app_with_query("go to tmp");
        match update(&mut app, Action::Confirm) {
            Effect::Dispatch { request_id, request } => {
                assert_eq!(request.prompt, "go to tmp");
                assert_eq!(request.max_tokens, app.tuning.max_tokens);
                assert_eq!(app.pending_request(), Some(request_id));
            }
            other => panic!("expected Dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_success_reaches_presenting_with_padded_view() {
        let mut app = app_with_query("go to tmp");
        update(&mut app, Action::Resize { width: 40, height: 5 });
        let id = dispatch(&mut app);
        assert_eq!(app.phase_kind(), PhaseKind::Pending);

        let effect = update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: success(&["cd /tmp"]),
            },
        );
        assert_eq!(effect, Effect::Render);
        match &app.phase {
            Phase::Presenting { viewport, .. } => {
                assert_eq!(viewport.render(), vec!["cd /tmp", "", "", "", ""]);
            }
            other => panic!("expected Presenting, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_choices_are_joined() {
        let mut app = app_with_query("q");
        update(&mut app, Action::Resize { width: 40, height: 3 });
        let id = dispatch(&mut app);
        update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: success(&["first", "second"]),
            },
        );
        let Phase::Presenting { viewport, .. } = &app.phase else {
            panic!("expected Presenting");
        };
        assert_eq!(viewport.render(), vec!["first", "second", ""]);
    }

    #[test]
    fn test_service_error_returns_to_entering_and_keeps_query() {
        let mut app = app_with_query("list files");
        let id = dispatch(&mut app);
        update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: Err(CompletionError::Network("connection refused".into())),
            },
        );
        match &app.phase {
            Phase::Entering { error: Some(msg) } => assert!(msg.contains("connection refused")),
            other => panic!("expected Entering with error, got {other:?}"),
        }
        assert_eq!(app.query.value(), "list files");
    }

    #[test]
    fn test_editing_clears_error() {
        let mut app = app_with_query("x");
        app.phase = Phase::Entering {
            error: Some("boom".into()),
        };
        update(&mut app, Action::Insert('y'));
        assert_eq!(app.phase, Phase::Entering { error: None });
    }

    #[test]
    fn test_authentication_failure_is_misconfigured() {
        let mut app = app_with_query("q");
        let id = dispatch(&mut app);
        update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: Err(CompletionError::Authentication("no key".into())),
            },
        );
        assert!(matches!(&app.phase, Phase::Misconfigured { reason } if reason == "no key"));
        assert_eq!(update(&mut app, Action::Confirm), Effect::None);
        assert_eq!(update(&mut app, Action::Cancel), Effect::Quit);
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut app = app_with_query("q");
        let id = dispatch(&mut app);
        let effect = update(
            &mut app,
            Action::CompletionFinished {
                request_id: id + 7,
                result: success(&["nope"]),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.pending_request(), Some(id));
    }

    #[test]
    fn test_cancel_while_pending_aborts() {
        let mut app = app_with_query("q");
        let id = dispatch(&mut app);
        assert_eq!(
            update(&mut app, Action::Cancel),
            Effect::Abort { request_id: id }
        );
        assert_eq!(app.phase, Phase::Entering { error: None });
        assert_eq!(app.query.value(), "q");

        // A late result for the aborted request goes nowhere
        let effect = update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: success(&["late"]),
            },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.phase_kind(), PhaseKind::Entering);
    }

    #[test]
    fn test_pending_ignores_input_but_ticks() {
        let mut app = app_with_query("q");
        dispatch(&mut app);
        assert_eq!(update(&mut app, Action::Insert('z')), Effect::None);
        assert_eq!(update(&mut app, Action::Confirm), Effect::None);
        assert_eq!(app.query.value(), "q");

        assert_eq!(update(&mut app, Action::Tick), Effect::Render);
        assert_eq!(update(&mut app, Action::Tick), Effect::Render);
        assert_eq!(app.spinner_tick, 2);
    }

    #[test]
    fn test_tick_outside_pending_does_nothing() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Tick), Effect::None);
    }

    #[test]
    fn test_new_query_from_presenting() {
        let mut app = app_with_query("q");
        let id = dispatch(&mut app);
        update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: success(&["answer"]),
            },
        );
        assert_eq!(update(&mut app, Action::NewQuery), Effect::Render);
        assert_eq!(app.phase, Phase::Entering { error: None });
        assert!(app.query.is_empty());
    }

    #[test]
    fn test_cancel_terminates_from_entering_and_presenting() {
        let mut entering = test_app();
        assert_eq!(update(&mut entering, Action::Cancel), Effect::Quit);

        let mut presenting = app_with_query("q");
        let id = dispatch(&mut presenting);
        update(
            &mut presenting,
            Action::CompletionFinished {
                request_id: id,
                result: success(&["answer"]),
            },
        );
        assert_eq!(update(&mut presenting, Action::Cancel), Effect::Quit);
    }

    #[test]
    fn test_scrolling_in_presenting() {
        let mut app = app_with_query("q");
        update(&mut app, Action::Resize { width: 40, height: 2 });
        let id = dispatch(&mut app);
        update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: success(&["a\nb\nc\nd"]),
            },
        );
        assert_eq!(update(&mut app, Action::Scroll(1)), Effect::Render);
        assert_eq!(update(&mut app, Action::ScrollToBottom), Effect::Render);
        assert_eq!(update(&mut app, Action::Scroll(5)), Effect::None);
        let Phase::Presenting { viewport, .. } = &app.phase else {
            panic!("expected Presenting");
        };
        assert_eq!(viewport.render(), vec!["c", "d"]);
    }

    #[test]
    fn test_resize_updates_presenting_viewport() {
        let mut app = app_with_query("q");
        update(&mut app, Action::Resize { width: 40, height: 2 });
        let id = dispatch(&mut app);
        update(
            &mut app,
            Action::CompletionFinished {
                request_id: id,
                result: success(&["one two three"]),
            },
        );
        update(&mut app, Action::Resize { width: 5, height: 4 });
        let Phase::Presenting { viewport, .. } = &app.phase else {
            panic!("expected Presenting");
        };
        assert_eq!(viewport.render(), vec!["one", "two", "three", ""]);
        assert_eq!(app.viewport_size, (5, 4));
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut app = app_with_query("q");
        dispatch(&mut app);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
