//! # Application State
//!
//! Core interaction state for Commander. Domain logic only, no TUI types.
//!
//! ```text
//! App
//! ├── phase: Phase                  // exactly one UI phase at a time
//! │   ├── Entering { error }        // typing a query (initial)
//! │   ├── Pending { request_id }    // request in flight, spinner running
//! │   ├── Presenting { completion, viewport }
//! │   └── Misconfigured { reason }  // no credential, can only quit
//! ├── query: QueryField             // survives failed requests
//! ├── tuning: Tuning                // sampling params for every request
//! ├── viewport_size: (u16, u16)     // result area, set on resize
//! ├── spinner_tick: usize           // advanced by timer while Pending
//! └── next_request_id: u64
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::query::{DEFAULT_MAX_QUERY_LEN, QueryField};
use crate::core::viewport::ResultViewport;
use crate::inference::{Completion, CompletionRequest, Tuning};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Entering { error: Option<String> },
    Pending { request_id: u64 },
    Presenting {
        completion: Completion,
        viewport: ResultViewport,
    },
    Misconfigured { reason: String },
}

/// Payload-free view of [`Phase`], used for key mapping and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Entering,
    Pending,
    Presenting,
    Misconfigured,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Entering { .. } => PhaseKind::Entering,
            Phase::Pending { .. } => PhaseKind::Pending,
            Phase::Presenting { .. } => PhaseKind::Presenting,
            Phase::Misconfigured { .. } => PhaseKind::Misconfigured,
        }
    }
}

pub struct App {
    pub phase: Phase,
    pub query: QueryField,
    pub tuning: Tuning,
    pub model_name: String,
    pub status_message: String,
    /// Width and height available to the result viewport.
    pub viewport_size: (u16, u16),
    pub spinner_tick: usize,
    next_request_id: u64,
}

impl App {
    pub fn new(model_name: String, tuning: Tuning, max_query_len: usize) -> Self {
        Self {
            phase: Phase::Entering { error: None },
            query: QueryField::new(max_query_len),
            tuning,
            model_name,
            status_message: String::new(),
            viewport_size: (0, 0),
            spinner_tick: 0,
            next_request_id: 1,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.model_name.clone(), config.tuning, config.max_query_len)
    }

    /// An app that can only explain the configuration problem and quit.
    pub fn misconfigured(mut self, reason: String) -> Self {
        self.phase = Phase::Misconfigured { reason };
        self
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// The id of the outstanding request, if any.
    pub fn pending_request(&self) -> Option<u64> {
        match self.phase {
            Phase::Pending { request_id } => Some(request_id),
            _ => None,
        }
    }

    /// Build the request for the current query and reserve an id for it.
    pub(crate) fn begin_request(&mut self) -> (u64, CompletionRequest) {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        (
            request_id,
            CompletionRequest::new(self.query.value(), self.tuning),
        )
    }

    pub(crate) fn build_viewport(&self, text: &str) -> ResultViewport {
        let (width, height) = self.viewport_size;
        ResultViewport::new(text, width, height)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(String::new(), Tuning::default(), DEFAULT_MAX_QUERY_LEN)
    }
}
