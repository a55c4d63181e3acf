//! # Core Application Logic
//!
//! This module contains Commander's interaction logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (phase + data) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • QueryField, Viewport │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and its `Phase`
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`query`]: The text field being typed into
//! - [`viewport`]: Wrapping and scrolling for long results
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod query;
pub mod state;
pub mod viewport;
