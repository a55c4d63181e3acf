//! # TUI Components
//!
//! Stateless, props-based widgets. Each one borrows what it draws from
//! `App` and the active `Theme`, and renders through the [`Component`] trait.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (app name, model, status)
//! ├── query_input.rs  (single-line query editor)
//! ├── spinner.rs      (loading indicator)
//! ├── result_view.rs  (scrollable result box)
//! └── help_bar.rs     (key hints per phase)
//! ```
//!
//! [`Component`]: crate::tui::component::Component

pub mod help_bar;
pub mod query_input;
pub mod result_view;
pub mod spinner;
pub mod title_bar;

pub use help_bar::HelpBar;
pub use query_input::QueryInput;
pub use result_view::ResultView;
pub use spinner::Spinner;
pub use title_bar::TitleBar;
