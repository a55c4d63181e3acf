use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields, usually borrowed
/// from `App` and the active `Theme`) and render into a `Frame` within a
/// given `Rect`. They never mutate application state.
pub trait Component {
    /// Render the component into the given area.
    ///
    /// Takes `&mut self` so a component may cache layout work between the
    /// measurement and drawing steps of a single pass.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
