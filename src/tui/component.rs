use ratatui::layout::Rect;
use ratatui::Frame;

/// A piece of the screen.
///
/// Components receive their data as struct fields ("props") and render into
/// the `Rect` they are given. `render` takes `&mut self` so stateful pieces
/// (list selection, scroll offsets) can update while drawing, in the same way
/// as Ratatui's `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
