use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the UI that knows how to draw itself into a `Rect`.
///
/// Two flavors live in `components/`: persistent widgets (the editors, the
/// output pane) that keep their state across frames and have props synced
/// before each draw, and borrowed views (the file tree) built fresh each
/// frame around references into the application state.
///
/// `render` takes `&mut self` so a component can update presentation state
/// (scroll offsets, cached layout) during the draw pass. This aligns with
/// Ratatui's `StatefulWidget` pattern.
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
