//! # TitleBar Component
//!
//! Top line of the screen: application name and the transient status message
//! from `App::status_message`. Purely presentational.
//!
//! 1. **Status message**: `"Synergetics Dictionary | Page 2"`
//! 2. **Default**: `"Synergetics Dictionary"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub const APP_TITLE: &str = "Synergetics Dictionary";

pub struct TitleBar<'a> {
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(status_message: &'a str) -> Self {
        Self { status_message }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            APP_TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message,
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_utils::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_title_bar_with_status_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| TitleBar::new("Page 2").render(f, f.area()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Synergetics Dictionary"));
        assert!(text.contains("| Page 2"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| TitleBar::new("").render(f, f.area()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Synergetics Dictionary"));
        assert!(!text.contains('|'));
    }
}
