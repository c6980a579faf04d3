//! # CardDetail Component
//!
//! Full view of one card: heading, review banner, content, numbered
//! "See Also" links, citations and image path.
//!
//! ## Architecture
//!
//! `CardDetail` is a transient component (created each frame) that wraps
//! `&'a mut DetailScrollState` (persistent state) and the `DetailView` (props).
//! Everything below the heading lives in a `ScrollView` so long cards can be
//! read with the scroll keys.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::links::{DetailView, NumberedLink};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const REVIEW_FALLBACK: &str = "This card needs manual review";
pub const NO_CONTENT: &str = "(no content)";

/// Scroll position of the detail body.
/// Must be persisted in the parent TuiState and reset when the card changes.
#[derive(Default)]
pub struct DetailScrollState {
    pub scroll_state: ScrollViewState,
    /// Wrapped height of the body at the last render
    pub content_height: u16,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl DetailScrollState {
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.content_height = 0;
    }

    pub fn offset(&self) -> u16 {
        self.scroll_state.offset().y
    }

    /// Keep the offset inside the content.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }
}

/// Scroll keys return `Some(())` so the caller knows the key was consumed.
impl EventHandler for DetailScrollState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('w') | TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::InputChar('s') | TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::PageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::PageDown => self.scroll_state.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll_state.scroll_to_top(),
            TuiEvent::CursorEnd => {
                let y = self.content_height.saturating_sub(self.viewport_height);
                self.scroll_state.set_offset(Position { x: 0, y });
            }
            _ => return None,
        }
        self.clamp_scroll();
        Some(())
    }
}

fn section_title(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

fn link_line(link: &NumberedLink) -> Line<'_> {
    match link.quick_key {
        Some(key) => Line::from(vec![
            Span::styled(format!("  [{key}] "), Style::default().fg(Color::Cyan)),
            Span::raw(link.label.as_str()),
        ]),
        None if link.is_navigable() => Line::from(format!("      {}", link.label)),
        None => Line::from(Span::styled(
            format!("      {}", link.label),
            Style::default().fg(Color::DarkGray),
        )),
    }
}

/// Body lines below the heading.
pub fn body_lines(view: &DetailView) -> Vec<Line<'_>> {
    let card = &view.card;
    let mut lines = Vec::new();

    if card.review.needs_review {
        let note = card
            .review
            .note
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(REVIEW_FALLBACK);
        lines.push(Line::from(Span::styled(
            format!("⚠ NEEDS REVIEW: {note}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());
    }

    lines.push(section_title("Content:"));
    match card.content.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(content) => lines.extend(content.lines().map(Line::from)),
        None => lines.push(Line::from(Span::styled(
            NO_CONTENT,
            Style::default().fg(Color::DarkGray),
        ))),
    }

    if !view.links.is_empty() {
        lines.push(Line::default());
        lines.push(section_title("See Also:"));
        lines.extend(view.links.iter().map(link_line));
    }

    if let Some(citations) = card.citations.as_deref().filter(|c| !c.trim().is_empty()) {
        lines.push(Line::default());
        lines.push(section_title("Text Citations:"));
        lines.extend(citations.lines().map(Line::from));
    }

    if let Some(image) = card.image_path.as_deref().filter(|p| !p.trim().is_empty()) {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Image: ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(image, Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines
}

pub struct CardDetail<'a> {
    pub view: &'a DetailView,
    pub state: &'a mut DetailScrollState,
}

impl<'a> CardDetail<'a> {
    pub fn new(view: &'a DetailView, state: &'a mut DetailScrollState) -> Self {
        Self { view, state }
    }
}

impl Component for CardDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [heading_area, _, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let card = &self.view.card;
        let heading = Line::from(Span::styled(
            format!("{} - {}", card.number, card.display_title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(heading, heading_area);

        // One column is reserved for the scrollbar
        let content_width = body_area.width.saturating_sub(1);
        let paragraph = Paragraph::new(body_lines(self.view)).wrap(Wrap { trim: false });
        let height = u16::try_from(paragraph.line_count(content_width)).unwrap_or(u16::MAX);

        self.state.content_height = height;
        self.state.viewport_height = body_area.height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, body_area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{card, link, unresolved};
    use crate::tui::test_utils::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(view: &DetailView, state: &mut DetailScrollState, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, height)).unwrap();
        terminal
            .draw(|f| CardDetail::new(view, state).render(f, f.area()))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_render_heading_content_and_links() {
        let view = DetailView::new(card(
            7,
            1924,
            "Tetrahedron",
            vec![link(1, 2, "Sphere"), unresolved(2, "Missing"), link(3, 3, "Vector")],
        ));
        let text = draw(&view, &mut DetailScrollState::default(), 20);

        assert!(text.contains("C01924 - Tetrahedron"));
        assert!(text.contains("Content of Tetrahedron"));
        assert!(text.contains("See Also:"));
        assert!(text.contains("[1] Sphere"));
        assert!(text.contains("[2] Vector"));
        assert!(text.contains("Missing"));
        assert!(!text.contains("[3]"));
    }

    #[test]
    fn test_review_banner_fallback_and_no_content() {
        let mut c = card(1, 1, "Draft", Vec::new());
        c.content = None;
        c.review.needs_review = true;
        let view = DetailView::new(c);
        let text = draw(&view, &mut DetailScrollState::default(), 12);

        assert!(text.contains(REVIEW_FALLBACK));
        assert!(text.contains(NO_CONTENT));
        assert!(!text.contains("See Also:"));
    }

    #[test]
    fn test_citations_and_image() {
        let mut c = card(1, 1, "Pictured", Vec::new());
        c.citations = Some("Synergetics 2, 986.40".to_string());
        c.image_path = Some("images/c00001.png".to_string());
        let view = DetailView::new(c);
        let text = draw(&view, &mut DetailScrollState::default(), 14);

        assert!(text.contains("Text Citations:"));
        assert!(text.contains("986.40"));
        assert!(text.contains("Image: images/c00001.png"));
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut c = card(1, 1, "Long", Vec::new());
        c.content = Some((1..=30).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n"));
        let view = DetailView::new(c);
        let mut state = DetailScrollState::default();
        draw(&view, &mut state, 10);

        for _ in 0..100 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        let max = state.content_height - state.viewport_height;
        assert_eq!(state.offset(), max);

        let text = draw(&view, &mut state, 10);
        assert!(text.contains("line 30"));

        state.reset();
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn test_non_scroll_keys_are_not_consumed() {
        let mut state = DetailScrollState::default();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('b')), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('1')), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('s')), Some(()));
    }
}
