//! # CardList Component
//!
//! One page of card summaries with a pagination header.
//!
//! Selection lives in `App::selected_index`; the ratatui `ListState` held by
//! the parent only tracks the viewport, and is synced from the app on every
//! render.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{HighlightSpacing, List, ListItem, ListState, Paragraph};

use crate::core::card::CardSummary;
use crate::core::state::App;
use crate::tui::component::Component;

pub const SELECTED_MARKER: &str = "> ";
pub const REVIEW_INDICATOR: &str = " ⚠";

/// `"Page 2 of 3 (21-40 of 45)"`, or a no-match notice for an empty result.
pub fn page_header(app: &App) -> String {
    match app.page_range() {
        Some((first, last)) => format!(
            "Page {} of {} ({}-{} of {})",
            app.current_page(),
            app.total_pages(),
            first,
            last,
            app.total_count
        ),
        None => match &app.search_query {
            Some(query) => format!("No cards match \"{query}\""),
            None => "No cards found".to_string(),
        },
    }
}

/// `"C01924 - Title (Label)"` plus the review indicator when flagged.
pub fn row_text(card: &CardSummary) -> String {
    let mut text = format!("{} - {}", card.number, card.display_title());
    if card.review.needs_review {
        text.push_str(REVIEW_INDICATOR);
    }
    text
}

pub struct CardList<'a> {
    pub app: &'a App,
    pub state: &'a mut ListState,
}

impl<'a> CardList<'a> {
    pub fn new(app: &'a App, state: &'a mut ListState) -> Self {
        Self { app, state }
    }
}

impl Component for CardList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let mut header = vec![Span::raw(page_header(self.app))];
        if let Some(query) = &self.app.search_query
            && self.app.page_range().is_some()
        {
            header.push(Span::styled(
                format!("  search: {query}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(header)), header_area);

        if self.app.cards.is_empty() {
            self.state.select(None);
            return;
        }

        let items: Vec<ListItem> = self
            .app
            .cards
            .iter()
            .map(|card| ListItem::new(row_text(card)))
            .collect();
        let list = List::new(items)
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .highlight_symbol(SELECTED_MARKER)
            .highlight_spacing(HighlightSpacing::Always);

        self.state.select(Some(self.app.selected_index));
        frame.render_stateful_widget(list, list_area, self.state);
    }
}
