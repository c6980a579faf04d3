//! # HelpBar Component
//!
//! Bordered footer listing the keys that work in the current mode.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::state::Mode;
use crate::tui::component::Component;

const LIST_HELP: &str = "w/s/↑/↓: Navigate | Enter: View | g: Go | /: Search | a/d/←/→: Prev/Next Page | r: Refresh | q: Quit";
const LIST_SEARCH_HELP: &str = "Esc: Clear search | w/s/↑/↓: Navigate | Enter: View | g: Go | /: New search | a/d/←/→: Prev/Next Page | r: Refresh | q: Quit";
const DETAIL_HELP: &str = "b/←/Esc: Back | 1-9: Follow link | w/s/↑/↓: Scroll | q: Quit";
const SEARCH_HELP: &str = "Enter: Search | Esc: Cancel";
const JUMP_HELP: &str = "Enter: Go to card (e.g. 1924 or C01924) | Esc: Cancel";

pub fn help_text(mode: Mode, searching: bool) -> &'static str {
    match mode {
        Mode::List if searching => LIST_SEARCH_HELP,
        Mode::List => LIST_HELP,
        Mode::Detail => DETAIL_HELP,
        Mode::Search => SEARCH_HELP,
        Mode::Jump => JUMP_HELP,
    }
}

pub struct HelpBar {
    pub mode: Mode,
    pub searching: bool,
}

impl Component for HelpBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(help_text(self.mode, self.searching))
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(Style::default().fg(Color::Gray)));
        frame.render_widget(paragraph, area);
    }
}
