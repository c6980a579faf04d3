//! # Prompt Component
//!
//! Single-line text input used by the Search and Jump modes.
//!
//! ## Responsibilities
//!
//! - Capture text input and pastes (newlines are dropped)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter, even when empty (the core treats that as cancel)
//! - Emit `Cancel` on Esc
//!
//! The buffer and cursor are internal state; title and label are props set
//! by the parent before each render.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the Prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Submit(String),
    Cancel,
}

pub struct Prompt {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Block title (Prop)
    pub title: &'static str,
    /// Text shown before the input (Prop)
    pub label: &'static str,
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Prompt {
    pub fn new(title: &'static str, label: &'static str) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title,
            label,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert_str(&mut self, text: &str) -> bool {
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if text.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
        true
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }
}

impl Component for Prompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);

        // Scroll horizontally so the cursor stays inside the box
        let before_cursor = self.label.width() + self.buffer[..self.cursor].width();
        let visible = usize::from(inner.width.saturating_sub(1));
        let hscroll = before_cursor.saturating_sub(visible);
        let hscroll_u16 = u16::try_from(hscroll).unwrap_or(u16::MAX);

        let line = Line::from(vec![
            Span::raw(self.label),
            Span::styled(self.buffer.as_str(), Style::default().fg(Color::Green)),
        ]);
        let paragraph = Paragraph::new(line).block(block).scroll((0, hscroll_u16));
        frame.render_widget(paragraph, area);

        if inner.width > 0 && inner.height > 0 {
            let offset = u16::try_from(before_cursor - hscroll).unwrap_or(0);
            frame.set_cursor_position(Position::new(inner.x + offset, inner.y));
        }
    }
}

impl EventHandler for Prompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                None
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                None
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                }
                None
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_boundary();
                    self.buffer.drain(self.cursor..next);
                }
                None
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(PromptEvent::Submit(text))
            }
            TuiEvent::Escape => {
                self.clear();
                Some(PromptEvent::Cancel)
            }
            _ => None,
        }
    }
}
