//! # Application State
//!
//! Everything the renderer needs, in one struct. No terminal types here;
//! presentation-only state (scroll offsets, prompt buffers) lives in `tui`.
//!
//! ```text
//! App
//! ├── mode: Mode                     // List | Detail | Search | Jump
//! ├── page_size: usize               // fixed for the session
//! ├── offset: usize                  // multiple of page_size
//! ├── total_count: usize             // cards matching search_query
//! ├── search_query: Option<String>   // active substring filter
//! ├── cards: Vec<CardSummary>        // current page
//! ├── selected_index: usize          // row cursor into cards
//! ├── current_card: Option<DetailView>  // Some iff mode == Detail
//! └── status_message: String         // transient notice
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::card::CardSummary;
use crate::core::links::DetailView;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Detail,
    Search,
    Jump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub mode: Mode,
    pub page_size: usize,
    pub offset: usize,
    pub total_count: usize,
    pub search_query: Option<String>,
    pub cards: Vec<CardSummary>,
    pub selected_index: usize,
    pub current_card: Option<DetailView>,
    pub status_message: String,
}

impl App {
    /// A zero `page_size` is bumped to 1 so the paging arithmetic stays defined.
    pub fn new(page_size: usize) -> Self {
        Self {
            mode: Mode::List,
            page_size: page_size.max(1),
            offset: 0,
            total_count: 0,
            search_query: None,
            cards: Vec::new(),
            selected_index: 0,
            current_card: None,
            status_message: String::new(),
        }
    }

    pub fn selected_card(&self) -> Option<&CardSummary> {
        self.cards.get(self.selected_index)
    }

    /// 1-based page number of the current offset.
    pub fn current_page(&self) -> usize {
        self.offset / self.page_size + 1
    }

    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size)
    }

    /// 1-based inclusive range of the rows on screen, e.g. `(41, 45)`.
    /// `None` when there is nothing to show.
    pub fn page_range(&self) -> Option<(usize, usize)> {
        if self.total_count == 0 || self.cards.is_empty() {
            return None;
        }
        let first = self.offset + 1;
        let last = (self.offset + self.cards.len()).min(self.total_count);
        Some((first, last))
    }

    pub fn has_next_page(&self) -> bool {
        self.offset + self.page_size < self.total_count
    }

    /// Offset of the last page that holds at least one card.
    pub fn last_page_offset(&self) -> usize {
        clamp_offset(usize::MAX, self.total_count, self.page_size)
    }
}

/// Clamp `offset` onto a page boundary inside `[0, total)`, or 0 when empty.
pub fn clamp_offset(offset: usize, total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    if total == 0 {
        return 0;
    }
    let last = (total - 1) / page_size * page_size;
    (offset / page_size * page_size).min(last)
}
