//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event (including terminal resize). All pending
//! events are drained before the next draw.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic.

mod component;
mod components;
mod event;
mod keymap;
#[cfg(test)]
mod test_utils;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use log::{debug, info};

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::widgets::ListState;

use crate::core::action::Action;
use crate::core::card::CardId;
use crate::core::runtime::{Browser, Flow};
use crate::core::state::{App, Mode};
use crate::store::CardStore;
use crate::tui::component::EventHandler;
use crate::tui::components::{DetailScrollState, Prompt, PromptEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    // Persistent component states
    pub list_state: ListState,
    pub detail_scroll: DetailScrollState,
    pub prompt: Prompt,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset presentation state that belongs to the screen just left.
    fn sync(&mut self, app: &App, prev_mode: Mode, prev_card: Option<CardId>) {
        let entered_prompt = matches!(app.mode, Mode::Search | Mode::Jump) && app.mode != prev_mode;
        if entered_prompt {
            self.prompt.clear();
        }
        if current_card_id(app) != prev_card {
            self.detail_scroll.reset();
        }
    }
}

fn current_card_id(app: &App) -> Option<CardId> {
    app.current_card.as_ref().map(|view| view.card.id)
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Enable Kitty keyboard protocol unconditionally; terminals without it
        // ignore the sequence
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Runs the interactive browser until the user quits. The browser must
/// already be started.
pub fn run<S: CardStore>(mut browser: Browser<S>) -> io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, &mut browser, &mut tui);

    drop(terminal_mode_guard);
    ratatui::restore();
    browser.shutdown();
    info!("Terminal restored");
    result
}

fn event_loop<S: CardStore>(
    terminal: &mut DefaultTerminal,
    browser: &mut Browser<S>,
    tui: &mut TuiState,
) -> io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &browser.app, tui))?;
            needs_redraw = false;
        }

        let Some(first_event) = poll_event_timeout(IDLE_POLL)? else {
            continue;
        };
        needs_redraw = true;

        // Process first event + drain ALL pending events before next draw
        let mut pending = Some(first_event);
        while let Some(event) = pending {
            if dispatch_event(browser, tui, &event) == Flow::Quit {
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }
    }
}

/// Route one terminal event to the component or key map for the current mode
/// and run the resulting action.
fn dispatch_event<S: CardStore>(
    browser: &mut Browser<S>,
    tui: &mut TuiState,
    event: &TuiEvent,
) -> Flow {
    let app = &browser.app;
    let action = match event {
        // Resize just needs a redraw
        TuiEvent::Resize => None,
        TuiEvent::ForceQuit => Some(Action::Quit),
        _ => match app.mode {
            Mode::Search | Mode::Jump => {
                let jumping = app.mode == Mode::Jump;
                tui.prompt.handle_event(event).map(|prompt_event| match prompt_event {
                    PromptEvent::Submit(text) if jumping => Action::SubmitJump(text),
                    PromptEvent::Submit(text) => Action::SubmitSearch(text),
                    PromptEvent::Cancel => Action::Cancel,
                })
            }
            Mode::Detail => match tui.detail_scroll.handle_event(event) {
                Some(()) => None,
                None => keymap::detail_action(event),
            },
            Mode::List => keymap::list_action(event, app.search_query.is_some()),
        },
    };

    let Some(action) = action else {
        return Flow::Continue;
    };
    debug!("Dispatching {:?}", action);

    let prev_mode = browser.app.mode;
    let prev_card = current_card_id(&browser.app);
    let flow = browser.handle(action);
    tui.sync(&browser.app, prev_mode, prev_card);
    flow
}
