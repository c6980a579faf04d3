//! # Key Bindings
//!
//! Translates `TuiEvent`s into core `Action`s for the List and Detail modes.
//! Search and Jump route keys to the prompt instead.
//!
//! | Mode   | Keys |
//! |--------|------|
//! | List   | `w`/`↑` `s`/`↓` move, `a`/`←` `d`/`→` page, `Enter` view, `/` search, `g` jump, `r` refresh, `Esc` clear search, `q` quit |
//! | Detail | `b`/`←`/`Esc` back, `1`-`9` follow link, `q` quit |

use crate::core::action::Action;
use crate::tui::event::TuiEvent;

pub fn list_action(event: &TuiEvent, searching: bool) -> Option<Action> {
    match event {
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('r') => Some(Action::Refresh),
        TuiEvent::Escape if searching => Some(Action::ClearSearch),
        TuiEvent::InputChar('g') => Some(Action::OpenJump),
        TuiEvent::InputChar('/') => Some(Action::OpenSearch),
        TuiEvent::InputChar('s') | TuiEvent::CursorDown => Some(Action::MoveDown),
        TuiEvent::InputChar('w') | TuiEvent::CursorUp => Some(Action::MoveUp),
        TuiEvent::InputChar('d') | TuiEvent::CursorRight | TuiEvent::PageDown => {
            Some(Action::NextPage)
        }
        TuiEvent::InputChar('a') | TuiEvent::CursorLeft | TuiEvent::PageUp => {
            Some(Action::PrevPage)
        }
        TuiEvent::Submit => Some(Action::Select),
        _ => None,
    }
}

pub fn detail_action(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('b') | TuiEvent::CursorLeft | TuiEvent::Escape => Some(Action::Back),
        TuiEvent::InputChar(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(Action::FollowLink),
        _ => None,
    }
}
