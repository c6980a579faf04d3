//! # TUI Components
//!
//! UI pieces for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: application name and status message
//! - `HelpBar`: key hints for the current mode
//!
//! ### Stateful Components
//!
//! Transient wrappers created each frame around persistent state owned by
//! `TuiState`:
//! - `CardList`: one page of cards, wrapping a ratatui `ListState`
//! - `CardDetail`: scrollable card body, wrapping `DetailScrollState`
//!
//! `Prompt` owns its own buffer and emits `PromptEvent`s for the Search and
//! Jump modes.
//!
//! Components receive data as props (struct fields), never by reaching into
//! global state, so each one can be rendered alone against a `TestBackend`.

pub mod card_detail;
pub mod card_list;
pub mod help_bar;
pub mod prompt;
pub mod title_bar;

pub use card_detail::{CardDetail, DetailScrollState};
pub use card_list::CardList;
pub use help_bar::HelpBar;
pub use prompt::{Prompt, PromptEvent};
pub use title_bar::TitleBar;
