//! # Actions
//!
//! Everything that can happen in the browser becomes an `Action`.
//! User presses Enter on a row? That's `Action::Select`.
//! The store returns a page? That's `Action::PageLoaded { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state, and
//! returns an [`Effect`] naming the store work still to be done. It performs
//! no I/O itself; `core::runtime` runs the effect and feeds the result back in
//! as another action.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                              │
//!            Action (store result)  ◄── runtime ┘
//! ```

use log::debug;

use crate::core::card::{Card, CardId, CardSummary, DisplayNumber};
use crate::core::links::DetailView;
use crate::core::state::{App, Mode, clamp_offset};

/// Why the card count is being recomputed. Decides the follow-up page and
/// the status message once the count arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    Startup,
    Refresh,
    Search,
    ClearSearch,
}

/// A page load plus the listing state it commits once the page arrives.
/// Nothing in `App` changes until `PageLoaded`, so a failed load leaves the
/// previous page, query and total intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: Option<String>,
    pub offset: usize,
    pub total: usize,
    pub status: String,
}

/// How a card fetch was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    Select,
    Jump,
    Link,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // User intents
    Start,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    Select,
    OpenSearch,
    OpenJump,
    ClearSearch,
    Refresh,
    Back,
    FollowLink(u8),
    SubmitSearch(String),
    SubmitJump(String),
    Cancel,
    Quit,

    // Store results
    CountLoaded {
        total: usize,
        query: Option<String>,
        reload: Reload,
    },
    PageLoaded {
        cards: Vec<CardSummary>,
        request: PageRequest,
    },
    CardLoaded {
        card: Card,
        via: Via,
    },
    CardNotFound {
        via: Via,
        input: String,
    },
    StoreFailed(String),
}

/// Store work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Count {
        query: Option<String>,
        reload: Reload,
    },
    LoadPage(PageRequest),
    FetchCard {
        id: CardId,
        via: Via,
    },
    ResolveJump {
        number: DisplayNumber,
        input: String,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: mode={:?} action={:?}", app.mode, action);

    match action {
        Action::Quit => Effect::Quit,
        Action::StoreFailed(message) => {
            if app.mode == Mode::Jump {
                app.mode = Mode::List;
            }
            app.status_message = format!("Database error: {message}");
            Effect::None
        }
        Action::Start => Effect::Count {
            query: None,
            reload: Reload::Startup,
        },
        Action::CountLoaded {
            total,
            query,
            reload,
        } => count_loaded(app, total, query, reload),
        Action::PageLoaded { cards, request } => {
            app.cards = cards;
            app.offset = request.offset;
            app.total_count = request.total;
            app.search_query = request.query;
            app.status_message = request.status;
            app.selected_index = 0;
            Effect::None
        }
        Action::CardLoaded { card, via } => {
            app.status_message = match via {
                Via::Select => String::new(),
                Via::Jump => format!("Jumped to card {}", card.number),
                Via::Link => format!("Navigated to {} - {}", card.number, card.title),
            };
            app.current_card = Some(DetailView::new(card));
            app.mode = Mode::Detail;
            Effect::None
        }
        Action::CardNotFound { via, input } => {
            app.status_message = format!("Card not found: {input}");
            if via == Via::Jump {
                app.mode = Mode::List;
            }
            Effect::None
        }
        action => match app.mode {
            Mode::List => update_list(app, action),
            Mode::Detail => update_detail(app, action),
            Mode::Search => update_search(app, action),
            Mode::Jump => update_jump(app, action),
        },
    }
}

fn count_loaded(app: &App, total: usize, query: Option<String>, reload: Reload) -> Effect {
    let offset = match reload {
        Reload::Refresh => clamp_offset(app.offset, total, app.page_size),
        Reload::Startup | Reload::Search | Reload::ClearSearch => 0,
    };
    let status = match reload {
        Reload::Startup => format!("Synergetics Dictionary - {total} cards loaded"),
        Reload::Refresh => format!("Refreshed - {total} cards loaded"),
        Reload::Search => format!("Search results for: {}", query.as_deref().unwrap_or_default()),
        Reload::ClearSearch => "Returned to full card list".to_string(),
    };
    Effect::LoadPage(PageRequest {
        query,
        offset,
        total,
        status,
    })
}

/// Another page of the current listing.
fn turn_page(app: &App, offset: usize) -> Effect {
    Effect::LoadPage(PageRequest {
        query: app.search_query.clone(),
        offset,
        total: app.total_count,
        status: format!("Page {}", offset / app.page_size + 1),
    })
}

fn update_list(app: &mut App, action: Action) -> Effect {
    match action {
        Action::MoveUp => {
            app.selected_index = app.selected_index.saturating_sub(1);
            Effect::None
        }
        Action::MoveDown => {
            let last = app.cards.len().saturating_sub(1);
            app.selected_index = (app.selected_index + 1).min(last);
            Effect::None
        }
        Action::NextPage => {
            if !app.has_next_page() {
                return Effect::None;
            }
            turn_page(app, app.offset + app.page_size)
        }
        Action::PrevPage => turn_page(app, app.offset.saturating_sub(app.page_size)),
        Action::Select => match app.selected_card() {
            Some(card) => Effect::FetchCard {
                id: card.id,
                via: Via::Select,
            },
            None => Effect::None,
        },
        Action::OpenSearch => {
            app.mode = Mode::Search;
            Effect::None
        }
        Action::OpenJump => {
            app.mode = Mode::Jump;
            Effect::None
        }
        Action::ClearSearch => {
            if app.search_query.is_none() {
                return Effect::None;
            }
            Effect::Count {
                query: None,
                reload: Reload::ClearSearch,
            }
        }
        Action::Refresh => Effect::Count {
            query: app.search_query.clone(),
            reload: Reload::Refresh,
        },
        _ => Effect::None,
    }
}

fn update_detail(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Back => {
            app.current_card = None;
            app.mode = Mode::List;
            Effect::None
        }
        Action::FollowLink(n) => {
            let target = app.current_card.as_ref().and_then(|view| view.quick_select(n));
            match target {
                Some(id) => Effect::FetchCard { id, via: Via::Link },
                None => Effect::None,
            }
        }
        _ => Effect::None,
    }
}

fn cancel_input(app: &mut App) -> Effect {
    app.mode = Mode::List;
    app.status_message = "Returned to card list".to_string();
    Effect::None
}

fn update_search(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitSearch(query) => {
            let query = query.trim();
            if query.is_empty() {
                return cancel_input(app);
            }
            app.mode = Mode::List;
            Effect::Count {
                query: Some(query.to_string()),
                reload: Reload::Search,
            }
        }
        Action::Cancel => cancel_input(app),
        _ => Effect::None,
    }
}

fn update_jump(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SubmitJump(input) => {
            let input = input.trim();
            if input.is_empty() {
                return cancel_input(app);
            }
            match input.parse::<DisplayNumber>() {
                Ok(number) => Effect::ResolveJump {
                    number,
                    input: input.to_string(),
                },
                Err(e) => {
                    debug!("jump input rejected: {}", e);
                    app.mode = Mode::List;
                    app.status_message = format!("Card not found: {input}");
                    Effect::None
                }
            }
        }
        Action::Cancel => cancel_input(app),
        _ => Effect::None,
    }
}
