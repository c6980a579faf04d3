//! # Runtime
//!
//! Owns the card store and runs the effects that `update()` asks for.
//! Each input is processed to completion, including any chain of store
//! queries, before the next one is accepted.
//!
//! ```text
//! Browser::handle(action)
//!   loop:
//!     effect = update(&mut app, action)
//!     Effect::None  → done
//!     Effect::Quit  → close store, Flow::Quit
//!     otherwise     → action = run(effect)   // store call
//! ```

use log::{info, warn};

use crate::core::action::{Action, Effect, Via, update};
use crate::core::state::App;
use crate::store::{CardStore, StoreError};

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Browser<S: CardStore> {
    pub app: App,
    store: S,
}

impl<S: CardStore> Browser<S> {
    pub fn new(store: S, page_size: usize) -> Self {
        Self {
            app: App::new(page_size),
            store,
        }
    }

    /// Loads the initial count and first page. Any store failure here is
    /// returned to the caller instead of becoming a status message.
    pub fn start(&mut self) -> Result<(), StoreError> {
        let mut effect = update(&mut self.app, Action::Start);
        while let Some(action) = self.run(effect)? {
            effect = update(&mut self.app, action);
        }
        info!(
            "Browser started: {} cards, page size {}",
            self.app.total_count, self.app.page_size
        );
        Ok(())
    }

    pub fn handle(&mut self, action: Action) -> Flow {
        let mut effect = update(&mut self.app, action);
        loop {
            if effect == Effect::Quit {
                info!("Quit requested, releasing card store");
                self.store.close();
                return Flow::Quit;
            }
            let next = match self.run(effect) {
                Ok(Some(action)) => action,
                Ok(None) => return Flow::Continue,
                Err(e) => {
                    warn!("Store operation failed: {}", e);
                    Action::StoreFailed(e.to_string())
                }
            };
            effect = update(&mut self.app, next);
        }
    }

    /// Consumes the browser, releasing the store.
    pub fn shutdown(mut self) {
        self.store.close();
    }

    /// Runs one store effect and returns the action carrying its result.
    fn run(&mut self, effect: Effect) -> Result<Option<Action>, StoreError> {
        let action = match effect {
            Effect::None | Effect::Quit => return Ok(None),
            Effect::Count { query, reload } => Action::CountLoaded {
                total: self.store.count(query.as_deref())?,
                query,
                reload,
            },
            Effect::LoadPage(request) => Action::PageLoaded {
                cards: self.store.list(
                    self.app.page_size,
                    request.offset,
                    request.query.as_deref(),
                )?,
                request,
            },
            Effect::FetchCard { id, via } => match self.store.get_by_id(id)? {
                Some(card) => Action::CardLoaded { card, via },
                None => Action::CardNotFound {
                    via,
                    input: id.to_string(),
                },
            },
            Effect::ResolveJump { number, input } => {
                let card = match self.store.get_by_display_number(number)? {
                    Some(summary) => self.store.get_by_id(summary.id)?,
                    None => None,
                };
                match card {
                    Some(card) => Action::CardLoaded {
                        card,
                        via: Via::Jump,
                    },
                    None => Action::CardNotFound {
                        via: Via::Jump,
                        input,
                    },
                }
            }
        };
        Ok(Some(action))
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}
