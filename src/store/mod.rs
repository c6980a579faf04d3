//! # Card Store
//!
//! Read-only access to the card dataset. The navigation core only talks to
//! the [`CardStore`] trait; [`SqliteCardStore`] is the production backend.
//!
//! Methods take `&mut self` because backends may open their connection on
//! first use.

mod sqlite;

use std::path::PathBuf;

use crate::core::card::{Card, CardId, CardSummary, DisplayNumber, Link};

pub use sqlite::SqliteCardStore;

/// Errors that can occur while talking to the card database.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be opened. Fatal at startup.
    #[error("card database unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    /// A query failed against an open database.
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

pub trait CardStore {
    /// Number of cards, restricted to those matching `query` when given.
    fn count(&mut self, query: Option<&str>) -> Result<usize, StoreError>;

    /// Up to `limit` summaries ordered by display number, starting at `offset`.
    /// `query` filters by substring on title or content.
    fn list(
        &mut self,
        limit: usize,
        offset: usize,
        query: Option<&str>,
    ) -> Result<Vec<CardSummary>, StoreError>;

    /// Full record including its ordered links.
    fn get_by_id(&mut self, id: CardId) -> Result<Option<Card>, StoreError>;

    fn get_by_display_number(
        &mut self,
        number: DisplayNumber,
    ) -> Result<Option<CardSummary>, StoreError>;

    /// Outbound links of `card`, ordered by sort position.
    fn links(&mut self, card: CardId) -> Result<Vec<Link>, StoreError>;

    /// Release the underlying handle. Later calls may reopen it.
    fn close(&mut self);
}
