//! SQLite backend for [`CardStore`].
//!
//! Expected schema (created and populated outside this program):
//!
//! ```text
//! cards(id, card_number, title, content_text, reference_level,
//!       reference_level_label, needs_review, review_notes,
//!       text_citations, image_path)
//! card_links(source_card_id, target_card_id, display_text,
//!            raw_line_text, sort_order)
//! ```
//!
//! `card_number` must hold an integer in `0..=u32::MAX`. Rows where it is
//! NULL, negative or too large are skipped by every query (counts included),
//! so one bad row never fails a whole page and paging stays consistent.
//!
//! The database is opened read-only on first use and closed explicitly.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};

use super::{CardStore, StoreError};
use crate::core::card::{
    Card, CardId, CardSummary, DisplayNumber, Link, ReferenceLevel, Review,
};

const SUMMARY_COLUMNS: &str = "id, card_number, title, reference_level, \
     reference_level_label, needs_review, review_notes";

const SEARCH_FILTER: &str =
    "(title LIKE ?1 ESCAPE '\\' OR content_text LIKE ?1 ESCAPE '\\')";

/// Rows whose display number fits `DisplayNumber`.
const VALID_NUMBER: &str =
    "(typeof(card_number) = 'integer' AND card_number BETWEEN 0 AND 4294967295)";

pub struct SqliteCardStore {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqliteCardStore {
    /// Creates a store for `path`. Nothing is opened until the first query.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn connection(&mut self) -> Result<&Connection, StoreError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                let conn = Connection::open_with_flags(
                    &self.path,
                    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
                .map_err(|source| StoreError::Unavailable {
                    path: self.path.clone(),
                    source,
                })?;
                info!("Opened card database at {}", self.path.display());
                conn
            }
        };
        Ok(self.conn.insert(conn))
    }
}

/// Build a LIKE pattern that matches `query` as a literal substring.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<CardSummary> {
    Ok(CardSummary {
        id: CardId(row.get(0)?),
        number: DisplayNumber(row.get(1)?),
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        reference: ReferenceLevel {
            tag: row.get(3)?,
            label: row.get(4)?,
        },
        review: Review {
            needs_review: row.get::<_, Option<i64>>(5)?.unwrap_or(0) != 0,
            note: row.get(6)?,
        },
    })
}

fn link_from_row(row: &Row<'_>) -> rusqlite::Result<Link> {
    Ok(Link {
        target: row.get::<_, Option<i64>>(0)?.map(CardId),
        display_text: row.get(1)?,
        raw_line_text: row.get(2)?,
        sort_order: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
    })
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl CardStore for SqliteCardStore {
    fn count(&mut self, query: Option<&str>) -> Result<usize, StoreError> {
        let conn = self.connection()?;
        let count: i64 = match query {
            Some(q) => conn.query_row(
                &format!("SELECT COUNT(*) FROM cards WHERE {VALID_NUMBER} AND {SEARCH_FILTER}"),
                params![like_pattern(q)],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                &format!("SELECT COUNT(*) FROM cards WHERE {VALID_NUMBER}"),
                [],
                |row| row.get(0),
            )?,
        };
        debug!("count(query={:?}) = {}", query, count);
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn list(
        &mut self,
        limit: usize,
        offset: usize,
        query: Option<&str>,
    ) -> Result<Vec<CardSummary>, StoreError> {
        let conn = self.connection()?;
        let (limit, offset) = (to_i64(limit), to_i64(offset));

        let cards = match query {
            Some(q) => {
                let sql = format!(
                    "SELECT {SUMMARY_COLUMNS} FROM cards \
                     WHERE {VALID_NUMBER} AND {SEARCH_FILTER} \
                     ORDER BY card_number LIMIT ?2 OFFSET ?3"
                );
                let mut stmt = conn.prepare_cached(&sql)?;
                let rows = stmt
                    .query_map(params![like_pattern(q), limit, offset], summary_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let sql = format!(
                    "SELECT {SUMMARY_COLUMNS} FROM cards WHERE {VALID_NUMBER} \
                     ORDER BY card_number LIMIT ?1 OFFSET ?2"
                );
                let mut stmt = conn.prepare_cached(&sql)?;
                let rows = stmt
                    .query_map(params![limit, offset], summary_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        debug!(
            "list(limit={}, offset={}, query={:?}) returned {} cards",
            limit,
            offset,
            query,
            cards.len()
        );
        Ok(cards)
    }

    fn get_by_id(&mut self, id: CardId) -> Result<Option<Card>, StoreError> {
        let conn = self.connection()?;
        let card = conn
            .query_row(
                &format!(
                    "SELECT {SUMMARY_COLUMNS}, content_text, text_citations, image_path \
                     FROM cards WHERE id = ?1 AND {VALID_NUMBER}"
                ),
                params![id.0],
                |row| {
                    let summary = summary_from_row(row)?;
                    Ok(Card {
                        id: summary.id,
                        number: summary.number,
                        title: summary.title,
                        content: row.get(7)?,
                        reference: summary.reference,
                        review: summary.review,
                        citations: row.get(8)?,
                        image_path: row.get(9)?,
                        links: Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut card) = card else {
            debug!("get_by_id({}) found nothing", id);
            return Ok(None);
        };
        card.links = self.links(id)?;
        debug!("get_by_id({}) -> {} with {} links", id, card.number, card.links.len());
        Ok(Some(card))
    }

    fn get_by_display_number(
        &mut self,
        number: DisplayNumber,
    ) -> Result<Option<CardSummary>, StoreError> {
        let conn = self.connection()?;
        let summary = conn
            .query_row(
                &format!("SELECT {SUMMARY_COLUMNS} FROM cards WHERE card_number = ?1 LIMIT 1"),
                params![number.0],
                summary_from_row,
            )
            .optional()?;
        debug!("get_by_display_number({}) found={}", number, summary.is_some());
        Ok(summary)
    }

    fn links(&mut self, card: CardId) -> Result<Vec<Link>, StoreError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare_cached(
            "SELECT target_card_id, display_text, raw_line_text, sort_order \
             FROM card_links WHERE source_card_id = ?1 ORDER BY sort_order, rowid",
        )?;
        let links = stmt
            .query_map(params![card.0], link_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    fn close(&mut self) {
        if let Some(conn) = self.conn.take() {
            match conn.close() {
                Ok(()) => info!("Closed card database at {}", self.path.display()),
                Err((_conn, e)) => warn!("Failed to close card database cleanly: {}", e),
            }
        }
    }
}

impl Drop for SqliteCardStore {
    fn drop(&mut self) {
        self.close();
    }
}
