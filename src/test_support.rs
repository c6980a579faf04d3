//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::card::{
    Card, CardId, CardSummary, DisplayNumber, Link, ReferenceLevel, Review,
};
use crate::store::{CardStore, StoreError};

pub fn card(id: i64, number: u32, title: &str, links: Vec<Link>) -> Card {
    Card {
        id: CardId(id),
        number: DisplayNumber(number),
        title: title.to_string(),
        content: Some(format!("Content of {title}")),
        reference: ReferenceLevel::default(),
        review: Review::default(),
        citations: None,
        image_path: None,
        links,
    }
}

/// Summaries for cards whose id and display number are both `n`.
pub fn summaries(numbers: impl IntoIterator<Item = u32>) -> Vec<CardSummary> {
    numbers
        .into_iter()
        .map(|n| card(i64::from(n), n, &format!("Card {n}"), Vec::new()).summary())
        .collect()
}

pub fn link(sort_order: i64, target: i64, label: &str) -> Link {
    Link {
        target: Some(CardId(target)),
        display_text: Some(label.to_string()),
        raw_line_text: None,
        sort_order,
    }
}

pub fn unresolved(sort_order: i64, label: &str) -> Link {
    Link {
        target: None,
        display_text: Some(label.to_string()),
        raw_line_text: None,
        sort_order,
    }
}

/// In-memory `CardStore` with the same ordering and filtering rules as the
/// SQLite backend.
#[derive(Default)]
pub struct MemoryStore {
    pub cards: Vec<Card>,
    pub fail: bool,
    /// Fail only `list`, leaving `count` working.
    pub fail_list: bool,
    pub open: bool,
    pub close_calls: usize,
}

impl MemoryStore {
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort_by_key(|c| c.number);
        Self {
            cards,
            ..Default::default()
        }
    }

    /// `count` cards numbered 1..=count, titled "Card N".
    pub fn numbered(count: u32) -> Self {
        Self::new(
            (1..=count)
                .map(|n| card(i64::from(n), n, &format!("Card {n}"), Vec::new()))
                .collect(),
        )
    }

    fn check(&mut self) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Query(rusqlite::Error::InvalidQuery));
        }
        self.open = true;
        Ok(())
    }

    fn matching<'a>(&'a self, query: Option<&'a str>) -> impl Iterator<Item = &'a Card> + 'a {
        let needle = query.map(str::to_lowercase);
        self.cards.iter().filter(move |c| match &needle {
            Some(q) => {
                c.title.to_lowercase().contains(q)
                    || c.content
                        .as_deref()
                        .is_some_and(|body| body.to_lowercase().contains(q))
            }
            None => true,
        })
    }
}

impl CardStore for MemoryStore {
    fn count(&mut self, query: Option<&str>) -> Result<usize, StoreError> {
        self.check()?;
        Ok(self.matching(query).count())
    }

    fn list(
        &mut self,
        limit: usize,
        offset: usize,
        query: Option<&str>,
    ) -> Result<Vec<CardSummary>, StoreError> {
        self.check()?;
        if self.fail_list {
            return Err(StoreError::Query(rusqlite::Error::InvalidQuery));
        }
        Ok(self
            .matching(query)
            .skip(offset)
            .take(limit)
            .map(Card::summary)
            .collect())
    }

    fn get_by_id(&mut self, id: CardId) -> Result<Option<Card>, StoreError> {
        self.check()?;
        Ok(self.cards.iter().find(|c| c.id == id).cloned())
    }

    fn get_by_display_number(
        &mut self,
        number: DisplayNumber,
    ) -> Result<Option<CardSummary>, StoreError> {
        self.check()?;
        Ok(self
            .cards
            .iter()
            .find(|c| c.number == number)
            .map(Card::summary))
    }

    fn links(&mut self, card: CardId) -> Result<Vec<Link>, StoreError> {
        self.check()?;
        Ok(self
            .cards
            .iter()
            .find(|c| c.id == card)
            .map(|c| c.links.clone())
            .unwrap_or_default())
    }

    fn close(&mut self) {
        self.open = false;
        self.close_calls += 1;
    }
}
