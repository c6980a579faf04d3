//! # See-Also Links
//!
//! Turns a card's stored links into what the detail view shows: a cleaned
//! label per link, and a quick-select number (`1`..=`9`) for the resolved ones.
//!
//! Numbering walks the links in stored order and only counts links that have
//! a target, so the same link list always yields the same numbers.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::card::{Card, CardId, Link};

/// Highest quick-select digit.
pub const MAX_QUICK_SELECT: u8 = 9;

/// Shown when a link carries neither display text nor source text.
pub const PLACEHOLDER_LABEL: &str = "·";

/// Matches hyperlink markup of the form `<wrapper>[target]{label}<wrapper>`,
/// e.g. `\see[C01924]{Synergy}` or `{{[C01924]{Synergy}}}`.
static LINK_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]\r\n]*\]\{(?P<label>[^}\r\n]*)\}").expect("link markup pattern is valid")
});

/// Reduce embedded hyperlink markup to its visible label. Text that does not
/// contain the markup is returned unchanged.
pub fn strip_link_markup(raw: &str) -> &str {
    match LINK_MARKUP.captures(raw).and_then(|c| c.name("label")) {
        Some(label) => label.as_str().trim(),
        None => raw,
    }
}

/// Label for a link: display text, else raw source line, markup stripped.
pub fn display_label(link: &Link) -> String {
    let text = [link.display_text.as_deref(), link.raw_line_text.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty());

    match text {
        Some(text) => {
            let stripped = strip_link_markup(text);
            if stripped.is_empty() {
                PLACEHOLDER_LABEL.to_string()
            } else {
                stripped.to_string()
            }
        }
        None => PLACEHOLDER_LABEL.to_string(),
    }
}

/// A link as the detail view shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLink {
    pub label: String,
    pub target: Option<CardId>,
    /// `Some(1..=9)` for the first nine resolved links.
    pub quick_key: Option<u8>,
}

impl NumberedLink {
    pub fn is_navigable(&self) -> bool {
        self.target.is_some()
    }
}

/// Number the resolved links 1..=9 in stored order.
pub fn number_links(links: &[Link]) -> Vec<NumberedLink> {
    let mut next_key: u8 = 1;
    links
        .iter()
        .map(|link| {
            let quick_key = match link.target {
                Some(_) if next_key <= MAX_QUICK_SELECT => {
                    let key = next_key;
                    next_key += 1;
                    Some(key)
                }
                _ => None,
            };
            NumberedLink {
                label: display_label(link),
                target: link.target,
                quick_key,
            }
        })
        .collect()
}

/// A card ready for the detail view, with its links annotated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub card: Card,
    pub links: Vec<NumberedLink>,
    /// Number of links reachable by quick-select. Never exceeds 9.
    pub navigable_count: usize,
}

impl DetailView {
    pub fn new(mut card: Card) -> Self {
        card.links.sort_by_key(|link| link.sort_order);
        let links = number_links(&card.links);
        let navigable_count = links.iter().filter(|l| l.quick_key.is_some()).count();
        Self {
            card,
            links,
            navigable_count,
        }
    }

    /// Target of the link bound to quick-select digit `n`, if any.
    pub fn quick_select(&self, n: u8) -> Option<CardId> {
        if n == 0 || usize::from(n) > self.navigable_count {
            return None;
        }
        self.links
            .iter()
            .find(|l| l.quick_key == Some(n))
            .and_then(|l| l.target)
    }
}
