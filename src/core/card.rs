//! # Card Records
//!
//! Strongly typed rows of the dictionary. Every optional column is an
//! explicit `Option`, so the renderer never has to guess whether a field
//! was loaded.
//!
//! ```text
//! Card
//! ├── id: CardId                     // internal row id
//! ├── number: DisplayNumber          // human-facing, renders as C01924
//! ├── title / content
//! ├── reference: ReferenceLevel      // tag + label, both optional
//! ├── review: Review                 // needs_review + note
//! ├── citations / image_path
//! └── links: Vec<Link>               // ordered by sort_order
//! ```

use std::fmt;
use std::str::FromStr;

/// Internal identity of a card row. Opaque to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-facing card number. Stored as an integer, displayed as `C01924`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayNumber(pub u32);

/// Prefix letter used when formatting display numbers.
pub const DISPLAY_PREFIX: char = 'C';
/// Minimum digit count after the prefix.
pub const DISPLAY_WIDTH: usize = 5;

impl fmt::Display for DisplayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DISPLAY_PREFIX}{:0width$}", self.0, width = DISPLAY_WIDTH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a card number: {input:?}")]
pub struct ParseDisplayNumberError {
    pub input: String,
}

impl FromStr for DisplayNumber {
    type Err = ParseDisplayNumberError;

    /// Accepts `1924`, `01924`, `C01924` or `c1924`. One leading letter and any
    /// zero padding are stripped; the rest must be plain digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDisplayNumberError {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let digits = match trimmed.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => &trimmed[c.len_utf8()..],
            _ => trimmed,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let unpadded = digits.trim_start_matches('0');
        if unpadded.is_empty() {
            return Ok(DisplayNumber(0));
        }
        unpadded.parse::<u32>().map(DisplayNumber).map_err(|_| err())
    }
}

/// Reference-level classification. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceLevel {
    pub tag: Option<String>,
    pub label: Option<String>,
}

impl ReferenceLevel {
    /// The human label, falling back to the raw tag.
    pub fn display(&self) -> Option<&str> {
        self.label
            .as_deref()
            .or(self.tag.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Review {
    pub needs_review: bool,
    pub note: Option<String>,
}

/// One row of a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub id: CardId,
    pub number: DisplayNumber,
    pub title: String,
    pub reference: ReferenceLevel,
    pub review: Review,
}

impl CardSummary {
    /// `Title (Label)` when a reference level is present, otherwise the bare title.
    pub fn display_title(&self) -> String {
        display_title(&self.title, &self.reference)
    }
}

/// A "See also" cross-reference. `target` is `None` when the link could not
/// be resolved to a card in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    pub target: Option<CardId>,
    pub display_text: Option<String>,
    pub raw_line_text: Option<String>,
    pub sort_order: i64,
}

impl Link {
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

/// The full record shown in the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub number: DisplayNumber,
    pub title: String,
    pub content: Option<String>,
    pub reference: ReferenceLevel,
    pub review: Review,
    pub citations: Option<String>,
    pub image_path: Option<String>,
    pub links: Vec<Link>,
}

impl Card {
    pub fn display_title(&self) -> String {
        display_title(&self.title, &self.reference)
    }

    pub fn summary(&self) -> CardSummary {
        CardSummary {
            id: self.id,
            number: self.number,
            title: self.title.clone(),
            reference: self.reference.clone(),
            review: self.review.clone(),
        }
    }
}

fn display_title(title: &str, reference: &ReferenceLevel) -> String {
    match reference.display() {
        Some(label) => format!("{title} ({label})"),
        None => title.to_string(),
    }
}
