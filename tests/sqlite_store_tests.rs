use std::path::PathBuf;

use rusqlite::{Connection, params};
use tempfile::TempDir;

use synergetics::core::action::Action;
use synergetics::core::card::{CardId, DisplayNumber};
use synergetics::core::runtime::{Browser, Flow};
use synergetics::core::state::Mode;
use synergetics::store::{CardStore, SqliteCardStore, StoreError};

// ============================================================================
// Helper Functions
// ============================================================================

const SCHEMA: &str = "
    CREATE TABLE cards (
        id INTEGER PRIMARY KEY,
        card_number INTEGER,
        title TEXT,
        content_text TEXT,
        reference_level TEXT,
        reference_level_label TEXT,
        needs_review INTEGER DEFAULT 0,
        review_notes TEXT,
        text_citations TEXT,
        image_path TEXT
    );
    CREATE TABLE card_links (
        source_card_id INTEGER NOT NULL,
        target_card_id INTEGER,
        display_text TEXT,
        raw_line_text TEXT,
        sort_order INTEGER
    );
";

/// Writes a small dictionary to a temporary database file.
///
/// | id | number | title              |
/// |----|--------|--------------------|
/// | 10 | 1924   | Tetrahedron        |
/// | 11 | 2000   | Sphere             |
/// | 12 | 5      | Vector_Equilibrium |
/// | 13 | 42     | tensegrity         |
fn seeded_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("synergetics_dictionary.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA).unwrap();

    let cards: [(i64, u32, &str, Option<&str>, Option<&str>, Option<&str>, i64, Option<&str>); 4] = [
        (10, 1924, "Tetrahedron", Some("Minimum structural system"), Some("A"), Some("Primary"), 0, None),
        (11, 2000, "Sphere", Some("Omnidirectional 50% closest packing"), Some("B"), None, 0, None),
        (12, 5, "Vector_Equilibrium", None, None, None, 1, Some("check scan")),
        (13, 42, "tensegrity", Some("Islanded compression"), None, None, 0, None),
    ];
    for (id, number, title, content, level, label, review, note) in cards {
        conn.execute(
            "INSERT INTO cards (id, card_number, title, content_text, reference_level, \
             reference_level_label, needs_review, review_notes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![id, number, title, content, level, label, review, note],
        )
        .unwrap();
    }
    conn.execute(
        "UPDATE cards SET text_citations = ?1, image_path = ?2 WHERE id = 10",
        params!["Synergetics 1, 987.011", "images/c01924.png"],
    )
    .unwrap();

    let links: [(i64, Option<i64>, Option<&str>, Option<&str>, i64); 4] = [
        (10, Some(11), Some("Sphere"), None, 2),
        (10, None, None, Some("[Lost]{Lost Card}"), 1),
        (10, Some(12), Some("Vector Equilibrium"), None, 3),
        (11, Some(10), Some("Tetrahedron"), None, 1),
    ];
    for (source, target, text, raw, sort) in links {
        conn.execute(
            "INSERT INTO card_links (source_card_id, target_card_id, display_text, \
             raw_line_text, sort_order) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![source, target, text, raw, sort],
        )
        .unwrap();
    }

    (dir, path)
}

fn numbers(cards: &[synergetics::core::card::CardSummary]) -> Vec<u32> {
    cards.iter().map(|c| c.number.0).collect()
}

// ============================================================================
// Store Queries
// ============================================================================

#[test]
fn test_list_orders_by_card_number_and_pages() {
    let (_dir, path) = seeded_db();
    let mut store = SqliteCardStore::new(path);

    assert_eq!(store.count(None).unwrap(), 4);
    assert_eq!(numbers(&store.list(10, 0, None).unwrap()), vec![5, 42, 1924, 2000]);
    assert_eq!(numbers(&store.list(2, 2, None).unwrap()), vec![1924, 2000]);
    assert!(store.list(2, 4, None).unwrap().is_empty());
}

#[test]
fn test_search_is_case_insensitive_over_title_and_content() {
    let (_dir, path) = seeded_db();
    let mut store = SqliteCardStore::new(path);

    assert_eq!(store.count(Some("TETRA")).unwrap(), 1);
    assert_eq!(numbers(&store.list(10, 0, Some("compression")).unwrap()), vec![42]);
    assert_eq!(store.count(Some("zzz")).unwrap(), 0);
    assert!(store.list(10, 0, Some("zzz")).unwrap().is_empty());
}

#[test]
fn test_search_treats_wildcards_literally() {
    let (_dir, path) = seeded_db();
    let mut store = SqliteCardStore::new(path);

    assert_eq!(numbers(&store.list(10, 0, Some("_")).unwrap()), vec![5]);
    assert_eq!(numbers(&store.list(10, 0, Some("50%")).unwrap()), vec![2000]);
    assert_eq!(store.count(Some("%")).unwrap(), 1);
}

#[test]
fn test_get_by_id_loads_fields_and_ordered_links() {
    let (_dir, path) = seeded_db();
    let mut store = SqliteCardStore::new(path);

    let card = store.get_by_id(CardId(10)).unwrap().unwrap();
    assert_eq!(card.number, DisplayNumber(1924));
    assert_eq!(card.display_title(), "Tetrahedron (Primary)");
    assert_eq!(card.content.as_deref(), Some("Minimum structural system"));
    assert_eq!(card.citations.as_deref(), Some("Synergetics 1, 987.011"));
    assert_eq!(card.image_path.as_deref(), Some("images/c01924.png"));

    let orders: Vec<i64> = card.links.iter().map(|l| l.sort_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(card.links[0].target, None);
    assert_eq!(card.links[0].raw_line_text.as_deref(), Some("[Lost]{Lost Card}"));
    assert_eq!(card.links[1].target, Some(CardId(11)));

    assert!(store.get_by_id(CardId(999)).unwrap().is_none());
}

#[test]
fn test_get_by_display_number() {
    let (_dir, path) = seeded_db();
    let mut store = SqliteCardStore::new(path);

    let summary = store.get_by_display_number(DisplayNumber(5)).unwrap().unwrap();
    assert_eq!(summary.id, CardId(12));
    assert!(summary.review.needs_review);
    assert_eq!(summary.review.note.as_deref(), Some("check scan"));

    let sphere = store.get_by_display_number(DisplayNumber(2000)).unwrap().unwrap();
    assert_eq!(sphere.display_title(), "Sphere (B)");

    assert!(store.get_by_display_number(DisplayNumber(3)).unwrap().is_none());
}

#[test]
fn test_rows_without_usable_card_number_are_skipped() {
    let (_dir, path) = seeded_db();
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "INSERT INTO cards (id, card_number, title) VALUES (20, NULL, 'Unnumbered');
             INSERT INTO cards (id, card_number, title) VALUES (21, -3, 'Negative');
             INSERT INTO cards (id, card_number, title) VALUES (22, 99999999999, 'Too large');",
        )
        .unwrap();
    }
    let mut store = SqliteCardStore::new(path);

    assert_eq!(store.count(None).unwrap(), 4);
    assert_eq!(numbers(&store.list(10, 0, None).unwrap()), vec![5, 42, 1924, 2000]);
    assert_eq!(store.count(Some("Unnumbered")).unwrap(), 0);
    assert!(store.list(10, 0, Some("Negative")).unwrap().is_empty());
    assert!(store.get_by_id(CardId(20)).unwrap().is_none());
    assert!(store.get_by_id(CardId(21)).unwrap().is_none());
}

// ============================================================================
// Connection Lifecycle
// ============================================================================

#[test]
fn test_connection_opens_lazily_and_reopens_after_close() {
    let (_dir, path) = seeded_db();
    let mut store = SqliteCardStore::new(&path);
    assert!(!store.is_open());

    store.count(None).unwrap();
    assert!(store.is_open());

    store.close();
    assert!(!store.is_open());
    store.close();

    assert_eq!(store.count(None).unwrap(), 4);
    assert!(store.is_open());
}

#[test]
fn test_missing_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SqliteCardStore::new(dir.path().join("absent.db"));

    let err = store.count(None).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
    assert!(err.to_string().contains("absent.db"));

    // Read-only open never creates the file
    assert!(!dir.path().join("absent.db").exists());
}

// ============================================================================
// End-to-end Navigation
// ============================================================================

#[test]
fn test_browse_jump_and_follow_links() {
    let (_dir, path) = seeded_db();
    let mut browser = Browser::new(SqliteCardStore::new(path), 2);
    browser.start().unwrap();

    assert_eq!(browser.app.status_message, "Synergetics Dictionary - 4 cards loaded");
    assert_eq!(numbers(&browser.app.cards), vec![5, 42]);

    browser.handle(Action::NextPage);
    assert_eq!(numbers(&browser.app.cards), vec![1924, 2000]);
    assert_eq!(browser.app.status_message, "Page 2");

    browser.handle(Action::OpenJump);
    browser.handle(Action::SubmitJump("1924".to_string()));
    assert_eq!(browser.app.mode, Mode::Detail);
    assert_eq!(browser.app.status_message, "Jumped to card C01924");

    let view = browser.app.current_card.as_ref().unwrap();
    assert_eq!(view.navigable_count, 2);
    assert_eq!(view.links[0].label, "Lost Card");

    browser.handle(Action::FollowLink(1));
    assert_eq!(browser.app.status_message, "Navigated to C02000 - Sphere");

    browser.handle(Action::Back);
    assert_eq!(browser.app.mode, Mode::List);
    assert_eq!(browser.app.offset, 2);

    assert_eq!(browser.handle(Action::Quit), Flow::Quit);
}

#[test]
fn test_search_paging_within_results() {
    let (_dir, path) = seeded_db();
    let mut browser = Browser::new(SqliteCardStore::new(path), 1);
    browser.start().unwrap();

    browser.handle(Action::OpenSearch);
    browser.handle(Action::SubmitSearch("on".to_string()));
    assert_eq!(browser.app.total_count, 3);
    assert_eq!(numbers(&browser.app.cards), vec![42]);

    browser.handle(Action::NextPage);
    assert_eq!(browser.app.offset, 1);
    assert_eq!(numbers(&browser.app.cards), vec![1924]);

    browser.handle(Action::ClearSearch);
    assert_eq!(browser.app.total_count, 4);
    assert_eq!(browser.app.offset, 0);
    assert_eq!(browser.app.status_message, "Returned to full card list");
}
