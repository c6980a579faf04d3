//! Helpers for rendering tests. Only compiled during tests.

use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Text content of the test terminal, one line per row.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
