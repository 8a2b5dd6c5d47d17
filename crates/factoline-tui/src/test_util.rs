//! Rendering helpers for component tests.

use ratatui::{Frame, Terminal, backend::TestBackend, buffer::Cell};

/// Draw once into a `width` x `height` test terminal and return each row
/// as plain text.
#[allow(clippy::unwrap_used)]
pub fn render_lines(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .chunks(usize::from(width))
        .map(|row| row.iter().map(Cell::symbol).collect::<String>())
        .collect()
}

/// True if any row contains `needle`.
pub fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|l| l.contains(needle))
}
