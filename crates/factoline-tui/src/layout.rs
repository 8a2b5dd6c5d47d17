//! Page geometry shared by rendering, mouse hit-testing and the grid's
//! column count.

use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::action::Pane;

pub const HEADER_HEIGHT: u16 = 3;
pub const SIDEBAR_WIDTH: u16 = 32;
/// Narrowest card that still fits "Vendu par : Scierie ..." on one line.
pub const CARD_MIN_WIDTH: u16 = 34;
/// Border plus nine content rows.
pub const CARD_HEIGHT: u16 = 11;

/// Top-level page regions: header across the top, sidebar and results
/// side by side, one-line status bar at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub header: Rect,
    pub sidebar: Rect,
    pub results: Rect,
    pub status: Rect,
}

impl PageLayout {
    pub fn new(area: Rect) -> Self {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let sidebar_width = SIDEBAR_WIDTH.min(body.width / 3);
        let [sidebar, results] =
            Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(1)])
                .areas(body);

        Self {
            header,
            sidebar,
            results,
            status,
        }
    }

    pub fn from_size(width: u16, height: u16) -> Self {
        Self::new(Rect::new(0, 0, width, height))
    }

    pub fn area(&self, pane: Pane) -> Rect {
        match pane {
            Pane::Search => self.header,
            Pane::Filters => self.sidebar,
            Pane::Products => self.results,
        }
    }

    /// The pane under a terminal cell, if any.
    pub fn pane_at(&self, column: u16, row: u16) -> Option<Pane> {
        let pos = Position::new(column, row);
        Pane::ALL
            .into_iter()
            .find(|&pane| self.area(pane).contains(pos))
    }
}

/// Cards per row for a results area `width` columns wide.
pub fn grid_columns(width: u16, max_columns: u16) -> u16 {
    (width / CARD_MIN_WIDTH).clamp(1, max_columns.max(1))
}
