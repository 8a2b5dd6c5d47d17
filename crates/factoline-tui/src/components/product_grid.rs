//! Results pane: page heading, product card grid (or the empty state) and
//! the buying guide.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use factoline_core::Listing;

use crate::action::Action;
use crate::component::Component;
use crate::layout::{CARD_HEIGHT, PageLayout, grid_columns};
use crate::theme;
use crate::widgets::heading;
use crate::widgets::product_card::ProductCard;

const HEADING_HEIGHT: u16 = 4;
const GUIDE_HEIGHT: u16 = 7;

/// Which cards are on screen and where.
#[derive(Debug, Clone, Copy)]
struct GridGeometry {
    area: Rect,
    columns: usize,
    first_row: usize,
    visible_rows: usize,
}

impl GridGeometry {
    /// Scrolls so the row holding `selected` is visible.
    fn new(area: Rect, columns: u16, selected: usize) -> Self {
        let columns = usize::from(columns.max(1));
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected_row = selected / columns;
        Self {
            area,
            columns,
            first_row: (selected_row + 1).saturating_sub(visible_rows),
            visible_rows,
        }
    }

    fn card_width(&self) -> u16 {
        let columns = u16::try_from(self.columns).unwrap_or(1);
        self.area.width / columns
    }

    /// Screen rect of card `index`, if it is in the visible window.
    fn cell(&self, index: usize) -> Option<Rect> {
        let row = index / self.columns;
        if row < self.first_row || row >= self.first_row + self.visible_rows {
            return None;
        }
        let col = u16::try_from(index % self.columns).ok()?;
        let offset = u16::try_from(row - self.first_row).ok()?;
        let rect = Rect {
            x: self.area.x + col * self.card_width(),
            y: self.area.y + offset * CARD_HEIGHT,
            width: self.card_width(),
            height: CARD_HEIGHT,
        };
        Some(rect.intersection(self.area))
    }

    /// Card index under a terminal cell.
    fn index_at(&self, pos: Position, len: usize) -> Option<usize> {
        if !self.area.contains(pos) || self.card_width() == 0 {
            return None;
        }
        let col = usize::from((pos.x - self.area.x) / self.card_width());
        let row = self.first_row + usize::from((pos.y - self.area.y) / CARD_HEIGHT);
        let index = row * self.columns + col;
        (col < self.columns && index < len).then_some(index)
    }
}

pub struct ProductGrid {
    focused: bool,
    listing: Arc<Listing>,
    selected: usize,
    max_columns: u16,
    columns: u16,
}

impl ProductGrid {
    pub fn new(max_columns: u16) -> Self {
        Self {
            focused: false,
            listing: Arc::new(Listing::default()),
            selected: 0,
            max_columns,
            columns: 1,
        }
    }

    fn len(&self) -> usize {
        self.listing.products.len()
    }

    /// Heading, grid and (when not searching) guide regions of the pane.
    fn regions(&self, area: Rect) -> [Rect; 3] {
        let inner = Self::block(self.focused).inner(area);
        let guide = if self.listing.is_searching() {
            0
        } else {
            GUIDE_HEIGHT
        };
        Layout::vertical([
            Constraint::Length(HEADING_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(guide),
        ])
        .areas(inner)
    }

    fn block(focused: bool) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    fn move_horizontal(&mut self, right: bool) {
        let columns = usize::from(self.columns.max(1));
        let col = self.selected % columns;
        if right {
            if col + 1 < columns && self.selected + 1 < self.len() {
                self.selected += 1;
            }
        } else if col > 0 {
            self.selected -= 1;
        }
    }

    /// Moves one row; stepping down into a shorter last row lands on its
    /// final card.
    fn move_vertical(&mut self, down: bool) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let columns = usize::from(self.columns.max(1));
        if down {
            if self.selected / columns < (len - 1) / columns {
                self.selected = (self.selected + columns).min(len - 1);
            }
        } else if self.selected >= columns {
            self.selected -= columns;
        }
    }

    fn activate(&self) -> Option<Action> {
        match self.listing.products.get(self.selected) {
            Some(product) => Some(Action::AddToCart(product.id.clone())),
            None if self.listing.is_searching() => Some(Action::ClearSearch),
            None => None,
        }
    }

    fn render_heading(&self, frame: &mut Frame, area: Rect) {
        let query = self.listing.query.as_str();
        let lines = vec![
            heading::breadcrumb(query),
            Line::default(),
            Line::from(Span::styled(heading::title(query), theme::value())),
            Line::from(Span::styled(heading::summary(self.len()), theme::muted())),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let geometry = GridGeometry::new(area, self.columns, self.selected);
        for (index, product) in self.listing.products.iter().enumerate() {
            if let Some(cell) = geometry.cell(index) {
                let card = ProductCard::new(product).selected(self.focused && index == self.selected);
                frame.render_widget(card, cell);
            }
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled("⌕", theme::muted())),
            Line::default(),
            Line::from(Span::styled(heading::EMPTY_TITLE, theme::value())),
            Line::from(Span::styled(
                heading::empty_message(&self.listing.query),
                theme::muted(),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Entrée ", theme::key_hint_key()),
                Span::styled(heading::SHOW_ALL, theme::link()),
            ]),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(theme::key_hint());
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
    }

    fn render_guide(frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let block = Block::default()
            .title(format!(" {} ", heading::GUIDE_TITLE))
            .title_style(theme::value())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        frame.render_widget(
            Paragraph::new(heading::GUIDE_TEXT)
                .style(theme::text())
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
    }
}

impl Component for ProductGrid {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('h') | KeyCode::Left => {
                self.move_horizontal(false);
                None
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.move_horizontal(true);
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_vertical(true);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_vertical(false);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.len().saturating_sub(1);
                None
            }
            KeyCode::Enter | KeyCode::Char('a') => self.activate(),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let pos = Position::new(mouse.column, mouse.row);
        let [_, grid, _] = self.regions(area);
        if self.listing.is_empty() {
            return Ok(if grid.contains(pos) { self.activate() } else { None });
        }

        let geometry = GridGeometry::new(grid, self.columns, self.selected);
        let Some(index) = geometry.index_at(pos, self.len()) else {
            return Ok(None);
        };
        self.selected = index;
        // The last content row of a card holds the "Ajouter" button.
        let on_button = geometry
            .cell(index)
            .is_some_and(|cell| pos.y + 2 == cell.y + CARD_HEIGHT);
        Ok(if on_button { self.activate() } else { None })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ListingUpdated(listing) => {
                if !Arc::ptr_eq(&self.listing.products, &listing.products) {
                    self.selected = 0;
                }
                self.listing = Arc::clone(listing);
            }
            Action::Resize(w, h) => {
                let results = PageLayout::from_size(*w, *h).results;
                let inner = Self::block(false).inner(results);
                self.columns = grid_columns(inner.width, self.max_columns);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Self::block(self.focused), area);
        let [head, grid, guide] = self.regions(area);

        self.render_heading(frame, head);
        if self.listing.is_empty() {
            self.render_empty(frame, grid);
        } else {
            self.render_grid(frame, grid);
        }
        if !self.listing.is_searching() {
            Self::render_guide(frame, guide);
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "products"
    }
}
