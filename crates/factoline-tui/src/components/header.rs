//! Header bar: brand, search field and cart summary.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use factoline_core::Cart;

use crate::action::{Action, Pane};
use crate::component::Component;
use crate::theme;

const BRAND: &str = " factoline";
const BRAND_WIDTH: u16 = 12;
const CART_WIDTH: u16 = 24;
const CLEAR_HINT: &str = " ✕ ^U ";
const CLEAR_HINT_WIDTH: u16 = 6;
const PLACEHOLDER: &str = "Recherche : Planches de chêne, avivés, poutres...";

/// Inner header regions: brand, search field, cart.
fn regions(inner: Rect) -> [Rect; 3] {
    Layout::horizontal([
        Constraint::Length(BRAND_WIDTH),
        Constraint::Min(10),
        Constraint::Length(CART_WIDTH),
    ])
    .areas(inner)
}

#[derive(Default)]
pub struct Header {
    focused: bool,
    query: String,
    cart: Cart,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    fn search_line(&self, width: u16) -> Line<'_> {
        let mut spans = vec![Span::styled(" ⌕ ", theme::muted())];
        if self.query.is_empty() && !self.focused {
            spans.push(Span::styled(PLACEHOLDER, theme::muted()));
            return Line::from(spans);
        }

        spans.push(Span::styled(self.query.as_str(), theme::text()));
        if self.focused {
            spans.push(Span::styled("█", theme::key_hint_key()));
        }
        if !self.query.is_empty() {
            let used: usize = spans.iter().map(Span::width).sum();
            let gap = usize::from(width)
                .saturating_sub(used + usize::from(CLEAR_HINT_WIDTH))
                .max(1);
            spans.push(Span::raw(" ".repeat(gap)));
            spans.push(Span::styled(CLEAR_HINT, theme::key_hint()));
        }
        Line::from(spans)
    }

    fn cart_line(&self) -> Line<'_> {
        let mut spans = vec![
            Span::styled("Panier ", theme::muted()),
            Span::styled(format!("{} €", self.cart.total()), theme::value()),
        ];
        let count = self.cart.notifications();
        if count > 0 {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {count} "), theme::notification_badge()));
        }
        Line::from(spans).right_aligned()
    }
}

impl Component for Header {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                (!self.query.is_empty()).then_some(Action::ClearSearch)
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                let mut next = self.query.clone();
                next.push(c);
                Some(Action::SearchInput(next))
            }
            (_, KeyCode::Backspace) => {
                let mut next = self.query.clone();
                next.pop().map(|_| Action::SearchInput(next))
            }
            (_, KeyCode::Enter | KeyCode::Esc | KeyCode::Down) => Some(Action::Focus(Pane::Products)),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let pos = Position::new(mouse.column, mouse.row);
        let [brand, search, _] = regions(self.block().inner(area));

        // The brand and the clear hint both reset the search.
        let clear_hint = Rect {
            x: search.right().saturating_sub(CLEAR_HINT_WIDTH),
            width: CLEAR_HINT_WIDTH.min(search.width),
            ..search
        };
        if brand.contains(pos) || (!self.query.is_empty() && clear_hint.contains(pos)) {
            return Ok(Some(Action::ClearSearch));
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ListingUpdated(listing) = action {
            self.query.clone_from(&listing.query);
            self.cart = listing.cart;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [brand, search, cart] = regions(inner);
        frame.render_widget(Paragraph::new(Span::styled(BRAND, theme::brand())), brand);
        frame.render_widget(Paragraph::new(self.search_line(search.width)), search);
        frame.render_widget(Paragraph::new(self.cart_line()), cart);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "header"
    }
}
