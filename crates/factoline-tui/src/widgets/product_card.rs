//! Product card: reference, drying badge, spec sheet, seller, stock
//! indicator, price and the "Ajouter" button.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use factoline_core::Product;

use crate::theme;

const BUTTON: &str = " + Ajouter ";

pub struct ProductCard<'a> {
    product: &'a Product,
    selected: bool,
}

impl<'a> ProductCard<'a> {
    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn lines(&self, width: u16) -> Vec<Line<'a>> {
        let p = self.product;
        let low = p.is_low_stock();
        let title_style = if self.selected {
            theme::selected()
        } else {
            theme::value()
        };

        vec![
            Line::from(Span::styled(p.title.as_str(), title_style)),
            two_sided(
                vec![Span::styled(format!("Ref: {}", p.sku()), theme::muted())],
                vec![Span::styled(format!(" {} ", p.drying), theme::badge())],
                width,
            ),
            spec_row("Épaisseur", p.thickness.as_str(), width),
            spec_row("Longueurs", p.lengths.as_str(), width),
            spec_row("Qualité", p.quality_grade(), width),
            Line::from(vec![
                Span::styled("Vendu par : ", theme::muted()),
                Span::styled(p.seller.as_str(), theme::link()),
            ]),
            Line::from(Span::styled(
                "─".repeat(usize::from(width)),
                theme::key_hint(),
            )),
            Line::from(vec![
                Span::styled("● ", theme::stock(low)),
                Span::styled(
                    format!("Stock : {} m³ dispo", p.stock_label()),
                    theme::stock(low),
                ),
            ]),
            two_sided(
                vec![
                    Span::styled(p.price_label(), theme::value()),
                    Span::styled("  HT / m³", theme::muted()),
                ],
                vec![Span::styled(BUTTON, theme::button())],
                width,
            ),
        ]
    }
}

impl Widget for ProductCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.selected {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines(inner.width)).render(inner, buf);
    }
}

/// Label on the left, value on the right.
fn spec_row<'a>(label: &'a str, value: &'a str, width: u16) -> Line<'a> {
    two_sided(
        vec![Span::styled(label, theme::muted())],
        vec![Span::styled(value, theme::value())],
        width,
    )
}

/// Join `left` and `right` with enough spaces to push `right` to the
/// edge. Falls back to a single space when they do not fit.
fn two_sided<'a>(left: Vec<Span<'a>>, right: Vec<Span<'a>>, width: u16) -> Line<'a> {
    let used: usize = left.iter().chain(&right).map(Span::width).sum();
    let gap = usize::from(width).saturating_sub(used).max(1);
    let mut spans = left;
    spans.push(Span::raw(" ".repeat(gap)));
    spans.extend(right);
    Line::from(spans)
}
