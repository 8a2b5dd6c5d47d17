//! Filter sidebar: one checkbox list per category, plus "Tout effacer".

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use factoline_core::{FilterCategory, Selection};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// One rendered sidebar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    /// Category heading (index into categories).
    Heading(usize),
    /// Option checkbox (category index, option index).
    Choice(usize, usize),
    Spacer,
}

/// Inner regions: the "Tout effacer" line above the option list.
fn regions(area: Rect) -> [Rect; 2] {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner)
}

#[derive(Default)]
pub struct Sidebar {
    focused: bool,
    categories: Arc<Vec<FilterCategory>>,
    selection: Selection,
    rows: Vec<Row>,
    /// Index into `rows`; always points at a `Row::Choice` when any exist.
    cursor: usize,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    fn rebuild_rows(&mut self) {
        self.rows.clear();
        for (ci, category) in self.categories.iter().enumerate() {
            if ci > 0 {
                self.rows.push(Row::Spacer);
            }
            self.rows.push(Row::Heading(ci));
            self.rows
                .extend((0..category.options.len()).map(|oi| Row::Choice(ci, oi)));
        }
        self.cursor = self.nearest_option(self.cursor.min(self.rows.len().saturating_sub(1)));
    }

    /// First option row at or after `from`, else the last one before it.
    fn nearest_option(&self, from: usize) -> usize {
        let is_option = |r: &Row| matches!(r, Row::Choice(..));
        self.rows
            .iter()
            .skip(from)
            .position(is_option)
            .map(|i| from + i)
            .or_else(|| self.rows.iter().rposition(is_option))
            .unwrap_or(0)
    }

    fn move_cursor(&mut self, forward: bool) {
        let candidates = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| matches!(r, Row::Choice(..)))
            .map(|(i, _)| i);
        let next = if forward {
            candidates.filter(|&i| i > self.cursor).min()
        } else {
            candidates.filter(|&i| i < self.cursor).max()
        };
        if let Some(next) = next {
            self.cursor = next;
        }
    }

    fn jump(&mut self, to_end: bool) {
        let is_option = |r: &Row| matches!(r, Row::Choice(..));
        let target = if to_end {
            self.rows.iter().rposition(is_option)
        } else {
            self.rows.iter().position(is_option)
        };
        if let Some(target) = target {
            self.cursor = target;
        }
    }

    /// The category/option ids under the cursor.
    fn current(&self) -> Option<(&str, &str)> {
        match self.rows.get(self.cursor)? {
            Row::Choice(ci, oi) => {
                let category = self.categories.get(*ci)?;
                let option = category.options.get(*oi)?;
                Some((category.id.as_str(), option.id.as_str()))
            }
            Row::Heading(_) | Row::Spacer => None,
        }
    }

    fn toggle_current(&self) -> Option<Action> {
        let (category, option) = self.current()?;
        Some(Action::SetOption {
            category: category.into(),
            option: option.into(),
            selected: !self.selection.is_selected(category, option),
        })
    }

    fn row_line(&self, row: Row, is_cursor: bool) -> Line<'_> {
        match row {
            Row::Spacer => Line::default(),
            Row::Heading(ci) => self.categories.get(ci).map_or_else(Line::default, |c| {
                Line::from(Span::styled(c.title.to_uppercase(), theme::title_style()))
            }),
            Row::Choice(ci, oi) => {
                let Some(category) = self.categories.get(ci) else {
                    return Line::default();
                };
                let Some(option) = category.options.get(oi) else {
                    return Line::default();
                };
                let checked = self.selection.is_selected(&category.id, &option.id);
                let base = if is_cursor && self.focused {
                    theme::selected()
                } else if checked {
                    theme::value()
                } else {
                    theme::text()
                };
                let mut spans = vec![
                    Span::styled(if checked { " [x] " } else { " [ ] " }, base),
                    Span::styled(option.label.as_str(), base),
                ];
                if let Some(count) = option.display_count() {
                    spans.push(Span::styled(format!(" ({count})"), theme::muted()));
                }
                Line::from(spans)
            }
        }
    }
}

impl Component for Sidebar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(true);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(false);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.jump(false);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.jump(true);
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current(),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent, area: Rect) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let [clear, list] = regions(area);
        if clear.contains((mouse.column, mouse.row).into()) {
            return Ok(Some(Action::ClearFilters));
        }
        if mouse.row < list.y || mouse.row >= list.bottom() {
            return Ok(None);
        }
        let index = self.scroll_offset(list.height) + usize::from(mouse.row - list.y);
        if matches!(self.rows.get(index), Some(Row::Choice(..))) {
            self.cursor = index;
            return Ok(self.toggle_current());
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ListingUpdated(listing) = action {
            if !Arc::ptr_eq(&self.categories, &listing.categories) {
                self.categories = Arc::clone(&listing.categories);
                self.rebuild_rows();
            }
            self.selection.clone_from(&listing.selection);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Affiner la recherche ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        frame.render_widget(block, area);

        let [clear, list] = regions(area);
        let clear_line = if self.selection.is_empty() {
            Line::from(Span::styled("Tout effacer ", theme::key_hint()))
        } else {
            Line::from(vec![
                Span::styled("c ", theme::key_hint_key()),
                Span::styled("Tout effacer", theme::link()),
                Span::raw(" "),
            ])
        };
        frame.render_widget(Paragraph::new(clear_line.right_aligned()), clear);

        let offset = self.scroll_offset(list.height);
        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(list.height))
            .map(|(i, row)| self.row_line(*row, i == self.cursor))
            .collect();
        frame.render_widget(Paragraph::new(lines), list);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "sidebar"
    }
}

impl Sidebar {
    /// First visible row so the cursor stays on screen.
    fn scroll_offset(&self, height: u16) -> usize {
        let height = usize::from(height.max(1));
        (self.cursor + 1).saturating_sub(height)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use factoline_core::{Catalog, Selection, Storefront};

    use super::*;
    use crate::test_util::{contains, render_lines};

    fn press(sidebar: &mut Sidebar, code: KeyCode) -> Option<Action> {
        sidebar
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn sidebar_for(store: &Storefront) -> Sidebar {
        let mut sidebar = Sidebar::new();
        sidebar
            .update(&Action::ListingUpdated(store.listing()))
            .unwrap();
        sidebar
    }

    fn oak_store() -> Storefront {
        let selection: Selection = [("essence", ["oak"])].into_iter().collect();
        Storefront::with_initial(Catalog::builtin(), "", selection)
    }

    #[test]
    fn renders_title_checkboxes_and_counts() {
        let sidebar = sidebar_for(&oak_store());
        let lines = render_lines(32, 30, |f| sidebar.render(f, f.area()));
        assert!(lines[0].contains("Affiner la recherche"));
        assert!(lines[1].contains("c Tout effacer"));
        assert!(contains(&lines, "ESSENCE"));
        assert!(contains(&lines, "[x] Chêne (5)"));
        assert!(contains(&lines, "[ ] Douglas (3)"));
    }

    #[test]
    fn options_without_counts_show_no_parenthesis() {
        let sidebar = sidebar_for(&oak_store());
        let lines = render_lines(32, 40, |f| sidebar.render(f, f.area()));
        let pefc = lines.iter().find(|l| l.contains("PEFC")).unwrap();
        assert!(!pefc.contains('('));
    }

    #[test]
    fn cursor_starts_on_first_option_and_toggles_it_off() {
        let mut sidebar = sidebar_for(&oak_store());
        let action = press(&mut sidebar, KeyCode::Char(' '));
        match action {
            Some(Action::SetOption {
                category,
                option,
                selected,
            }) => {
                assert_eq!(category, "essence");
                assert_eq!(option, "oak");
                assert!(!selected);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cursor_skips_headings_between_categories() {
        let mut sidebar = sidebar_for(&oak_store());
        for _ in 0..5 {
            press(&mut sidebar, KeyCode::Down);
        }
        assert_eq!(sidebar.current(), Some(("type", "plank")));
        press(&mut sidebar, KeyCode::Up);
        assert_eq!(sidebar.current(), Some(("essence", "ash")));

        press(&mut sidebar, KeyCode::Char('G'));
        assert_eq!(sidebar.current(), Some(("cert", "fsc")));
        press(&mut sidebar, KeyCode::Down);
        assert_eq!(sidebar.current(), Some(("cert", "fsc")));
        press(&mut sidebar, KeyCode::Char('g'));
        assert_eq!(sidebar.current(), Some(("essence", "oak")));
    }

    #[test]
    fn toggle_reflects_published_selection() {
        let mut store = oak_store();
        let mut sidebar = sidebar_for(&store);
        press(&mut sidebar, KeyCode::Down);
        let Some(Action::SetOption {
            category,
            option,
            selected,
        }) = press(&mut sidebar, KeyCode::Enter)
        else {
            panic!("expected SetOption");
        };
        assert!(selected);

        store.set_option(&category, &option, selected);
        sidebar
            .update(&Action::ListingUpdated(store.listing()))
            .unwrap();
        let lines = render_lines(32, 30, |f| sidebar.render(f, f.area()));
        assert!(contains(&lines, "[x] Douglas (3)"));
    }

    #[test]
    fn clicking_tout_effacer_clears_filters() {
        let mut sidebar = sidebar_for(&oak_store());
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 20,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        let action = sidebar
            .handle_mouse_event(click, Rect::new(0, 0, 32, 30))
            .unwrap();
        assert!(matches!(action, Some(Action::ClearFilters)));
    }

    #[test]
    fn clicking_an_option_toggles_it() {
        let mut sidebar = sidebar_for(&oak_store());
        // Border, clear line, ESSENCE heading, then Chêne, Douglas.
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        let action = sidebar
            .handle_mouse_event(click, Rect::new(0, 0, 32, 30))
            .unwrap();
        assert!(matches!(
            action,
            Some(Action::SetOption { ref option, selected: true, .. }) if option == "douglas"
        ));
    }

    #[test]
    fn scrolls_to_keep_cursor_visible() {
        let mut sidebar = sidebar_for(&oak_store());
        press(&mut sidebar, KeyCode::Char('G'));
        let lines = render_lines(32, 8, |f| sidebar.render(f, f.area()));
        assert!(contains(&lines, "FSC"));
        assert!(!contains(&lines, "ESSENCE"));
    }
}
