//! Application core: event loop, focus management, action dispatch.
//!
//! The [`App`] owns the [`Storefront`]. Storefront requests arrive as
//! actions, are applied synchronously, and the resulting snapshot is queued
//! as [`Action::ListingUpdated`] in the same drain, so panes always see the
//! new state before the next key is read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use factoline_config::UiConfig;
use factoline_core::{ListingStream, Storefront};

use crate::action::{Action, Notification, NotificationLevel, Pane};
use crate::component::Component;
use crate::components::{Header, ProductGrid, Sidebar};
use crate::event::{Event, EventReader};
use crate::layout::PageLayout;
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    storefront: Storefront,
    stream: ListingStream,
    panes: HashMap<Pane, Box<dyn Component>>,
    focus: Pane,
    running: bool,
    help_visible: bool,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    ui: UiConfig,
}

impl App {
    pub fn new(storefront: Storefront, ui: UiConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let stream = storefront.subscribe();

        let mut panes: HashMap<Pane, Box<dyn Component>> = HashMap::new();
        panes.insert(Pane::Search, Box::new(Header::new()));
        panes.insert(Pane::Filters, Box::new(Sidebar::new()));
        panes.insert(Pane::Products, Box::new(ProductGrid::new(ui.grid_columns)));

        Self {
            storefront,
            stream,
            panes,
            focus: Pane::Products,
            running: true,
            help_visible: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            notification: None,
            ui,
        }
    }

    /// Mount every pane, focus the initial one and hand out the first
    /// snapshot and terminal size.
    fn init_panes(&mut self) -> Result<()> {
        for pane in self.panes.values_mut() {
            pane.init(self.action_tx.clone())?;
        }
        if let Some(pane) = self.panes.get_mut(&self.focus) {
            pane.set_focused(true);
        }
        let (w, h) = self.terminal_size;
        self.action_tx.send(Action::Resize(w, h))?;
        self.action_tx
            .send(Action::ListingUpdated(self.stream.current().clone()))?;
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_panes()?;

        let mut events = EventReader::new(self.ui.tick_rate(), self.ui.render_rate());

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!(
            cart_total = %self.storefront.cart().total(),
            cart_items = self.storefront.cart().notifications(),
            "TUI event loop ended"
        );
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here; the
    /// rest goes to the focused pane. The search pane receives every
    /// printable key.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Tab) => return Ok(Some(Action::FocusNext)),
            (KeyModifiers::SHIFT, KeyCode::BackTab) => return Ok(Some(Action::FocusPrev)),
            _ => {}
        }

        if self.focus != Pane::Search {
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
                (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
                (KeyModifiers::NONE, KeyCode::Char('/')) => {
                    return Ok(Some(Action::Focus(Pane::Search)));
                }
                (KeyModifiers::NONE, KeyCode::Char('c')) => return Ok(Some(Action::ClearFilters)),
                (KeyModifiers::NONE, KeyCode::Esc) if !self.storefront.query().is_empty() => {
                    return Ok(Some(Action::ClearSearch));
                }
                _ => {}
            }
        }

        match self.panes.values_mut().find(|pane| pane.focused()) {
            Some(pane) => pane.handle_key_event(key),
            None => Ok(None),
        }
    }

    /// Clicks focus the pane under the pointer, then the pane handles them.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(None);
        }
        let (w, h) = self.terminal_size;
        let page = PageLayout::from_size(w, h);
        let Some(target) = page.pane_at(mouse.column, mouse.row) else {
            return Ok(None);
        };
        if matches!(mouse.kind, MouseEventKind::Down(_)) && target != self.focus {
            self.action_tx.send(Action::Focus(target))?;
        }
        match self.panes.get_mut(&target) {
            Some(pane) => pane.handle_mouse_event(mouse, page.area(target)),
            None => Ok(None),
        }
    }

    /// Process a single action: apply it, then queue the new snapshot if
    /// the storefront changed.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
                self.broadcast(action)?;
            }

            Action::FocusNext => self.set_focus(self.focus.next()),
            Action::FocusPrev => self.set_focus(self.focus.prev()),
            Action::Focus(pane) => self.set_focus(*pane),

            // ── Storefront requests ───────────────────────────────────
            Action::SearchInput(query) => {
                self.storefront.set_query(query.as_str());
            }

            Action::ClearSearch => {
                self.storefront.clear_query();
            }

            Action::SetOption {
                category,
                option,
                selected,
            } => {
                self.storefront.set_option(category, option, *selected);
            }

            Action::ClearFilters => {
                if !self.storefront.selection().is_empty() {
                    self.storefront.clear_all();
                    self.action_tx
                        .send(Action::Notify(Notification::info("Filtres effacés")))?;
                }
            }

            Action::AddToCart(id) => match self.storefront.add_to_cart(id) {
                Ok(product) => {
                    self.action_tx.send(Action::Notify(Notification::success(format!(
                        "{} ajouté au panier",
                        product.title
                    ))))?;
                }
                Err(e) => {
                    warn!(error = %e, "add to cart failed");
                    self.action_tx
                        .send(Action::Notify(Notification::error(e.to_string())))?;
                }
            },

            // Snapshots go to every pane so they stay in sync
            Action::ListingUpdated(_) => {
                self.broadcast(action)?;
            }

            // ── Overlays ──────────────────────────────────────────────
            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, created)| created.elapsed() > TOAST_TTL)
                {
                    self.action_tx.send(Action::DismissNotification)?;
                }
            }

            Action::Render => {}
        }

        if let Some(listing) = self.stream.take_changed() {
            self.action_tx.send(Action::ListingUpdated(listing))?;
        }
        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for pane in self.panes.values_mut() {
            if let Some(follow_up) = pane.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn set_focus(&mut self, target: Pane) {
        if target == self.focus {
            return;
        }
        if let Some(pane) = self.panes.get_mut(&self.focus) {
            pane.set_focused(false);
        }
        if let Some(pane) = self.panes.get_mut(&target) {
            pane.set_focused(true);
            debug!(pane = pane.id(), "focus changed");
        }
        self.focus = target;
    }

    // ── Rendering ────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let page = PageLayout::new(area);

        for (pane, component) in &self.panes {
            component.render(frame, page.area(*pane));
        }
        self.render_status_bar(frame, page.status);

        // Overlays (last = topmost)
        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Focused pane, active filter count and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let listing = self.stream.current();
        let filters = listing.selection.active_count();
        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.focus.label()), theme::key_hint_key()),
            Span::styled(
                format!(
                    "│ {}/{} produits  {filters} filtre{} ",
                    listing.products.len(),
                    listing.catalog_size,
                    if filters > 1 { "s" } else { "" },
                ),
                theme::muted(),
            ),
            Span::styled(
                "│ Tab panneau  / rechercher  c tout effacer  ? aide  q quitter",
                theme::key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Raccourcis clavier ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
                Span::styled(what, theme::text()),
            ])
        };
        let section = |title: &'static str| {
            Line::from(Span::styled(format!("  {title}"), Style::default().fg(theme::BRAND_LIGHT)))
        };

        let help_text = vec![
            Line::default(),
            section("Navigation"),
            entry("Tab/S-Tab", "Panneau suivant / précédent"),
            entry("h j k l", "Se déplacer (flèches aussi)"),
            entry("g / G", "Début / fin"),
            Line::default(),
            section("Recherche"),
            entry("/", "Saisir une recherche"),
            entry("Ctrl+U", "Effacer la recherche"),
            entry("Esc", "Effacer la recherche (hors saisie)"),
            Line::default(),
            section("Filtres & panier"),
            entry("Espace", "Cocher / décocher un filtre"),
            entry("c", "Tout effacer"),
            entry("Entrée, a", "Ajouter au panier"),
            Line::default(),
            entry("?", "Cette aide"),
            entry("q, Ctrl+C", "Quitter"),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 1);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height).intersection(area);

        let (color, icon) = match notif.level {
            NotificationLevel::Success => (theme::EMERALD, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Info => (theme::BRAND_LIGHT, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(notif.message.as_str(), theme::text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use factoline_core::{Catalog, Decimal, Selection};

    use super::*;
    use crate::test_util::{contains, render_lines};

    const WIDTH: u16 = 160;
    const HEIGHT: u16 = 50;

    fn app() -> App {
        let selection: Selection = [("essence", ["oak"])].into_iter().collect();
        let store = Storefront::with_initial(Catalog::builtin(), "", selection);
        let mut app = App::new(store, UiConfig::default());
        app.terminal_size = (WIDTH, HEIGHT);
        app.init_panes().unwrap();
        drain(&mut app);
        app
    }

    /// Process queued actions until the channel is empty.
    fn drain(app: &mut App) {
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    fn key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(action) = app.handle_key_event(KeyEvent::new(code, modifiers)).unwrap() {
            app.action_tx.send(action).unwrap();
        }
        drain(app);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            key(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn screen(app: &App) -> Vec<String> {
        render_lines(WIDTH, HEIGHT, |f| app.render(f))
    }

    #[test]
    fn first_frame_shows_the_whole_page() {
        let app = app();
        let lines = screen(&app);
        assert!(contains(&lines, "factoline"));
        assert!(contains(&lines, "Affiner la recherche"));
        assert!(contains(&lines, "Tous les produits : Planches de chêne"));
        assert!(contains(&lines, "5 produits professionnels disponibles en stock"));
        assert!(contains(&lines, "Produits │ 5/11 produits  1 filtre"));
    }

    #[test]
    fn typing_in_search_filters_immediately() {
        let mut app = app();
        key(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        assert_eq!(app.focus, Pane::Search);

        // Global letter keys are plain text while the search pane has focus.
        type_text(&mut app, "poutre de chêne");
        type_text(&mut app, "q");
        key(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert!(app.running);
        assert_eq!(app.storefront.query(), "poutre de chêne");
        assert_eq!(app.stream.current().products.len(), 1);

        let lines = screen(&app);
        assert!(contains(&lines, "Résultats pour \"poutre de chêne\""));
        assert!(contains(&lines, "1 produit professionnel disponible en stock"));

        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.focus, Pane::Products);
        key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.storefront.query(), "");
        assert_eq!(app.stream.current().products.len(), 5);
    }

    #[test]
    fn no_match_then_show_all_restores_filtered_catalog() {
        let mut app = app();
        key(&mut app, KeyCode::Char('/'), KeyModifiers::NONE);
        type_text(&mut app, "mélèze");
        key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(contains(&screen(&app), "Aucun résultat trouvé"));

        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.storefront.query(), "");
        assert_eq!(app.stream.current().products.len(), 5);
        assert!(app.storefront.selection().is_selected("essence", "oak"));
    }

    #[test]
    fn add_to_cart_updates_header_and_toasts() {
        let mut app = app();
        key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        key(&mut app, KeyCode::Char('l'), KeyModifiers::NONE);
        key(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);

        let cart = app.storefront.cart();
        assert_eq!(cart.total(), Decimal::from(1450 + 1190));
        assert_eq!(cart.notifications(), 2);

        let (toast, _) = app.notification.clone().unwrap();
        assert_eq!(toast.level, NotificationLevel::Success);
        assert_eq!(toast.message, "Plot de chêne 54mm ajouté au panier");
        assert!(contains(&screen(&app), "Panier 2640 €  2 "));
    }

    #[test]
    fn unknown_product_is_reported_not_fatal() {
        let mut app = app();
        app.action_tx
            .send(Action::AddToCart("999".into()))
            .unwrap();
        drain(&mut app);
        let (toast, _) = app.notification.clone().unwrap();
        assert_eq!(toast.level, NotificationLevel::Error);
        assert_eq!(app.storefront.cart().notifications(), 0);
    }

    #[test]
    fn sidebar_toggle_and_clear_all() {
        let mut app = app();
        key(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Pane::Search);
        key(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Pane::Filters);

        key(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        key(&mut app, KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(app.stream.current().products.len(), 8);

        key(&mut app, KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(app.storefront.selection().is_empty());
        assert_eq!(app.stream.current().products.len(), 11);
        assert_eq!(
            app.notification.as_ref().map(|(n, _)| n.message.as_str()),
            Some("Filtres effacés")
        );
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut app = app();
        key(&mut app, KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(app.help_visible);
        assert!(contains(&screen(&app), "Raccourcis clavier"));

        key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.running);
        key(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.help_visible);

        key(&mut app, KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.running);
    }

    #[test]
    fn expired_toast_is_dismissed_on_tick() {
        let mut app = app();
        app.notification = Some((
            Notification::info("old"),
            Instant::now().checked_sub(Duration::from_secs(10)).unwrap(),
        ));
        app.action_tx.send(Action::Tick).unwrap();
        drain(&mut app);
        assert!(app.notification.is_none());
    }
}
