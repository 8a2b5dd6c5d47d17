//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use factoline_core::Listing;

/// Focusable regions of the page, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    Search,
    Filters,
    Products,
}

impl Pane {
    pub const ALL: [Self; 3] = [Self::Search, Self::Filters, Self::Products];

    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::Filters,
            Self::Filters => Self::Products,
            Self::Products => Self::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Search => Self::Products,
            Self::Filters => Self::Search,
            Self::Products => Self::Filters,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "Recherche",
            Self::Filters => "Filtres",
            Self::Products => "Produits",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    Focus(Pane),

    // ── Storefront requests ───────────────────────────────────────
    /// Replace the search text with the full new value.
    SearchInput(String),
    ClearSearch,
    SetOption {
        category: String,
        option: String,
        selected: bool,
    },
    ClearFilters,
    AddToCart(String),

    // ── Storefront snapshots ──────────────────────────────────────
    ListingUpdated(Arc<Listing>),

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,
    Notify(Notification),
    DismissNotification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycle_visits_every_pane() {
        let mut pane = Pane::Search;
        let mut seen = Vec::new();
        for _ in 0..Pane::ALL.len() {
            seen.push(pane);
            pane = pane.next();
        }
        assert_eq!(seen, Pane::ALL);
        assert_eq!(pane, Pane::Search);
        assert_eq!(Pane::Search.prev(), Pane::Products);
        assert_eq!(Pane::Products.next().prev(), Pane::Products);
    }
}
