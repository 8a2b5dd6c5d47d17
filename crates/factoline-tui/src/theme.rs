//! Factoline brand palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const BRAND_BLUE: Color = Color::Rgb(37, 99, 235); // #2563eb
pub const BRAND_LIGHT: Color = Color::Rgb(147, 197, 253); // #93c5fd
pub const EMERALD: Color = Color::Rgb(16, 185, 129); // #10b981
pub const ORANGE: Color = Color::Rgb(249, 115, 22); // #f97316
pub const ERROR_RED: Color = Color::Rgb(239, 68, 68); // #ef4444

// ── Slate scale ───────────────────────────────────────────────────────

pub const SLATE_100: Color = Color::Rgb(241, 245, 249); // #f1f5f9
pub const SLATE_300: Color = Color::Rgb(203, 213, 225); // #cbd5e1
pub const SLATE_400: Color = Color::Rgb(148, 163, 184); // #94a3b8
pub const SLATE_500: Color = Color::Rgb(100, 116, 139); // #64748b
pub const SLATE_800: Color = Color::Rgb(30, 41, 59); // #1e293b
pub const SLATE_900: Color = Color::Rgb(15, 23, 42); // #0f172a

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(SLATE_100).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(BRAND_BLUE)
}

pub fn border_default() -> Style {
    Style::default().fg(SLATE_500)
}

/// Brand word mark in the header.
pub fn brand() -> Style {
    Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD)
}

/// Primary body text.
pub fn text() -> Style {
    Style::default().fg(SLATE_300)
}

/// Secondary labels (spec names, breadcrumb, placeholder).
pub fn muted() -> Style {
    Style::default().fg(SLATE_400)
}

/// Emphasised values (thickness, price, product title).
pub fn value() -> Style {
    Style::default().fg(SLATE_100).add_modifier(Modifier::BOLD)
}

/// Cursor row in lists and the selected card border.
pub fn selected() -> Style {
    Style::default()
        .fg(BRAND_LIGHT)
        .bg(SLATE_800)
        .add_modifier(Modifier::BOLD)
}

/// Stock indicator colour: orange when low, emerald otherwise.
pub fn stock(low: bool) -> Style {
    Style::default().fg(if low { ORANGE } else { EMERALD })
}

/// Drying status badge on product cards.
pub fn badge() -> Style {
    Style::default().fg(SLATE_900).bg(BRAND_LIGHT)
}

/// Cart notification badge.
pub fn notification_badge() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(ORANGE)
        .add_modifier(Modifier::BOLD)
}

/// Call-to-action button ("Ajouter").
pub fn button() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(BRAND_BLUE)
        .add_modifier(Modifier::BOLD)
}

/// Link-like action ("Tout effacer", "Afficher tous les produits").
pub fn link() -> Style {
    Style::default()
        .fg(BRAND_LIGHT)
        .add_modifier(Modifier::UNDERLINED)
}

/// Key hint text (e.g., "q quitter  ? aide").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE_500)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(BRAND_LIGHT).add_modifier(Modifier::BOLD)
}
