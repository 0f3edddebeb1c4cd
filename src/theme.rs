//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// The other variant.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Lowercase name, as stored in preferences.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category sidebar --
    pub category_normal: Style,
    pub category_selected: Style,
    pub category_active: Style,

    // -- Cards --
    pub card_title: Style,
    pub card_selected: Style,
    pub card_preview: Style,
    pub card_meta: Style,

    // -- Featured block --
    pub featured_border: Style,
    pub featured_title: Style,
    pub featured_label: Style,

    // -- Detail view --
    pub detail_heading: Style,
    pub detail_body: Style,
    pub detail_metadata: Style,
    pub detail_image: Style,
    pub detail_extra: Style,

    // -- Chrome --
    pub empty_state: Style,
    pub error: Style,
    pub search_input: Style,
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            category_normal: Style::default(),
            category_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            category_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_preview: Style::default().fg(Color::Gray),
            card_meta: Style::default().fg(Color::DarkGray),

            featured_border: Style::default().fg(Color::Yellow),
            featured_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            featured_label: Style::default().fg(Color::Yellow),

            detail_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default(),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_image: Style::default().fg(Color::Blue),
            detail_extra: Style::default().add_modifier(Modifier::ITALIC),

            empty_state: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
            search_input: Style::default().fg(Color::Cyan),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            category_normal: Style::default().fg(Color::Black),
            category_selected: Style::default().bg(Color::Blue).fg(Color::White),
            category_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_preview: Style::default().fg(Color::Black),
            card_meta: Style::default().fg(Color::DarkGray),

            featured_border: Style::default().fg(Color::Magenta),
            featured_title: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            featured_label: Style::default().fg(Color::Magenta),

            detail_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_image: Style::default().fg(Color::Blue),
            detail_extra: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            empty_state: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),
            search_input: Style::default().fg(Color::Blue),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"detail_heading"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 21] = [
    "category_normal",
    "category_selected",
    "category_active",
    "card_title",
    "card_selected",
    "card_preview",
    "card_meta",
    "featured_border",
    "featured_title",
    "featured_label",
    "detail_heading",
    "detail_body",
    "detail_metadata",
    "detail_image",
    "detail_extra",
    "empty_state",
    "error",
    "search_input",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 21] = [
            p.category_normal,
            p.category_selected,
            p.category_active,
            p.card_title,
            p.card_selected,
            p.card_preview,
            p.card_meta,
            p.featured_border,
            p.featured_title,
            p.featured_label,
            p.detail_heading,
            p.detail_body,
            p.detail_metadata,
            p.detail_image,
            p.detail_extra,
            p.empty_state,
            p.error,
            p.search_input,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
