// UI Styles
// Color schemes and styling for the TUI

use ratatui::style::{Color, Modifier, Style};

use crate::core::app_config::compiled;

/// Application color scheme and styles
pub struct Styles;

impl Styles {
    // === Header / Footer ===

    pub fn header() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn status() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::ITALIC)
    }

    // === List Items ===

    pub fn list_selected() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn list_normal() -> Style {
        Style::default()
    }

    pub fn group_header() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn group_empty() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // === Token Status Colors ===
    // Colors are compiled from config.yaml

    pub fn token_unresolved() -> Style {
        let (r, g, b) = compiled::UNRESOLVED;
        Style::default().fg(Color::Rgb(r, g, b))
    }

    pub fn token_circular() -> Style {
        let (r, g, b) = compiled::CIRCULAR;
        Style::default()
            .fg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD)
    }

    pub fn token_value() -> Style {
        Style::default().fg(Color::Gray)
    }

    // === Inspector ===

    pub fn property() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn variable() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn comment() -> Style {
        Style::default()
            .fg(Color::Rgb(150, 150, 150))
            .add_modifier(Modifier::ITALIC)
    }

    // === Border Styles ===

    pub fn border_focused() -> Style {
        Style::default().fg(Self::accent())
    }

    pub fn border_unfocused() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_focused() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_unfocused() -> Style {
        Style::default().fg(Color::Gray)
    }

    fn accent() -> Color {
        let (r, g, b) = compiled::ACCENT;
        Color::Rgb(r, g, b)
    }
}
