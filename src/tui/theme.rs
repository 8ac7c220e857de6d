//! Centralized theme and color scheme for the TUI.

use crate::analytics::PriceTrend;
use ratatui::prelude::*;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// Semantic colors of the list surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection_bg: Color,
    /// Emphasized (highlighted) name fragments
    pub highlight: Color,
    /// Cheaper or unchanged prices
    pub cheaper: Color,
    /// Price increases
    pub more_expensive: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            text: Color::White,
            text_muted: Color::Gray,
            selection_bg: Color::Rgb(60, 60, 80),
            highlight: Color::Yellow,
            cheaper: Color::Green,
            more_expensive: Color::Red,
            error: Color::Red,
        }
    }

    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Magenta,
            muted: Color::Gray,
            border: Color::Gray,
            text: Color::Black,
            text_muted: Color::DarkGray,
            selection_bg: Color::Rgb(210, 210, 230),
            highlight: Color::Rgb(180, 90, 0),
            cheaper: Color::Rgb(0, 130, 0),
            more_expensive: Color::Rgb(190, 0, 0),
            error: Color::Red,
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            primary: Color::White,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            text: Color::White,
            text_muted: Color::White,
            selection_bg: Color::Blue,
            highlight: Color::LightYellow,
            cheaper: Color::LightGreen,
            more_expensive: Color::LightRed,
            error: Color::LightRed,
        }
    }

    /// Color of a price change.
    pub const fn trend(&self, trend: PriceTrend) -> Color {
        match trend {
            PriceTrend::MoreExpensive => self.more_expensive,
            PriceTrend::Cheaper => self.cheaper,
        }
    }

    /// Palette for chart series.
    pub const fn chart_palette(&self) -> [Color; 5] {
        [
            self.primary,
            self.accent,
            self.cheaper,
            self.more_expensive,
            Color::Magenta,
        ]
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Theme configuration
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

/// Get the current theme name
pub fn current_theme_name() -> &'static str {
    THEME.read().unwrap_or_else(PoisonError::into_inner).name
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Toggle to the next theme in rotation (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

/// Terminal color for a configured store color (`#rrggbb` or a color name).
pub fn store_color(color: &str) -> Color {
    if color.is_empty() {
        return colors().text_muted;
    }
    Color::from_str(color).unwrap_or_else(|_| colors().text_muted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_rotation() {
        assert_eq!(Theme::dark().next().name, "light");
        assert_eq!(Theme::light().next().name, "high-contrast");
        assert_eq!(Theme::high_contrast().next().name, "dark");
        assert_eq!(Theme::from_name("HC").name, "high-contrast");
        assert_eq!(Theme::from_name("unknown").name, "dark");
    }

    #[test]
    fn test_store_color_parsing() {
        assert_eq!(store_color("yellow"), Color::Yellow);
        assert_eq!(store_color("#ff0000"), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn test_trend_colors() {
        let scheme = ColorScheme::dark();
        assert_eq!(scheme.trend(PriceTrend::Cheaper), Color::Green);
        assert_eq!(scheme.trend(PriceTrend::MoreExpensive), Color::Red);
    }
}
