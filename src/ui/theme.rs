//! Theme management and ANSI escape sequence generation.
//!
//! Two built-in themes ship with the binary (`mocha`, dark, and `latte`,
//! light, both Catppuccin palettes). Custom themes are loaded from a TOML
//! file named by `theme_file` in the configuration.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! title_fg = "#cba6f7"
//! category_fg = "#89b4fa"
//! item_fg = "#cdd6f4"
//! selected_fg = "#6c7086"
//! quantity_fg = "#f9e2af"
//! dragging_fg = "#1e1e2e"
//! dragging_bg = "#f5c2e7"
//! notice_fg = "#a6e3a1"
//! share_fg = "#94e2d5"
//! ```
//!
//! # Example
//!
//! ```
//! use shoplist::ui::theme::Theme;
//!
//! let theme = Theme::from_name("latte").unwrap();
//! print!("{}Dairy{}", Theme::fg(&theme.colors.category_fg), Theme::reset());
//! ```

use crate::domain::error::{Result, ShoplistError};
use serde::{Deserialize, Serialize};
use std::path::Path;

const MOCHA: &str = r##"
name = "mocha"

[colors]
title_fg = "#cba6f7"
category_fg = "#89b4fa"
item_fg = "#cdd6f4"
selected_fg = "#6c7086"
quantity_fg = "#f9e2af"
dragging_fg = "#1e1e2e"
dragging_bg = "#f5c2e7"
notice_fg = "#a6e3a1"
share_fg = "#94e2d5"
"##;

const LATTE: &str = r##"
name = "latte"

[colors]
title_fg = "#8839ef"
category_fg = "#1e66f5"
item_fg = "#4c4f69"
selected_fg = "#9ca0b0"
quantity_fg = "#df8e1d"
dragging_fg = "#eff1f5"
dragging_bg = "#ea76cb"
notice_fg = "#40a02b"
share_fg = "#179299"
"##;

/// Color scheme for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors for every styled element. An empty string means "terminal default".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub title_fg: String,
    pub category_fg: String,
    pub item_fg: String,
    /// Bought items.
    pub selected_fg: String,
    pub quantity_fg: String,
    /// The node being dragged.
    pub dragging_fg: String,
    pub dragging_bg: String,
    pub notice_fg: String,
    pub share_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`mocha` or `latte`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "mocha" | "catppuccin-mocha" => MOCHA,
            "latte" | "catppuccin-latte" => LATTE,
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| ShoplistError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// Theme that leaves every color to the terminal.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            colors: ThemeColors {
                title_fg: String::new(),
                category_fg: String::new(),
                item_fg: String::new(),
                selected_fg: String::new(),
                quantity_fg: String::new(),
                dragging_fg: String::new(),
                dragging_bg: String::new(),
                notice_fg: String::new(),
                share_fg: String::new(),
            },
        }
    }

    fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    /// ANSI 24-bit foreground escape, or nothing for an empty/invalid color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::hex_to_rgb(hex)
            .map(|(r, g, b)| format!("\u{001b}[38;2;{r};{g};{b}m"))
            .unwrap_or_default()
    }

    /// ANSI 24-bit background escape, or nothing for an empty/invalid color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::hex_to_rgb(hex)
            .map(|(r, g, b)| format!("\u{001b}[48;2;{r};{g};{b}m"))
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn strike() -> &'static str {
        "\u{001b}[9m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `mocha` theme.
    fn default() -> Self {
        Self::from_name("mocha").unwrap_or_else(Self::plain)
    }
}
