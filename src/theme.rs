//! Theme data model: built-in palettes and resolution from config.
//!
//! All styling is carried as explicit values handed to each draw call; there
//! is no ambient color state.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Directory entries inside a pane.
    pub pane_dir_fg: Color,
    /// File entries inside a pane.
    pub pane_file_fg: Color,
    /// The selected row of the focused pane.
    pub selected_bg: Color,
    pub selected_fg: Color,
    /// The remembered selection in ancestor and preview panes.
    pub trail_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub success_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        pane_dir_fg: Color::Rgb(137, 180, 250),  // #89b4fa (blue)
        pane_file_fg: Color::Rgb(205, 214, 244), // #cdd6f4 (text)
        selected_bg: Color::Rgb(69, 71, 90),     // #45475a (surface1)
        selected_fg: Color::Rgb(249, 226, 175),  // #f9e2af (yellow)
        trail_fg: Color::Rgb(249, 226, 175),     // #f9e2af (yellow)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)
    }
}

/// Light theme — complementary light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        pane_dir_fg: Color::Rgb(30, 102, 245),  // #1e66f5 (blue)
        pane_file_fg: Color::Rgb(76, 79, 105),  // #4c4f69 (text)
        selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        selected_fg: Color::Rgb(223, 142, 29),  // #df8e1d (yellow)
        trail_fg: Color::Rgb(223, 142, 29),     // #df8e1d (yellow)

        status_bg: Color::Rgb(230, 233, 239), // #e6e9ef (mantle)
        status_fg: Color::Rgb(76, 79, 105),

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        dim_fg: Color::Rgb(156, 160, 176),    // #9ca0b0 (overlay0)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(), // "dark" or any unrecognized value
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let overrides = [
        (&custom.pane_dir_fg, &mut theme.pane_dir_fg),
        (&custom.pane_file_fg, &mut theme.pane_file_fg),
        (&custom.selected_bg, &mut theme.selected_bg),
        (&custom.selected_fg, &mut theme.selected_fg),
        (&custom.trail_fg, &mut theme.trail_fg),
        (&custom.status_bg, &mut theme.status_bg),
        (&custom.status_fg, &mut theme.status_fg),
    ];
    for (hex, slot) in overrides {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}
