use ratatui::prelude::*;

use crate::models::SaturationBand;

/// Theme errors
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown theme '{0}' (available: mocha, latte)")]
    UnknownTheme(String),
}

/// Built-in themes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltInTheme {
    Mocha,
    Latte,
}

impl BuiltInTheme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "mocha" | "catppuccin-mocha" => Some(BuiltInTheme::Mocha),
            "latte" | "catppuccin-latte" => Some(BuiltInTheme::Latte),
            _ => None,
        }
    }
}

/// Runtime theme with direct field access for all UI elements
#[derive(Debug, Clone)]
pub struct Theme {
    // === Default Colors ===
    pub default_fg: Color,
    pub default_bg: Color,

    // === Roster Table ===
    pub title: Style,
    pub table_header: Style,
    pub row_text: Style,
    pub selection_indicator: Style,
    pub empty_roster: Style,

    // === Saturation Bands (row backgrounds) ===
    pub band_green: Color,
    pub band_yellow: Color,
    pub band_orange: Color,
    pub band_red: Color,

    // === Notifications ===
    pub success_border: Style,
    pub success_text: Style,
    pub success_bg: Color,
    pub error_border: Style,
    pub error_text: Style,
    pub error_bg: Color,

    // === Forms ===
    pub form_label: Style,
    pub form_input: Style,
    pub form_focused_bg: Color,
    pub form_hint: Style,

    // === Status Bar ===
    pub status_key: Style,
    pub status_desc: Style,
    pub status_busy: Style,
    pub status_bar_bg: Color,

    // === Help Modal ===
    pub help_modal_bg: Color,
    pub help_title: Style,
    pub help_header: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub help_footer: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl Theme {
    /// Look up a built-in theme by name
    pub fn load(name: &str) -> Result<Self, ThemeError> {
        match BuiltInTheme::from_name(name) {
            Some(BuiltInTheme::Mocha) => Ok(Self::catppuccin_mocha()),
            Some(BuiltInTheme::Latte) => Ok(Self::catppuccin_latte()),
            None => Err(ThemeError::UnknownTheme(name.to_string())),
        }
    }

    /// Row background for a saturation band
    pub fn band_color(&self, band: SaturationBand) -> Color {
        match band {
            SaturationBand::Green => self.band_green,
            SaturationBand::Yellow => self.band_yellow,
            SaturationBand::Orange => self.band_orange,
            SaturationBand::Red => self.band_red,
        }
    }

    /// Catppuccin Mocha (dark)
    /// https://github.com/catppuccin/catppuccin
    pub fn catppuccin_mocha() -> Self {
        let text = Color::Rgb(205, 214, 244);
        let subtext = Color::Rgb(166, 173, 200);
        let overlay = Color::Rgb(108, 112, 134);
        let surface0 = Color::Rgb(49, 50, 68);
        let surface1 = Color::Rgb(69, 71, 90);
        let mantle = Color::Rgb(24, 24, 37);
        let base = Color::Rgb(30, 30, 46);
        let crust = Color::Rgb(17, 17, 27);
        let blue = Color::Rgb(137, 180, 250);
        let green = Color::Rgb(166, 227, 161);
        let yellow = Color::Rgb(249, 226, 175);
        let peach = Color::Rgb(250, 179, 135);
        let red = Color::Rgb(243, 139, 168);
        let mauve = Color::Rgb(203, 166, 247);

        Theme {
            default_fg: text,
            default_bg: base,

            title: Style::default().fg(mauve).add_modifier(Modifier::BOLD),
            table_header: Style::default().fg(subtext).add_modifier(Modifier::BOLD),
            row_text: Style::default().fg(crust),
            selection_indicator: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            empty_roster: Style::default().fg(overlay).add_modifier(Modifier::ITALIC),

            band_green: green,
            band_yellow: yellow,
            band_orange: peach,
            band_red: red,

            success_border: Style::default().fg(green),
            success_text: Style::default().fg(text),
            success_bg: mantle,
            error_border: Style::default().fg(red),
            error_text: Style::default().fg(text),
            error_bg: mantle,

            form_label: Style::default().fg(subtext),
            form_input: Style::default().fg(yellow),
            form_focused_bg: surface1,
            form_hint: Style::default().fg(overlay),

            status_key: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtext),
            status_busy: Style::default().fg(peach).add_modifier(Modifier::BOLD),
            status_bar_bg: surface0,

            help_modal_bg: mantle,
            help_title: Style::default().fg(mauve).add_modifier(Modifier::BOLD),
            help_header: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(yellow),
            help_desc: Style::default().fg(text),
            help_footer: Style::default().fg(overlay),
        }
    }

    /// Catppuccin Latte (light)
    pub fn catppuccin_latte() -> Self {
        let text = Color::Rgb(76, 79, 105);
        let subtext = Color::Rgb(108, 111, 133);
        let overlay = Color::Rgb(140, 143, 161);
        let surface0 = Color::Rgb(204, 208, 218);
        let surface1 = Color::Rgb(188, 192, 204);
        let mantle = Color::Rgb(230, 233, 239);
        let base = Color::Rgb(239, 241, 245);
        let blue = Color::Rgb(30, 102, 245);
        let green = Color::Rgb(64, 160, 43);
        let yellow = Color::Rgb(223, 142, 29);
        let peach = Color::Rgb(254, 100, 11);
        let red = Color::Rgb(210, 15, 57);
        let mauve = Color::Rgb(136, 57, 239);

        Theme {
            default_fg: text,
            default_bg: base,

            title: Style::default().fg(mauve).add_modifier(Modifier::BOLD),
            table_header: Style::default().fg(subtext).add_modifier(Modifier::BOLD),
            row_text: Style::default().fg(base),
            selection_indicator: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            empty_roster: Style::default().fg(overlay).add_modifier(Modifier::ITALIC),

            band_green: green,
            band_yellow: yellow,
            band_orange: peach,
            band_red: red,

            success_border: Style::default().fg(green),
            success_text: Style::default().fg(text),
            success_bg: mantle,
            error_border: Style::default().fg(red),
            error_text: Style::default().fg(text),
            error_bg: mantle,

            form_label: Style::default().fg(subtext),
            form_input: Style::default().fg(blue),
            form_focused_bg: surface1,
            form_hint: Style::default().fg(overlay),

            status_key: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtext),
            status_busy: Style::default().fg(peach).add_modifier(Modifier::BOLD),
            status_bar_bg: surface0,

            help_modal_bg: mantle,
            help_title: Style::default().fg(mauve).add_modifier(Modifier::BOLD),
            help_header: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(peach),
            help_desc: Style::default().fg(text),
            help_footer: Style::default().fg(overlay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_themes() {
        assert!(Theme::load("mocha").is_ok());
        assert!(Theme::load("Latte").is_ok());
        assert!(matches!(
            Theme::load("solarized"),
            Err(ThemeError::UnknownTheme(name)) if name == "solarized"
        ));
    }

    #[test]
    fn test_band_colors_are_distinct() {
        let theme = Theme::default();
        let colors = [
            theme.band_color(SaturationBand::Green),
            theme.band_color(SaturationBand::Yellow),
            theme.band_color(SaturationBand::Orange),
            theme.band_color(SaturationBand::Red),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
