use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::app::AppMode;

const NORMAL_HINTS: &[(&[&str], &str)] = &[
    (&["j", "k"], "move"),
    (&["n"], "new"),
    (&["d"], "delete"),
    (&["u"], "update"),
    (&["i"], "drink id"),
    (&["r"], "record drink"),
    (&["x", "X"], "dismiss"),
    (&["/"], "filter"),
    (&["q"], "quit"),
    (&["?"], "help"),
];

const SEARCH_HINTS: &[(&[&str], &str)] = &[
    (&["↑", "↓"], "move"),
    (&["Enter", "Esc"], "done"),
];

const ADD_PATRON_HINTS: &[(&[&str], &str)] = &[
    (&["Tab"], "switch field"),
    (&["Ctrl-d"], "defaults"),
    (&["Enter"], "add patron"),
    (&["Esc"], "cancel"),
];

const DRINK_ENTRY_HINTS: &[(&[&str], &str)] = &[
    (&["Enter"], "record for selected"),
    (&["Esc"], "done"),
];

const HELP_HINTS: &[(&[&str], &str)] = &[
    (&["ESC"], "press any key to close help"),
];

/// Render keyboard hints bar showing mode-specific shortcuts,
/// with a counter of remote calls still running
pub fn render_keyboard_hints(
    frame: &mut Frame,
    area: Rect,
    mode: AppMode,
    in_flight: usize,
    theme: &Theme,
) {
    let hint_data = match mode {
        AppMode::Normal => NORMAL_HINTS,
        AppMode::Search => SEARCH_HINTS,
        AppMode::AddPatron => ADD_PATRON_HINTS,
        AppMode::DrinkEntry => DRINK_ENTRY_HINTS,
        AppMode::Help => HELP_HINTS,
    };

    let mut hints = Vec::new();

    if in_flight > 0 {
        hints.push(Span::styled(format!("⟳ {} ", in_flight), theme.status_busy));
    }

    for (keys, description) in hint_data {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("/", theme.status_desc.add_modifier(Modifier::DIM)));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }

        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }

    let paragraph =
        Paragraph::new(Line::from(hints)).style(theme.status_desc.bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}
