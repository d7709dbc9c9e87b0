use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_input::Input;

use super::Theme;
use crate::app::{AppMode, FormField, PatronForm};

const LABEL_WIDTH: usize = 11;

fn input_line<'a>(label: &'a str, input: &'a Input, focused: bool, theme: &Theme) -> Line<'a> {
    let value_style = if focused {
        theme.form_input.bg(theme.form_focused_bg)
    } else {
        theme.form_input
    };
    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), theme.form_label),
        Span::styled(input.value(), value_style),
    ])
}

fn panel_block<'a>(title: &'a str, active: bool, theme: &Theme) -> Block<'a> {
    let border = if active {
        theme.selection_indicator
    } else {
        theme.form_hint
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, theme.title))
        .padding(ratatui::widgets::Padding::horizontal(1))
}

/// Render the new patron form and the drink id input side by side
pub fn render_input_panels(
    frame: &mut Frame,
    area: Rect,
    form: &PatronForm,
    drink_input: &Input,
    mode: AppMode,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    // Add patron
    let form_active = matches!(mode, AppMode::AddPatron);
    let hint = match &form.hint {
        Some(hint) => Line::from(Span::styled(hint.as_str(), theme.error_border)),
        None => Line::from(Span::styled("Ctrl-d loads default values", theme.form_hint)),
    };
    let lines = vec![
        input_line(
            "Name",
            &form.name,
            form_active && form.focus == FormField::Name,
            theme,
        ),
        input_line(
            "Body Mass",
            &form.body_mass,
            form_active && form.focus == FormField::BodyMass,
            theme,
        ),
        hint,
    ];
    let form_block = panel_block(" Add Patron ", form_active, theme);
    let form_inner = form_block.inner(chunks[0]);
    frame.render_widget(Paragraph::new(lines).block(form_block), chunks[0]);

    // Drink id
    let drink_active = matches!(mode, AppMode::DrinkEntry);
    let drink_lines = vec![
        input_line("Drink ID", drink_input, drink_active, theme),
        Line::from(Span::styled("r records it for the selected patron", theme.form_hint)),
    ];
    let drink_block = panel_block(" Add Drink ", drink_active, theme);
    let drink_inner = drink_block.inner(chunks[1]);
    frame.render_widget(Paragraph::new(drink_lines).block(drink_block), chunks[1]);

    let cursor = if form_active {
        let (input, row) = match form.focus {
            FormField::Name => (&form.name, 0),
            FormField::BodyMass => (&form.body_mass, 1),
        };
        Some((form_inner, input, row))
    } else if drink_active {
        Some((drink_inner, drink_input, 0))
    } else {
        None
    };

    if let Some((inner, input, row)) = cursor {
        let x = inner.x + LABEL_WIDTH as u16 + input.visual_cursor() as u16;
        frame.set_cursor_position(Position::new(x, inner.y + row));
    }
}
