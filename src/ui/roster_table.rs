use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use tui_input::Input;

use super::Theme;
use crate::app::AppMode;
use crate::models::{Patron, SaturationBand, format_number};

const COLUMN_HEADERS: [&str; 4] = ["Name", "Body Mass", "Alcohol Saturation Level", "Band"];
const SELECTION_SYMBOL: &str = "▶ ";
const FILTER_PREFIX: &str = "/ ";

/// Everything the roster table needs besides the rows themselves
pub struct RosterRenderContext<'a> {
    pub selected: usize,
    /// Roster size before the name filter
    pub total: usize,
    pub mode: AppMode,
    pub search_input: &'a Input,
    pub theme: &'a Theme,
}

/// One row per patron, background colored by saturation band
fn build_rows<'a>(patrons: &[&Patron], theme: &'a Theme) -> Vec<Row<'a>> {
    patrons
        .iter()
        .map(|patron| {
            let band = SaturationBand::for_level(patron.alcohol_saturation_level);
            Row::new(vec![
                Cell::from(patron.name.clone()),
                Cell::from(format_number(patron.body_mass)),
                Cell::from(format_number(patron.alcohol_saturation_level)),
                Cell::from(band.as_str()),
            ])
            .style(theme.row_text.bg(theme.band_color(band)))
        })
        .collect()
}

/// Render the patron roster with a title line that doubles as the filter input
pub fn render_roster_table(
    frame: &mut Frame,
    area: Rect,
    patrons: &[&Patron],
    ctx: RosterRenderContext,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title / filter + count
            Constraint::Min(1),    // Table
        ])
        .split(area);

    let header_area = chunks[0];
    let table_area = chunks[1];

    let query = ctx.search_input.value();
    let filtering = matches!(ctx.mode, AppMode::Search) || !query.is_empty();

    let count_text = if filtering {
        format!("{}/{} patrons", patrons.len(), ctx.total)
    } else {
        format!("{} patrons", ctx.total)
    };

    let (header_left, header_style) = if filtering {
        (format!("{}{}", FILTER_PREFIX, query), ctx.theme.form_input)
    } else {
        ("Patron Tally".to_string(), ctx.theme.title)
    };

    let header_bg = if matches!(ctx.mode, AppMode::Search) {
        ctx.theme.form_focused_bg
    } else {
        ctx.theme.default_bg
    };

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(count_text.len() as u16),
        ])
        .split(header_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(header_left, header_style)))
            .style(Style::default().bg(header_bg)),
        header_chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(count_text, ctx.theme.table_header))),
        header_chunks[2],
    );

    if patrons.is_empty() {
        let message = if ctx.total == 0 {
            "No patrons yet. Press n to add one."
        } else {
            "No patrons match the filter."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, ctx.theme.empty_roster)),
            table_area,
        );
    } else {
        let header = Row::new(COLUMN_HEADERS).style(ctx.theme.table_header);
        let widths = [
            Constraint::Min(16),    // Name
            Constraint::Length(10), // Body Mass
            Constraint::Length(26), // Alcohol Saturation Level
            Constraint::Length(7),  // Band
        ];
        let table = Table::new(build_rows(patrons, ctx.theme), widths)
            .header(header)
            .style(Style::default().fg(ctx.theme.default_fg).bg(ctx.theme.default_bg))
            .highlight_symbol(SELECTION_SYMBOL)
            .row_highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_spacing(ratatui::widgets::HighlightSpacing::Always);

        let mut table_state = TableState::default();
        table_state.select(Some(ctx.selected.min(patrons.len() - 1)));

        frame.render_stateful_widget(table, table_area, &mut table_state);
    }

    if matches!(ctx.mode, AppMode::Search) {
        let cursor_x =
            header_area.x + FILTER_PREFIX.len() as u16 + ctx.search_input.visual_cursor() as u16;
        frame.set_cursor_position(Position::new(cursor_x, header_area.y));
    }
}
