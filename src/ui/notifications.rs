use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;
use super::layout::NOTIFICATION_HEIGHT;
use crate::models::{Notification, NotificationKind};

/// Render the success and error alerts stacked at the top of the screen.
/// Each alert names the key that dismisses it.
pub fn render_notifications(
    frame: &mut Frame,
    area: Rect,
    notifications: &[Notification],
    theme: &Theme,
) {
    if notifications.is_empty() || area.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            notifications
                .iter()
                .map(|_| Constraint::Length(NOTIFICATION_HEIGHT)),
        )
        .split(area);

    for (notification, chunk) in notifications.iter().zip(chunks.iter()) {
        let (title, dismiss_key, border, text, bg) = match notification.kind {
            NotificationKind::Success => (
                " ✓ Success ",
                "x",
                theme.success_border,
                theme.success_text,
                theme.success_bg,
            ),
            NotificationKind::Error => (
                " ⚠ Error ",
                "X",
                theme.error_border,
                theme.error_text,
                theme.error_bg,
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
            .title_bottom(Line::from(format!(" {} to dismiss ", dismiss_key)).right_aligned())
            .style(Style::default().bg(bg))
            .padding(ratatui::widgets::Padding::horizontal(1));

        let paragraph = Paragraph::new(notification.message.as_str())
            .block(block)
            .style(text);

        frame.render_widget(paragraph, *chunk);
    }
}
