use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by one bordered notification
pub const NOTIFICATION_HEIGHT: u16 = 3;

/// Rows taken by the form and drink id panels
pub const INPUT_PANEL_HEIGHT: u16 = 6;

/// Create main application layout
/// Returns [notifications_area, roster_area, input_panels_area, keyboard_hints_area]
pub fn create_main_layout(area: Rect, active_notifications: usize) -> Vec<Rect> {
    let notifications_height = NOTIFICATION_HEIGHT * active_notifications as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notifications_height), // Success/error alerts
            Constraint::Min(3),                       // Roster table
            Constraint::Length(INPUT_PANEL_HEIGHT),   // Add patron + drink id
            Constraint::Length(1),                    // Keyboard hints bar
        ])
        .split(area);

    vec![chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Create centered rectangle for popups/overlays
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
