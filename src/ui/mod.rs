pub mod help;
pub mod layout;
pub mod notifications;
pub mod patron_form;
pub mod roster_table;
pub mod status;
pub mod theme;

pub use help::render_help_overlay;
pub use layout::{centered_rect, create_main_layout};
pub use notifications::render_notifications;
pub use patron_form::render_input_panels;
pub use roster_table::render_roster_table;
pub use status::render_keyboard_hints;
pub use theme::{BuiltInTheme, Theme, ThemeError};
