use anyhow::Result;
use ratatui::Frame;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::dispatch::{Completion, Dispatcher, Intent};
use crate::models::{NameFilter, Patron, PatronDefaults, PatronId, format_number};
use crate::tally::{Effect, Tally};
use crate::ui;
use crate::ui::Theme;

/// Application mode determines which keybindings are active
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Roster navigation and row actions
    #[default]
    Normal,
    /// Name filter input (activated with '/')
    Search,
    /// New patron form (activated with 'n')
    AddPatron,
    /// Drink id input (activated with 'i')
    DrinkEntry,
    /// Help overlay (activated with '?')
    Help,
}

/// Field of the new patron form that receives typing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    BodyMass,
}

/// New patron form inputs
#[derive(Debug, Default, Clone)]
pub struct PatronForm {
    pub name: Input,
    pub body_mass: Input,
    pub focus: FormField,
    /// Shown under the form when a submit is refused
    pub hint: Option<String>,
}

impl PatronForm {
    /// Both fields are required (non-empty); nothing else is checked
    pub fn is_complete(&self) -> bool {
        !self.name.value().is_empty() && !self.body_mass.value().is_empty()
    }

    pub fn clear(&mut self) {
        self.name.reset();
        self.body_mass.reset();
        self.focus = FormField::Name;
        self.hint = None;
    }

    pub fn fill(&mut self, defaults: &PatronDefaults) {
        self.name = Input::new(defaults.name.clone());
        self.body_mass = Input::new(format_number(defaults.body_mass));
        self.hint = None;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::BodyMass,
            FormField::BodyMass => FormField::Name,
        };
    }

    fn focused_input(&mut self) -> &mut Input {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::BodyMass => &mut self.body_mass,
        }
    }
}

/// Main application state
pub struct App {
    /// Current interaction mode
    pub mode: AppMode,

    /// Roster and notifications
    pub tally: Tally,

    /// Issues remote calls and collects their completions
    dispatcher: Dispatcher,

    theme: Theme,

    /// Fuzzy name filter
    name_filter: NameFilter,

    /// Name filter query
    pub search_input: Input,

    /// New patron form
    pub form: PatronForm,

    /// Drink id shared by every row; kept after submission
    pub drink_input: Input,

    /// Currently selected index in the visible list
    pub selected_index: usize,

    /// Flag to request application exit
    pub should_quit: bool,

    /// Scroll offset for help modal (0 = top)
    help_scroll: usize,

    /// Maximum scroll value for help modal (updated each frame)
    help_max_scroll: usize,
}

impl App {
    pub fn new(dispatcher: Dispatcher, theme: Theme) -> Self {
        App {
            mode: AppMode::default(),
            tally: Tally::new(),
            dispatcher,
            theme,
            name_filter: NameFilter::new(),
            search_input: Input::default(),
            form: PatronForm::default(),
            drink_input: Input::default(),
            selected_index: 0,
            should_quit: false,
            help_scroll: 0,
            help_max_scroll: 0,
        }
    }

    /// Initial roster load
    pub fn start(&mut self) {
        self.dispatcher.dispatch(Intent::FetchAll);
    }

    /// Apply every completion that has arrived since the last call.
    /// Should be called in the event loop before rendering.
    pub fn poll_completions(&mut self) {
        for completion in self.dispatcher.poll() {
            self.apply_completion(completion);
        }
    }

    /// Apply one completion and carry out its effect
    pub fn apply_completion(&mut self, completion: Completion) {
        match self.tally.apply(completion) {
            Effect::None => {}
            Effect::ClearPatronForm => self.form.clear(),
            Effect::FillPatronForm(defaults) => self.form.fill(&defaults),
            Effect::Dispatch(intent) => self.dispatcher.dispatch(intent),
        }
        self.clamp_selection();
    }

    /// Number of remote calls still running
    pub fn in_flight(&self) -> usize {
        self.dispatcher.in_flight()
    }

    /// Ids of the rows currently shown (roster order, name filter applied)
    pub fn visible_ids(&mut self) -> Vec<PatronId> {
        self.name_filter
            .filter(self.tally.roster.patrons(), self.search_input.value())
    }

    /// Get the patron id at the current selected index
    pub fn selected_patron_id(&mut self) -> Option<PatronId> {
        self.visible_ids().get(self.selected_index).copied()
    }

    fn clamp_selection(&mut self) {
        let visible_count = self.visible_ids().len();
        if visible_count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= visible_count {
            self.selected_index = visible_count - 1;
        }
    }

    /// Submit the new patron form
    pub fn submit_patron_form(&mut self) {
        if !self.form.is_complete() {
            self.form.hint = Some("Name and body mass are required".to_string());
            return;
        }

        self.form.hint = None;
        self.dispatcher.dispatch(Intent::Create {
            name: self.form.name.value().to_string(),
            body_mass_text: self.form.body_mass.value().to_string(),
        });
        self.mode = AppMode::Normal;
    }

    /// Delete the selected patron
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_patron_id() {
            self.dispatcher.dispatch(Intent::Remove(id));
        }
    }

    /// Re-read the selected patron's saturation level
    pub fn refresh_selected(&mut self) {
        if let Some(id) = self.selected_patron_id() {
            self.dispatcher.dispatch(Intent::RefreshSaturation(id));
        }
    }

    /// Record the pending drink id against the selected patron.
    /// The drink id is sent as typed and stays in the input afterwards.
    pub fn record_drink_for_selected(&mut self) {
        if let Some(patron_id) = self.selected_patron_id() {
            self.dispatcher.dispatch(Intent::RecordDrink {
                patron_id,
                drink_id: self.drink_input.value().to_string(),
            });
        }
    }

    /// Ask the service for default patron values
    pub fn load_form_defaults(&mut self) {
        self.dispatcher.dispatch(Intent::LoadDefaults);
    }

    /// Move selection up by n items
    pub fn move_up(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Move selection down by n items
    pub fn move_down(&mut self, n: usize) {
        let visible_count = self.visible_ids().len();
        if visible_count > 0 {
            self.selected_index = (self.selected_index + n).min(visible_count - 1);
        }
    }

    pub fn jump_to_top(&mut self) {
        self.selected_index = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        let visible_count = self.visible_ids().len();
        if visible_count > 0 {
            self.selected_index = visible_count - 1;
        }
    }

    /// Clear the name filter, returning to the full roster
    pub fn clear_search(&mut self) {
        self.search_input.reset();
        self.selected_index = 0;
    }

    pub fn toggle_help(&mut self) {
        if matches!(self.mode, AppMode::Help) {
            self.mode = AppMode::Normal;
        } else {
            self.mode = AppMode::Help;
            self.help_scroll = 0;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle keyboard event based on current mode
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Search => self.handle_search_key(key),
            AppMode::AddPatron => self.handle_form_key(key),
            AppMode::DrinkEntry => self.handle_drink_key(key),
            AppMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_down(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_up(1);
            }
            KeyCode::Home => {
                self.jump_to_top();
            }
            KeyCode::End => {
                self.jump_to_bottom();
            }

            // Row actions
            KeyCode::Char('n') => {
                self.mode = AppMode::AddPatron;
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.delete_selected();
            }
            KeyCode::Char('u') => {
                self.refresh_selected();
            }
            KeyCode::Char('i') => {
                self.mode = AppMode::DrinkEntry;
            }
            KeyCode::Char('r') => {
                self.record_drink_for_selected();
            }

            // Notifications
            KeyCode::Char('x') => {
                self.tally.notifications.dismiss_success();
            }
            KeyCode::Char('X') => {
                self.tally.notifications.dismiss_error();
            }
            KeyCode::Char('c') => {
                self.tally.notifications.dismiss_all();
            }

            KeyCode::Char('/') => {
                self.mode = AppMode::Search;
            }
            KeyCode::Char('?') => {
                self.toggle_help();
            }
            KeyCode::Char('q') => {
                self.quit();
            }
            KeyCode::Esc => {
                // ESC clears the name filter first, then quits
                if !self.search_input.value().is_empty() {
                    self.clear_search();
                } else {
                    self.quit();
                }
            }

            _ => {}
        }
        Ok(())
    }

    /// Handle keys in search mode
    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => {
                self.move_up(1);
            }
            KeyCode::Down => {
                self.move_down(1);
            }
            KeyCode::Esc | KeyCode::Enter => {
                // Keep the query so the filtered rows can be acted on
                self.mode = AppMode::Normal;
            }
            _ => {
                let event = Event::Key(key);
                if self.search_input.handle_event(&event).is_some() {
                    self.selected_index = 0;
                }
            }
        }
        Ok(())
    }

    /// Handle keys in the new patron form
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => {
                self.submit_patron_form();
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.form.toggle_focus();
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.load_form_defaults();
            }
            _ => {
                let event = Event::Key(key);
                if self.form.focused_input().handle_event(&event).is_some() {
                    self.form.hint = None;
                }
            }
        }
        Ok(())
    }

    /// Handle keys in drink id entry
    fn handle_drink_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Enter => {
                self.record_drink_for_selected();
                self.mode = AppMode::Normal;
            }
            _ => {
                let event = Event::Key(key);
                self.drink_input.handle_event(&event);
            }
        }
        Ok(())
    }

    /// Handle keys in help mode
    fn handle_help_key(&mut self, key: KeyEvent) -> Result<()> {
        const HELP_FULL_PAGE: usize = 10;

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.help_scroll < self.help_max_scroll {
                    self.help_scroll += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.help_scroll = self.help_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.help_scroll = (self.help_scroll + HELP_FULL_PAGE).min(self.help_max_scroll);
            }
            KeyCode::PageUp => {
                self.help_scroll = self.help_scroll.saturating_sub(HELP_FULL_PAGE);
            }
            KeyCode::Home => {
                self.help_scroll = 0;
            }
            KeyCode::End => {
                self.help_scroll = self.help_max_scroll;
            }
            _ => {
                self.mode = AppMode::Normal;
            }
        }
        Ok(())
    }

    /// Render the TUI
    pub fn draw(&mut self, frame: &mut Frame) {
        let size = frame.area();

        frame.render_widget(
            ratatui::widgets::Block::default()
                .style(ratatui::prelude::Style::default().bg(self.theme.default_bg)),
            size,
        );

        let notifications = self.tally.notifications.active();

        // Layout: [notifications, roster, panels, keyboard_hints]
        let chunks = ui::create_main_layout(size, notifications.len());

        ui::render_notifications(frame, chunks[0], &notifications, &self.theme);

        let visible_ids = self.visible_ids();
        let visible: Vec<&Patron> = visible_ids
            .iter()
            .filter_map(|&id| self.tally.roster.get(id))
            .collect();

        ui::render_roster_table(
            frame,
            chunks[1],
            &visible,
            ui::roster_table::RosterRenderContext {
                selected: self.selected_index,
                total: self.tally.roster.len(),
                mode: self.mode,
                search_input: &self.search_input,
                theme: &self.theme,
            },
        );

        ui::render_input_panels(
            frame,
            chunks[2],
            &self.form,
            &self.drink_input,
            self.mode,
            &self.theme,
        );

        ui::render_keyboard_hints(frame, chunks[3], self.mode, self.in_flight(), &self.theme);

        if matches!(self.mode, AppMode::Help) {
            (self.help_scroll, self.help_max_scroll) =
                ui::render_help_overlay(frame, size, &self.theme, self.help_scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{CallKind, FakePatronApi};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn patron(id: PatronId, name: &str, level: f64) -> Patron {
        Patron {
            id,
            name: name.to_string(),
            body_mass: 70.0,
            alcohol_saturation_level: level,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    struct Harness {
        _runtime: tokio::runtime::Runtime,
        api: Arc<FakePatronApi>,
        app: App,
    }

    impl Harness {
        fn new(patrons: Vec<Patron>) -> Self {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let api = Arc::new(FakePatronApi::with_patrons(patrons));
            let dispatcher = Dispatcher::new(api.clone(), runtime.handle().clone());
            let mut app = App::new(dispatcher, Theme::default());
            app.start();
            let mut harness = Harness {
                _runtime: runtime,
                api,
                app,
            };
            harness.settle();
            harness
        }

        /// Drive the event loop until nothing is in flight
        fn settle(&mut self) {
            let deadline = Instant::now() + Duration::from_secs(5);
            loop {
                self.app.poll_completions();
                if self.app.in_flight() == 0 {
                    break;
                }
                assert!(Instant::now() < deadline, "remote calls never completed");
                std::thread::sleep(Duration::from_millis(5));
            }
        }
    }

    #[test]
    fn test_startup_loads_roster() {
        let h = Harness::new(vec![patron(1, "John Doe", 0.5), patron(2, "Jane Smith", 0.2)]);
        assert_eq!(h.app.tally.roster.ids(), vec![1, 2]);
    }

    #[test]
    fn test_add_patron_flow_resets_form() {
        let mut h = Harness::new(Vec::new());

        h.app.handle_key(key(KeyCode::Char('n'))).unwrap();
        assert_eq!(h.app.mode, AppMode::AddPatron);
        type_text(&mut h.app, "John Doe");
        h.app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut h.app, "80");
        h.app.handle_key(key(KeyCode::Enter)).unwrap();
        h.settle();

        assert_eq!(h.app.mode, AppMode::Normal);
        assert_eq!(h.app.tally.roster.len(), 1);
        assert_eq!(h.app.tally.roster.patrons()[0].name, "John Doe");
        assert_eq!(h.app.tally.roster.patrons()[0].body_mass, 80.0);
        assert_eq!(
            h.app.tally.notifications.success(),
            Some("Patron added successfully")
        );
        assert_eq!(h.app.form.name.value(), "");
        assert_eq!(h.app.form.body_mass.value(), "");
    }

    #[test]
    fn test_incomplete_form_is_not_submitted() {
        let mut h = Harness::new(Vec::new());

        h.app.handle_key(key(KeyCode::Char('n'))).unwrap();
        type_text(&mut h.app, "John Doe");
        h.app.handle_key(key(KeyCode::Enter)).unwrap();
        h.settle();

        assert_eq!(h.app.mode, AppMode::AddPatron);
        assert!(h.app.form.hint.is_some());
        assert!(!h.api.call_kinds().contains(&CallKind::Create));
    }

    #[test]
    fn test_failed_create_keeps_form_values() {
        let mut h = Harness::new(Vec::new());
        h.api.fail_on(CallKind::Create);

        h.app.handle_key(key(KeyCode::Char('n'))).unwrap();
        type_text(&mut h.app, "John Doe");
        h.app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut h.app, "80");
        h.app.handle_key(key(KeyCode::Enter)).unwrap();
        h.settle();

        assert!(h.app.tally.roster.is_empty());
        assert_eq!(h.app.tally.notifications.error(), Some("Failed to add patron"));
        assert_eq!(h.app.form.name.value(), "John Doe");
    }

    #[test]
    fn test_delete_selected() {
        let mut h = Harness::new(vec![patron(1, "John Doe", 0.5), patron(2, "Jane Smith", 0.2)]);

        h.app.handle_key(key(KeyCode::Char('d'))).unwrap();
        h.settle();

        assert_eq!(h.app.tally.roster.ids(), vec![2]);
        assert_eq!(
            h.app.tally.notifications.success(),
            Some("Patron 1 deleted successfully")
        );
    }

    #[test]
    fn test_selection_clamped_after_delete() {
        let mut h = Harness::new(vec![patron(1, "John Doe", 0.5), patron(2, "Jane Smith", 0.2)]);

        h.app.handle_key(key(KeyCode::End)).unwrap();
        assert_eq!(h.app.selected_index, 1);
        h.app.handle_key(key(KeyCode::Char('d'))).unwrap();
        h.settle();

        assert_eq!(h.app.selected_index, 0);
        assert_eq!(h.app.selected_patron_id(), Some(1));
    }

    #[test]
    fn test_record_drink_keeps_drink_id() {
        let mut h = Harness::new(vec![patron(1, "John Doe", 0.1)]);

        h.app.handle_key(key(KeyCode::Char('i'))).unwrap();
        type_text(&mut h.app, "4");
        h.app.handle_key(key(KeyCode::Enter)).unwrap();
        h.settle();

        assert_eq!(h.app.drink_input.value(), "4");
        assert_eq!(
            h.api.call_kinds(),
            vec![CallKind::List, CallKind::AddDrink, CallKind::Saturation]
        );
        assert_eq!(
            h.app.tally.notifications.success(),
            Some("Saturation level fetched successfully for patron 1")
        );

        // Same drink id again from normal mode
        h.app.handle_key(key(KeyCode::Char('r'))).unwrap();
        h.settle();
        let level = h.app.tally.roster.get(1).unwrap().alcohol_saturation_level;
        assert!((level - (0.1 + 2.0 * FakePatronApi::DRINK_STEP)).abs() < 1e-9);
    }

    #[test]
    fn test_dismiss_notifications_individually() {
        let mut h = Harness::new(vec![patron(1, "John Doe", 0.1)]);
        h.app.tally.notifications.set_success("ok");
        h.app.tally.notifications.set_error("bad");

        h.app.handle_key(key(KeyCode::Char('X'))).unwrap();
        assert_eq!(h.app.tally.notifications.error(), None);
        assert_eq!(h.app.tally.notifications.success(), Some("ok"));

        h.app.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert!(h.app.tally.notifications.is_empty());
    }

    #[test]
    fn test_load_defaults_into_form() {
        let mut h = Harness::new(Vec::new());

        h.app.handle_key(key(KeyCode::Char('n'))).unwrap();
        h.app
            .handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
            .unwrap();
        h.settle();

        assert_eq!(h.app.form.name.value(), "Default Patron");
        assert_eq!(h.app.form.body_mass.value(), "70");
    }

    #[test]
    fn test_search_filters_and_escape_clears() {
        let mut h = Harness::new(vec![patron(1, "John Doe", 0.5), patron(2, "Jane Smith", 0.2)]);

        h.app.handle_key(key(KeyCode::Char('/'))).unwrap();
        type_text(&mut h.app, "smith");
        h.app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(h.app.visible_ids(), vec![2]);
        assert_eq!(h.app.selected_patron_id(), Some(2));

        h.app.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(h.app.visible_ids(), vec![1, 2]);
        assert!(!h.app.should_quit);

        h.app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(h.app.should_quit);
    }
}
