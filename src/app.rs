//! Application state and key handling.
//!
//! The UI thread owns [`App`]; places searches and sends run on tokio tasks
//! and report back through [`AppUpdate`] messages.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::ListState;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::error::Result;
use crate::input::{FieldAction, TextField};
use crate::itinerary::{CategorySelection, ItineraryStore};
use crate::places::{
    Place, PlaceSearch, PlacesAggregator, PlacesClient, SearchRequest, SearchSession, SearchTrigger,
};
use crate::services::delivery::{ItinerarySender, Recipient, SimulatedSender};
use crate::services::sharing;
use crate::types::{ActivityId, Category, Day};

/// Results that background tasks hand back to the UI thread
#[derive(Debug)]
pub enum AppUpdate {
    /// A places search finished; `generation` identifies the run it belongs to
    PlacesLoaded {
        /// Generation the [`SearchSession`] assigned when the run started
        generation: u64,
        /// Merged, deduplicated and capped results
        places: Vec<Place>,
    },
    /// The itinerary sender returned
    SendFinished(Result<()>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Top-level screen
pub enum AppMode {
    /// Initial splash screen
    Splash,
    /// Categories, activity entry and the week grid
    Planner,
    /// City picker and place suggestions
    Places,
}

/// Which planner pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerFocus {
    /// Category chips
    Categories,
    /// Activity name input
    Activity,
    /// Activities of the current day
    Week,
}

impl PlannerFocus {
    const fn next(self) -> Self {
        match self {
            Self::Categories => Self::Activity,
            Self::Activity => Self::Week,
            Self::Week => Self::Categories,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Categories => Self::Week,
            Self::Activity => Self::Categories,
            Self::Week => Self::Activity,
        }
    }
}

/// Which places pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesFocus {
    /// City list
    Cities,
    /// Suggestions for the active city
    Places,
}

/// State of the "share your itinerary" dialog
#[derive(Debug, Clone, Default)]
pub struct EmailDialog {
    /// Sender's name, used in the greeting
    pub name: TextField,
    /// Friend's email address
    pub address: TextField,
    /// Whether keys go to `address` rather than `name`
    pub address_focused: bool,
    /// A send is in flight; input is ignored until it finishes
    pub sending: bool,
}

impl EmailDialog {
    fn focused_field(&mut self) -> &mut TextField {
        if self.address_focused { &mut self.address } else { &mut self.name }
    }
}

/// Everything the UI shows, plus the handles for background work
pub struct App {
    /// Screen being shown
    pub mode: AppMode,
    /// Focused pane on the planner screen
    pub planner_focus: PlannerFocus,
    /// Focused pane on the places screen
    pub places_focus: PlacesFocus,
    /// The week being planned
    pub itinerary: ItineraryStore,
    /// Selected categories, in pick order
    pub selection: CategorySelection,
    /// Index into [`Category::all`] of the highlighted chip
    pub category_cursor: usize,
    /// Day that new activities and places are added to
    pub current_day: Day,
    /// Activity name being typed
    pub activity_input: TextField,
    /// Selection within the current day's activities
    pub week_list_state: ListState,
    /// Cities offered in the picker
    pub cities: Vec<String>,
    /// City places are searched in; may be outside `cities` after `:city`
    pub city: String,
    /// Selection within `cities`
    pub city_list_state: ListState,
    /// Places API key; searches are skipped while it is empty
    pub api_key: String,
    /// Loading flag and results of the latest places search
    pub search: SearchSession,
    /// Selection within the places results
    pub place_list_state: ListState,
    /// Open share dialog, if any
    pub email: Option<EmailDialog>,
    /// Text typed after `:`
    pub global_command_buffer: String,
    /// Whether keys go to the `:` command line
    pub is_global_command_mode: bool,
    /// Set once the user asks to quit
    pub should_quit: bool,
    /// Settings loaded at startup
    pub config: Config,
    /// Blocking error modal text
    pub error_message: Option<String>,
    /// Blocking info modal text
    pub status_message: Option<String>,
    /// Whether the help overlay is open
    pub show_help: bool,
    aggregator: PlacesAggregator,
    sender: Arc<dyn ItinerarySender>,
    search_task: Option<JoinHandle<()>>,
    /// Sender side of the update channel, cloned into background tasks
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
}

impl App {
    /// Load the config and wire up the HTTP places client and the simulated sender
    pub fn new() -> Self {
        // Load configuration (fallback to default on error)
        let config = Config::load().unwrap_or_default();

        let search: Arc<dyn PlaceSearch> = Arc::new(PlacesClient::new(&config));
        let sender: Arc<dyn ItinerarySender> = Arc::new(SimulatedSender::new(config.send_delay));
        Self::with_services(config, search, sender)
    }

    /// Build the app around explicit search and delivery backends
    pub fn with_services(
        config: Config,
        search: Arc<dyn PlaceSearch>,
        sender: Arc<dyn ItinerarySender>,
    ) -> Self {
        // Create the async channel
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let mut city_list_state = ListState::default();
        city_list_state.select(config.cities.iter().position(|c| *c == config.city).or(Some(0)));

        Self {
            mode: AppMode::Splash,
            planner_focus: PlannerFocus::Categories,
            places_focus: PlacesFocus::Cities,
            itinerary: ItineraryStore::new(),
            selection: CategorySelection::new(),
            category_cursor: 0,
            current_day: Day::Monday,
            activity_input: TextField::new(),
            week_list_state: ListState::default(),
            cities: config.cities.clone(),
            city: config.city.clone(),
            city_list_state,
            api_key: config.places_api_key.clone(),
            search: SearchSession::new(),
            place_list_state: ListState::default(),
            email: None,
            global_command_buffer: String::new(),
            is_global_command_mode: false,
            should_quit: false,
            config,
            error_message: None,
            status_message: None,
            show_help: false,
            aggregator: PlacesAggregator::new(search),
            sender,
            search_task: None,
            async_task_tx,
            async_task_rx,
        }
    }

    /// Whether the event loop should stop
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Cancel any running search and flag the app to exit
    pub fn quit(&mut self) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        self.should_quit = true;
    }

    /// Whether something the user is waiting on is still running
    pub fn is_loading(&self) -> bool {
        self.email.as_ref().is_some_and(|d| d.sending)
    }

    /// Whether keystrokes currently go into a text field
    fn is_text_entry(&self) -> bool {
        self.email.is_some()
            || (self.mode == AppMode::Planner && self.planner_focus == PlannerFocus::Activity)
    }

    /// Route one key press to whatever currently owns input
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ignore key release events (Windows reports both)
        if key.kind == KeyEventKind::Release {
            return;
        }

        // First, check if help modal is shown
        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::F(1) || key.code == KeyCode::Char('?') {
                self.show_help = false;
            }
            return; // Don't process other keys while help is displayed
        }

        // Check if we need to dismiss an error or status message
        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_message = None;
            }
            return; // Don't process other keys while error is displayed
        }
        if self.status_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.status_message = None;
            }
            return;
        }

        if self.mode == AppMode::Splash {
            self.handle_splash_input(key);
            return;
        }

        if self.is_global_command_mode {
            self.handle_global_command_input(key);
            return;
        }

        if self.email.is_some() {
            self.handle_email_input(key);
            return;
        }

        // Global help shortcut (? or F1)
        if key.code == KeyCode::F(1) || (key.code == KeyCode::Char('?') && !self.is_text_entry()) {
            self.show_help = true;
            return;
        }

        // Check for global shortcuts (outside text entry)
        if key.code == KeyCode::Char(':') && !self.is_text_entry() {
            self.is_global_command_mode = true;
            self.global_command_buffer.clear();
            return;
        }

        // Then handle mode-specific commands
        match self.mode {
            AppMode::Splash => {}
            AppMode::Planner => self.handle_planner_input(key),
            AppMode::Places => self.handle_places_input(key),
        }
    }

    /// Route bracketed paste into whichever field has focus
    pub fn handle_paste(&mut self, text: &str) {
        if self.is_global_command_mode {
            self.global_command_buffer.extend(text.chars().filter(|c| !c.is_control()));
        } else if let Some(dialog) = &mut self.email {
            dialog.focused_field().paste(text);
        } else if self.mode == AppMode::Planner && self.planner_focus == PlannerFocus::Activity {
            self.activity_input.paste(text);
        }
    }

    fn handle_splash_input(&mut self, _key: KeyEvent) {
        // Any key dismisses the splash screen and runs the first search
        self.mode = AppMode::Planner;
        self.refresh_places();
    }

    fn handle_global_command_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.is_global_command_mode = false;
                self.global_command_buffer.clear();
            }
            KeyCode::Enter => {
                self.execute_global_command();
                self.is_global_command_mode = false;
                self.global_command_buffer.clear();
            }
            KeyCode::Backspace => {
                self.global_command_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.global_command_buffer.push(c);
            }
            _ => {}
        }
    }

    /// Run the `:` command in `global_command_buffer` and leave command mode
    pub fn execute_global_command(&mut self) {
        let buffer = self.global_command_buffer.trim().to_string();
        let (command, arg) = buffer
            .split_once(' ')
            .map_or((buffer.as_str(), ""), |(c, a)| (c, a.trim()));

        match command {
            "q" | "quit" => self.quit(),
            "h" | "help" => self.show_help = true,
            "key" => {
                self.api_key = arg.to_string();
                self.status_message = Some(if self.api_key.is_empty() {
                    "API key cleared".to_string()
                } else {
                    "API key updated".to_string()
                });
                self.refresh_places();
            }
            "city" => {
                if arg.is_empty() {
                    self.error_message = Some("Usage: :city <name>".to_string());
                } else {
                    self.select_city(arg);
                }
            }
            "day" => match Day::parse(arg) {
                Some(day) => self.set_day(day),
                None => self.error_message = Some(format!("Unknown day '{arg}'")),
            },
            "today" => self.set_day(Day::today()),
            "places" => self.mode = AppMode::Places,
            "plan" | "planner" => self.mode = AppMode::Planner,
            "reload" | "refresh" => {
                let trigger = self.search.refresh();
                self.apply_trigger(trigger);
            }
            "email" | "send" => self.open_email_dialog(),
            "copy" | "y" => self.copy_itinerary(),
            "export" | "w" => match sharing::export_to_file(&self.itinerary.render_document(), arg) {
                Ok(path) => self.status_message = Some(format!("Exported to {}", path.display())),
                Err(e) => self.error_message = Some(e.to_string()),
            },
            "" => {}
            other => {
                self.error_message = Some(format!("Unknown command ':{other}'"));
            }
        }
    }

    fn copy_itinerary(&mut self) {
        match sharing::copy_to_clipboard(&self.itinerary.render_document()) {
            Ok(()) => self.status_message = Some("Itinerary copied to clipboard".to_string()),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    // --- Planner ---

    fn handle_planner_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.planner_focus = self.planner_focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.planner_focus = self.planner_focus.prev();
                return;
            }
            _ => {}
        }

        match self.planner_focus {
            PlannerFocus::Categories => self.handle_categories_input(key),
            PlannerFocus::Activity => self.handle_activity_input(key),
            PlannerFocus::Week => self.handle_week_input(key),
        }
    }

    fn handle_categories_input(&mut self, key: KeyEvent) {
        let count = Category::all().len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.category_cursor = (self.category_cursor + count - 1) % count;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.category_cursor = (self.category_cursor + 1) % count;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(&category) = Category::all().get(self.category_cursor) {
                    self.toggle_category(category);
                }
            }
            KeyCode::Char(c @ '1'..='8') => {
                let idx = c as usize - '1' as usize;
                if let Some(&category) = Category::all().get(idx) {
                    self.category_cursor = idx;
                    self.toggle_category(category);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.planner_focus = PlannerFocus::Activity,
            KeyCode::Char('p') => self.mode = AppMode::Places,
            KeyCode::Char('e') => self.open_email_dialog(),
            _ => {}
        }
    }

    fn handle_activity_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.set_day(self.current_day.prev());
                return;
            }
            KeyCode::Down => {
                self.set_day(self.current_day.next());
                return;
            }
            _ => {}
        }

        match self.activity_input.handle(key) {
            FieldAction::Submit => {
                let name = self.activity_input.value().to_string();
                if self.add_activity(&name).is_some() {
                    self.activity_input.clear();
                }
            }
            FieldAction::Cancel => {
                self.activity_input.clear();
                self.planner_focus = PlannerFocus::Categories;
            }
            FieldAction::Edited | FieldAction::Ignored => {}
        }
    }

    fn handle_week_input(&mut self, key: KeyEvent) {
        let count = self.itinerary.activities_for_day(self.current_day).len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.set_day(self.current_day.prev()),
            KeyCode::Right | KeyCode::Char('l') => self.set_day(self.current_day.next()),
            KeyCode::Up | KeyCode::Char('k') => {
                match self.week_list_state.selected() {
                    Some(selected) if selected > 0 => self.week_list_state.select(Some(selected - 1)),
                    None if count > 0 => self.week_list_state.select(Some(count - 1)),
                    _ => {}
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                match self.week_list_state.selected() {
                    Some(selected) if selected + 1 < count => self.week_list_state.select(Some(selected + 1)),
                    None if count > 0 => self.week_list_state.select(Some(0)),
                    _ => {}
                }
            }
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                if let Some(id) = self.selected_activity_id() {
                    self.remove_activity(id);
                }
            }
            KeyCode::Char('y') => self.copy_itinerary(),
            KeyCode::Char('p') => self.mode = AppMode::Places,
            KeyCode::Char('e') => self.open_email_dialog(),
            KeyCode::Esc => self.planner_focus = PlannerFocus::Categories,
            _ => {}
        }
    }

    /// Toggle a category and re-run the place search for the new selection
    pub fn toggle_category(&mut self, category: Category) {
        self.selection.toggle(category);
        self.refresh_places();
    }

    /// Add an activity for the current day under the first selected category
    pub fn add_activity(&mut self, name: &str) -> Option<ActivityId> {
        let id = self.itinerary.add_activity(name, self.selection.as_slice(), self.current_day)?;
        let count = self.itinerary.activities_for_day(self.current_day).len();
        self.week_list_state.select(Some(count - 1));
        Some(id)
    }

    /// Remove an activity and keep the week selection in range
    pub fn remove_activity(&mut self, id: ActivityId) {
        if self.itinerary.remove_activity(id).is_none() {
            return;
        }
        let count = self.itinerary.activities_for_day(self.current_day).len();
        let selected = self.week_list_state.selected().map(|s| s.min(count.saturating_sub(1)));
        self.week_list_state.select(if count == 0 { None } else { selected });
    }

    /// Switch the day new activities go to
    pub fn set_day(&mut self, day: Day) {
        if self.current_day != day {
            self.current_day = day;
            let has_any = !self.itinerary.activities_for_day(day).is_empty();
            self.week_list_state.select(has_any.then_some(0));
        }
    }

    fn selected_activity_id(&self) -> Option<ActivityId> {
        let idx = self.week_list_state.selected()?;
        self.itinerary
            .activities_for_day(self.current_day)
            .get(idx)
            .map(|a| a.id)
    }

    // --- Places ---

    fn handle_places_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Planner;
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.places_focus = match self.places_focus {
                    PlacesFocus::Cities => PlacesFocus::Places,
                    PlacesFocus::Places => PlacesFocus::Cities,
                };
                return;
            }
            KeyCode::Char('[') => {
                self.set_day(self.current_day.prev());
                return;
            }
            KeyCode::Char(']') => {
                self.set_day(self.current_day.next());
                return;
            }
            KeyCode::Char('r') => {
                let trigger = self.search.refresh();
                self.apply_trigger(trigger);
                return;
            }
            _ => {}
        }

        match self.places_focus {
            PlacesFocus::Cities => self.handle_city_input(key),
            PlacesFocus::Places => self.handle_place_list_input(key),
        }
    }

    fn handle_city_input(&mut self, key: KeyEvent) {
        let count = self.cities.len();
        let current = self.city_list_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') if current > 0 => {
                self.city_list_state.select(Some(current - 1));
            }
            KeyCode::Down | KeyCode::Char('j') if current + 1 < count => {
                self.city_list_state.select(Some(current + 1));
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                if let Some(city) = self.cities.get(current).cloned() {
                    self.select_city(&city);
                    self.places_focus = PlacesFocus::Places;
                }
            }
            _ => {}
        }
    }

    fn handle_place_list_input(&mut self, key: KeyEvent) {
        let count = self.search.results().map_or(0, <[Place]>::len);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.place_list_state.selected() {
                    self.place_list_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                match self.place_list_state.selected() {
                    Some(selected) if selected + 1 < count => self.place_list_state.select(Some(selected + 1)),
                    None if count > 0 => self.place_list_state.select(Some(0)),
                    _ => {}
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.places_focus = PlacesFocus::Cities,
            KeyCode::Enter | KeyCode::Char('a') => self.add_selected_place(),
            _ => {}
        }
    }

    /// Copy the highlighted place's name into the itinerary
    fn add_selected_place(&mut self) {
        let Some(name) = self
            .place_list_state
            .selected()
            .and_then(|idx| self.search.results()?.get(idx))
            .map(|p| p.name.clone())
        else {
            return;
        };

        if self.add_activity(&name).is_some() {
            self.status_message = Some(format!("Added '{}' to {}", name, self.current_day));
        }
    }

    /// Pick the city searches run against
    pub fn select_city(&mut self, city: &str) {
        let city = city.trim().to_string();
        let idx = match self.cities.iter().position(|c| c.eq_ignore_ascii_case(&city)) {
            Some(idx) => idx,
            None => {
                self.cities.push(city.clone());
                self.cities.len() - 1
            }
        };
        self.city_list_state.select(Some(idx));
        self.city = self.cities[idx].clone();
        self.refresh_places();
    }

    /// Re-run the place search if categories, city or key changed
    pub fn refresh_places(&mut self) {
        let request = SearchRequest::new(self.selection.as_slice(), &self.city, &self.api_key);
        let trigger = self.search.update(request);
        self.apply_trigger(trigger);
    }

    fn apply_trigger(&mut self, trigger: SearchTrigger) {
        match trigger {
            SearchTrigger::Unchanged => {}
            SearchTrigger::Cleared => {
                self.abort_search();
                self.place_list_state.select(None);
            }
            SearchTrigger::Start(generation) => self.spawn_search(generation),
        }
    }

    fn abort_search(&mut self) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
    }

    fn spawn_search(&mut self, generation: u64) {
        self.abort_search();

        let aggregator = self.aggregator.clone();
        let request = self.search.request().clone();
        let tx_clone = self.async_task_tx.clone();

        tracing::info!(
            "Searching {} place types in '{}' (generation {})",
            request.keywords().len(),
            request.city,
            generation
        );

        // Spawn the async task using tokio::spawn
        self.search_task = Some(tokio::spawn(async move {
            let places = aggregator.run(&request).await;
            // Receiver only goes away on shutdown
            let _ = tx_clone.send(AppUpdate::PlacesLoaded { generation, places }).await;
        }));
    }

    // --- Email ---

    fn open_email_dialog(&mut self) {
        if self.itinerary.is_empty() {
            self.status_message = Some("Add an activity before sending the itinerary".to_string());
            return;
        }
        self.email = Some(EmailDialog::default());
    }

    fn handle_email_input(&mut self, key: KeyEvent) {
        let Some(dialog) = &mut self.email else { return };
        if dialog.sending {
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                dialog.address_focused = !dialog.address_focused;
                return;
            }
            _ => {}
        }

        match dialog.focused_field().handle(key) {
            FieldAction::Cancel => self.email = None,
            FieldAction::Submit if !dialog.address_focused => dialog.address_focused = true,
            FieldAction::Submit => self.send_itinerary(),
            FieldAction::Edited | FieldAction::Ignored => {}
        }
    }

    /// Validate the dialog and hand the document to the sender
    fn send_itinerary(&mut self) {
        let Some(dialog) = &mut self.email else { return };

        let recipient = match Recipient::new(dialog.name.value(), dialog.address.value()) {
            Ok(r) => r,
            Err(e) => {
                self.error_message = Some(e.to_string());
                return;
            }
        };

        dialog.sending = true;
        let document = self.itinerary.render_document();
        let sender = Arc::clone(&self.sender);
        let tx_clone = self.async_task_tx.clone();

        tokio::spawn(async move {
            let result = sender.send(&document, &recipient).await;
            let _ = tx_clone.send(AppUpdate::SendFinished(result)).await;
        });
    }

    // --- Async updates ---

    /// Drain pending messages from async tasks
    pub fn handle_updates(&mut self) {
        loop {
            match self.async_task_rx.try_recv() {
                Ok(update) => self.apply_update(update),
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Apply one async result to the app state
    pub fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::PlacesLoaded { generation, places } => {
                let count = places.len();
                if self.search.complete(generation, places) {
                    self.search_task = None;
                    self.place_list_state.select((count > 0).then_some(0));
                }
            }
            AppUpdate::SendFinished(result) => match result {
                Ok(()) => {
                    tracing::info!("Itinerary sent via {}", self.sender.transport_name());
                    self.email = None;
                    self.status_message = Some("Itinerary sent successfully!".to_string());
                }
                Err(e) => {
                    tracing::error!("Sending itinerary failed: {}", e);
                    if let Some(dialog) = &mut self.email {
                        dialog.sending = false;
                    }
                    self.error_message = Some(format!("Failed to send itinerary: {e}"));
                }
            },
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
