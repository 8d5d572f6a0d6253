use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shared::types::ServiceRecord;
use crate::collection::ServiceCollection;
use super::detail::detail_lines;
use super::keys::{self, Command};
use super::layout::PaneLayout;
use super::text::truncate;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rows one list entry takes: title and subtitle
pub const LIST_ITEM_HEIGHT: usize = 2;

/// Rows of the list pane not used by entries: border, title and status lines
const LIST_CHROME_HEIGHT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Quitting,
}

/// Everything the display reacts to, merged into one queue
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Tick,
    Arrival(ServiceRecord),
    IngestionClosed,
    Cancelled,
}

/// One projected list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Default)]
struct Filter {
    text: String,
    editing: bool,
}

/// Display state: the service collection plus list, detail and focus state.
/// Only ever driven from the UI task, one event at a time.
#[derive(Debug)]
pub struct App {
    title: String,
    services: ServiceCollection,
    layout: PaneLayout,
    state: RunState,
    focus: Focus,
    /// Index into the visible (filtered) rows
    selected: usize,
    filter: Filter,
    /// Collection index of the record in the detail pane
    detail: Option<usize>,
    detail_scroll: usize,
    searching: bool,
    spinner_frame: usize,
    show_full_help: bool,
}

impl App {
    pub fn new(title: impl Into<String>, show_full_help: bool) -> Self {
        Self {
            title: title.into(),
            services: ServiceCollection::new(),
            layout: PaneLayout::default(),
            state: RunState::Running,
            focus: Focus::List,
            selected: 0,
            filter: Filter::default(),
            detail: None,
            detail_scroll: 0,
            searching: true,
            spinner_frame: 0,
            show_full_help,
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        if self.state == RunState::Quitting {
            return;
        }

        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Resize { width, height } => self.on_resize(width, height),
            AppEvent::Tick => {
                if self.searching {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                }
            }
            AppEvent::Arrival(record) => self.on_arrival(record),
            AppEvent::IngestionClosed => {
                tracing::info!("Discovery stream closed with {} services", self.services.len());
                self.searching = false;
            }
            AppEvent::Cancelled => self.state = RunState::Quitting,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let command = keys::resolve(&key);
        if command == Command::Quit {
            self.state = RunState::Quitting;
            return;
        }

        if self.focus == Focus::List && self.filter.editing && self.edit_filter(&key) {
            return;
        }

        match command {
            Command::Quit => self.state = RunState::Quitting,
            Command::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::List => Focus::Detail,
                    Focus::Detail => Focus::List,
                };
            }
            Command::ToggleHelp => self.show_full_help = !self.show_full_help,
            Command::Other => {
                if self.focus == Focus::List {
                    self.list_input(&key);
                }
            }
            nav => match self.focus {
                Focus::List => self.move_selection(nav),
                Focus::Detail => self.scroll_detail(nav),
            },
        }
    }

    /// Keys typed into the open filter prompt. Returns false for keys the
    /// prompt does not consume.
    fn edit_filter(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.text.push(c);
                self.filter_changed();
            }
            KeyCode::Backspace => {
                self.filter.text.pop();
                self.filter_changed();
            }
            KeyCode::Enter => self.filter.editing = false,
            KeyCode::Esc => self.clear_filter(),
            _ => return false,
        }
        true
    }

    /// Keys the list handles itself when nothing else is bound to them
    fn list_input(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('/') => self.filter.editing = true,
            KeyCode::Esc if !self.filter.text.is_empty() => self.clear_filter(),
            _ => {}
        }
    }

    fn clear_filter(&mut self) {
        self.filter = Filter::default();
        self.filter_changed();
    }

    fn filter_changed(&mut self) {
        self.selected = 0;
        self.sync_detail();
    }

    fn move_selection(&mut self, command: Command) {
        let count = self.visible().len();
        if count == 0 {
            return;
        }

        let last = count - 1;
        let page = self.list_page_len();
        let next = match command {
            Command::Up => self.selected.saturating_sub(1),
            Command::Down => (self.selected + 1).min(last),
            Command::HalfPageUp => self.selected.saturating_sub(page),
            Command::HalfPageDown => (self.selected + page).min(last),
            Command::Top => 0,
            Command::Bottom => last,
            _ => self.selected,
        };

        if next != self.selected {
            self.selected = next;
            self.sync_detail();
        }
    }

    fn scroll_detail(&mut self, command: Command) {
        let max = self.max_detail_scroll();
        let half = (self.layout.detail_rows() / 2).max(1);
        self.detail_scroll = match command {
            Command::Up => self.detail_scroll.saturating_sub(1),
            Command::Down => self.detail_scroll + 1,
            Command::HalfPageUp => self.detail_scroll.saturating_sub(half),
            Command::HalfPageDown => self.detail_scroll + half,
            Command::Top => 0,
            Command::Bottom => max,
            _ => self.detail_scroll,
        }
        .min(max);
    }

    /// Point the detail pane at the selected record, back at the top
    fn sync_detail(&mut self) {
        let target = self.visible().get(self.selected).copied();
        if target != self.detail {
            self.detail = target;
            self.detail_scroll = 0;
        }
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.layout = PaneLayout::compute(width, height);
        self.services
            .apply_widths(self.layout.list_width, self.layout.detail_width);
        self.detail_scroll = self.detail_scroll.min(self.max_detail_scroll());
    }

    fn on_arrival(&mut self, mut record: ServiceRecord) {
        record.list_width = self.layout.list_width;
        record.detail_width = self.layout.detail_width;

        let was_empty = self.services.is_empty();
        if !self.services.insert(record) {
            return;
        }

        if was_empty {
            self.detail = Some(0);
            self.detail_scroll = 0;
        } else if self.detail.is_none() {
            self.sync_detail();
        }
    }

    /// Collection indices of the rows currently shown, in first-seen order
    pub fn visible(&self) -> Vec<usize> {
        let needle = self.filter.text.to_lowercase();
        self.services
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                needle.is_empty() || record.display_name().to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn list_rows(&self) -> Vec<ListRow> {
        self.visible()
            .into_iter()
            .filter_map(|i| self.services.get(i))
            .map(|record| ListRow {
                title: truncate(record.display_name(), record.list_width),
                subtitle: truncate(&record.host, record.list_width),
            })
            .collect()
    }

    /// Wrapped `(gutter, text)` lines of the record in the detail pane
    pub fn detail_lines(&self) -> Option<Vec<(String, String)>> {
        self.detail
            .and_then(|i| self.services.get(i))
            .map(detail_lines)
    }

    fn max_detail_scroll(&self) -> usize {
        let lines = self.detail_lines().map_or(0, |lines| lines.len());
        lines.saturating_sub(self.layout.detail_rows())
    }

    fn list_page_len(&self) -> usize {
        (self.layout.total_height.saturating_sub(LIST_CHROME_HEIGHT) / LIST_ITEM_HEIGHT).max(1)
    }

    pub fn is_quitting(&self) -> bool {
        self.state == RunState::Quitting
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn spinner(&self) -> Option<&'static str> {
        self.searching.then(|| SPINNER_FRAMES[self.spinner_frame])
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn layout(&self) -> PaneLayout {
        self.layout
    }

    pub fn services(&self) -> &ServiceCollection {
        &self.services
    }

    /// Selected position among the visible rows
    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.visible().len()).then_some(self.selected)
    }

    pub fn detail_scroll(&self) -> usize {
        self.detail_scroll
    }

    pub fn filter_text(&self) -> &str {
        &self.filter.text
    }

    pub fn is_filtering(&self) -> bool {
        self.filter.editing
    }

    pub fn show_full_help(&self) -> bool {
        self.show_full_help
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new("Found Services", true);
        app.handle(AppEvent::Resize { width: 124, height: 40 });
        app
    }

    fn record(name: &str) -> ServiceRecord {
        ServiceRecord {
            name: name.to_string(),
            host: format!("{}.local.", name.to_lowercase()),
            ..Default::default()
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn arrive(app: &mut App, name: &str) {
        app.handle(AppEvent::Arrival(record(name)));
    }

    fn detail_name(app: &App) -> Option<String> {
        app.detail.and_then(|i| app.services.get(i)).map(|r| r.name.clone())
    }

    fn names(app: &App) -> Vec<String> {
        app.services.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_quit_key_stops_processing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.is_quitting());

        arrive(&mut app, "Late");
        assert!(app.services().is_empty());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle(AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.is_quitting());
    }

    #[test]
    fn test_cancellation_quits() {
        let mut app = app();
        app.handle(AppEvent::Cancelled);
        assert!(app.is_quitting());
    }

    #[test]
    fn test_tab_toggles_focus_only() {
        let mut app = app();
        arrive(&mut app, "A");
        arrive(&mut app, "B");
        press(&mut app, KeyCode::Down);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Detail);
        assert_eq!(app.selected(), Some(1));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::List);
        assert_eq!(app.selected(), Some(1));
    }

    #[test]
    fn test_first_arrival_seeds_detail() {
        let mut app = app();
        assert!(app.detail_lines().is_none());

        arrive(&mut app, "Printer");
        assert_eq!(detail_name(&app).as_deref(), Some("Printer"));

        arrive(&mut app, "Scanner");
        assert_eq!(detail_name(&app).as_deref(), Some("Printer"));
    }

    #[test]
    fn test_duplicate_arrival_is_dropped() {
        let mut app = app();
        arrive(&mut app, "Printer");
        arrive(&mut app, "printer");
        assert_eq!(names(&app), vec!["Printer"]);
    }

    #[test]
    fn test_arrivals_keep_order_across_ui_events() {
        let mut app = app();
        arrive(&mut app, "A");
        press(&mut app, KeyCode::Down);
        app.handle(AppEvent::Tick);
        arrive(&mut app, "B");
        app.handle(AppEvent::Resize { width: 80, height: 24 });
        press(&mut app, KeyCode::Tab);
        arrive(&mut app, "C");
        assert_eq!(names(&app), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_list_navigation_resyncs_detail() {
        let mut app = app();
        arrive(&mut app, "A");
        arrive(&mut app, "B");
        arrive(&mut app, "C");
        app.detail_scroll = 3;

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected(), Some(1));
        assert_eq!(detail_name(&app).as_deref(), Some("B"));
        assert_eq!(app.detail_scroll(), 0);

        press(&mut app, KeyCode::Char('G'));
        assert_eq!(detail_name(&app).as_deref(), Some("C"));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected(), Some(2));

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(detail_name(&app).as_deref(), Some("A"));
    }

    #[test]
    fn test_detail_focus_scrolls_without_touching_selection() {
        let mut app = App::new("Found Services", true);
        // 8 detail rows, 20 detail columns
        app.handle(AppEvent::Resize { width: 64, height: 15 });
        let mut long = record("Speaker");
        long.info_fields = (0..20).map(|i| format!("k{}=v", i)).collect();
        app.handle(AppEvent::Arrival(long));
        arrive(&mut app, "Other");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.detail_scroll(), 2);
        assert_eq!(app.selected(), Some(0));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.detail_scroll(), 1);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.detail_scroll(), 5);

        let total = app.detail_lines().unwrap().len();
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.detail_scroll(), total - app.layout().detail_rows());

        press(&mut app, KeyCode::Down);
        assert_eq!(app.detail_scroll(), total - app.layout().detail_rows());

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.detail_scroll(), 0);
        assert_eq!(detail_name(&app).as_deref(), Some("Speaker"));
    }

    #[test]
    fn test_resize_reflows_all_records() {
        let mut app = app();
        arrive(&mut app, "A");
        arrive(&mut app, "B");
        press(&mut app, KeyCode::Down);

        app.handle(AppEvent::Resize { width: 64, height: 20 });
        assert!(app
            .services()
            .iter()
            .all(|r| r.list_width == 40 && r.detail_width == 20));
        assert_eq!(app.selected(), Some(1));
        assert_eq!(app.focus(), Focus::List);
    }

    #[test]
    fn test_repeated_resize_is_stable() {
        let mut app = app();
        arrive(&mut app, "A");
        arrive(&mut app, "B");
        app.handle(AppEvent::Resize { width: 100, height: 30 });
        let first = app.layout();
        app.handle(AppEvent::Resize { width: 100, height: 30 });

        assert_eq!(app.layout(), first);
        assert_eq!(names(&app), vec!["A", "B"]);
    }

    #[test]
    fn test_arrivals_take_current_widths() {
        let mut app = app();
        arrive(&mut app, "Early");
        app.handle(AppEvent::Resize { width: 34, height: 20 });
        arrive(&mut app, "Late");

        for record in app.services().iter() {
            assert_eq!(record.list_width, 20);
            assert_eq!(record.detail_width, 10);
        }
    }

    #[test]
    fn test_list_rows_truncate_to_budget() {
        let mut app = app();
        app.handle(AppEvent::Resize { width: 28, height: 20 });
        arrive(&mut app, "Living Room Speaker");
        let mut unnamed = record("");
        unnamed.host = "mystery.local.".to_string();
        app.handle(AppEvent::Arrival(unnamed));

        // list budget 16, minus row padding leaves 6 columns
        assert_eq!(
            app.list_rows(),
            vec![
                ListRow { title: "Liv...".to_string(), subtitle: "liv...".to_string() },
                ListRow { title: "mys...".to_string(), subtitle: "mys...".to_string() },
            ]
        );
    }

    #[test]
    fn test_filter_narrows_visible_rows() {
        let mut app = app();
        arrive(&mut app, "Kitchen Speaker");
        arrive(&mut app, "Office Printer");
        arrive(&mut app, "Bedroom Speaker");

        press(&mut app, KeyCode::Char('/'));
        assert!(app.is_filtering());
        for c in "speak".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.visible(), vec![0, 2]);

        press(&mut app, KeyCode::Enter);
        assert!(!app.is_filtering());
        press(&mut app, KeyCode::Down);
        assert_eq!(detail_name(&app).as_deref(), Some("Bedroom Speaker"));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible(), vec![0, 1, 2]);
        assert_eq!(detail_name(&app).as_deref(), Some("Kitchen Speaker"));
    }

    #[test]
    fn test_filter_prompt_takes_navigation_letters() {
        let mut app = app();
        arrive(&mut app, "Jukebox");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('k'));
        assert!(!app.is_quitting());
        assert_eq!(app.filter_text(), "jk");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filter_text(), "j");
        assert_eq!(app.visible(), vec![0]);
    }

    #[test]
    fn test_quit_key_works_while_filtering() {
        let mut app = app();
        arrive(&mut app, "Quartz");

        press(&mut app, KeyCode::Char('/'));
        assert!(app.is_filtering());
        press(&mut app, KeyCode::Char('q'));

        assert!(app.is_quitting());
        assert_eq!(app.filter_text(), "");
    }

    #[test]
    fn test_ctrl_c_quits_while_filtering() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        app.handle(AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.is_quitting());
    }

    #[test]
    fn test_filter_with_no_match_clears_detail() {
        let mut app = app();
        arrive(&mut app, "Printer");
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('z'));

        assert_eq!(app.selected(), None);
        assert!(app.detail_lines().is_none());

        arrive(&mut app, "Zebra");
        assert_eq!(detail_name(&app).as_deref(), Some("Zebra"));
    }

    #[test]
    fn test_tick_animates_only_while_searching() {
        let mut app = app();
        let first = app.spinner();
        app.handle(AppEvent::Tick);
        assert_ne!(app.spinner(), first);

        app.handle(AppEvent::IngestionClosed);
        assert!(!app.is_searching());
        assert_eq!(app.spinner(), None);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        assert!(app.show_full_help());
        press(&mut app, KeyCode::Char('?'));
        assert!(!app.show_full_help());
    }

    #[test]
    fn test_degenerate_terminal_still_renders() {
        let mut app = App::new("Found Services", true);
        app.handle(AppEvent::Resize { width: 2, height: 2 });
        arrive(&mut app, "Printer");

        assert_eq!(app.list_rows()[0].title, "");
        assert!(!app.detail_lines().unwrap().is_empty());
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('G'));
    }
}
