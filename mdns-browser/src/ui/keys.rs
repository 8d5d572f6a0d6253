use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use super::app::Focus;

/// What a key press asks for, before knowing which pane has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleFocus,
    ToggleHelp,
    Up,
    Down,
    HalfPageUp,
    HalfPageDown,
    Top,
    Bottom,
    /// Not bound here; handed to the list's own input handling
    Other,
}

pub fn resolve(key: &KeyEvent) -> Command {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char('j') if ctrl => Command::HalfPageDown,
        KeyCode::Char('k') if ctrl => Command::HalfPageUp,
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Tab => Command::ToggleFocus,
        KeyCode::Char('?') => Command::ToggleHelp,
        KeyCode::Char('k') | KeyCode::Up => Command::Up,
        KeyCode::Char('j') | KeyCode::Down => Command::Down,
        KeyCode::PageUp => Command::HalfPageUp,
        KeyCode::PageDown => Command::HalfPageDown,
        KeyCode::Char('g') | KeyCode::Home => Command::Top,
        KeyCode::Char('G') | KeyCode::End => Command::Bottom,
        _ => Command::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: &'static str,
    pub desc: &'static str,
}

const fn binding(key: &'static str, desc: &'static str) -> Binding {
    Binding { key, desc }
}

const QUIT: Binding = binding("q", "quit");
const FOCUS: Binding = binding("tab", "switch focus");
const HELP: Binding = binding("?", "toggle help");
const MOVE_UP: Binding = binding("↑/k", "move up");
const MOVE_DOWN: Binding = binding("↓/j", "move down");
const FILTER: Binding = binding("/", "filter list");
const SCROLL_UP: Binding = binding("↑/k", "scroll up");
const SCROLL_DOWN: Binding = binding("↓/j", "scroll down");
const PAGE_UP: Binding = binding("ctrl+k/pgup", "page up");
const PAGE_DOWN: Binding = binding("ctrl+j/pgdn", "page down");
const TOP: Binding = binding("g", "go to top");
const BOTTOM: Binding = binding("G", "go to bottom");

/// One line of bindings for the focused pane
pub fn short_help(focus: Focus) -> Vec<Binding> {
    match focus {
        Focus::List => vec![QUIT, FOCUS, HELP, MOVE_UP, MOVE_DOWN],
        Focus::Detail => vec![QUIT, FOCUS, HELP, SCROLL_UP, SCROLL_DOWN],
    }
}

/// Grouped bindings for the focused pane, one group per help row
pub fn full_help(focus: Focus) -> Vec<Vec<Binding>> {
    let common = vec![QUIT, FOCUS, HELP];
    match focus {
        Focus::List => vec![common, vec![MOVE_UP, MOVE_DOWN, FILTER]],
        Focus::Detail => vec![
            common,
            vec![SCROLL_UP, SCROLL_DOWN, PAGE_UP, PAGE_DOWN],
            vec![TOP, BOTTOM],
        ],
    }
}
