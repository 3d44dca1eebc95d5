//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Workflow actions
    Search,
    NextResult,
    PrevResult,
    SelectResult,
    DeselectSchool,
    FetchTimetable,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Panel {
    #[default]
    Query,
    Results,
    Grade,
    ClassNumber,
    Date,
    Timetable,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Query => Panel::Results,
            Panel::Results => Panel::Grade,
            Panel::Grade => Panel::ClassNumber,
            Panel::ClassNumber => Panel::Date,
            Panel::Date => Panel::Timetable,
            Panel::Timetable => Panel::Query,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Query => Panel::Timetable,
            Panel::Results => Panel::Query,
            Panel::Grade => Panel::Results,
            Panel::ClassNumber => Panel::Grade,
            Panel::Date => Panel::ClassNumber,
            Panel::Timetable => Panel::Date,
        }
    }

    /// Panels whose content is a text input
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Panel::Query | Panel::Grade | Panel::ClassNumber | Panel::Date
        )
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    // Any key closes the help popup
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('s') => Some(UiEvent::Search),
            KeyCode::Char('f') => Some(UiEvent::FetchTimetable),
            KeyCode::Char('x') => Some(UiEvent::DeselectSchool),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Results => Some(UiEvent::SelectResult),
                Panel::Timetable => None,
                _ => Some(UiEvent::StartEditing),
            },
            KeyCode::Up => match active_panel {
                Panel::Results => Some(UiEvent::PrevResult),
                Panel::Timetable => Some(UiEvent::ScrollUp),
                _ => None,
            },
            KeyCode::Down => match active_panel {
                Panel::Results => Some(UiEvent::NextResult),
                Panel::Timetable => Some(UiEvent::ScrollDown),
                _ => None,
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Enter => match active_panel {
                // Enter submits the action tied to the field being edited
                Panel::Query => Some(UiEvent::Search),
                Panel::Grade | Panel::ClassNumber | Panel::Date => {
                    Some(UiEvent::FetchTimetable)
                }
                _ => Some(UiEvent::StopEditing),
            },
            _ => None,
        },
    }
}
