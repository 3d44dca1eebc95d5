//! App state - pure data structure with no I/O logic
//!
//! This is the single owner of all workflow state: query text, search
//! results, the selected school, form fields, the fetched timetable, the
//! loading flag, and the error message. Every state transition lives in
//! `commands.rs`, so the whole workflow is testable without a terminal.

use crate::clock::Clock;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{LessonEntry, SchoolCandidate};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Search panel
    pub query: String,
    pub search_results: Vec<SchoolCandidate>,
    pub selected_result: usize,

    // Selection and query form
    pub selected_school: Option<SchoolCandidate>,
    pub grade: String,
    pub class_number: String,
    /// 8-digit date, pre-filled with today on startup
    pub date: String,

    // Timetable; None until a fetch completes
    pub timetable: Option<Vec<LessonEntry>>,
    pub timetable_scroll: u16,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub is_loading: bool,
    /// Empty string means no error is shown
    pub error_message: String,
    pub show_help: bool,

    // Request tracking; responses for anything but the pending id are stale
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&crate::clock::SystemClock)
    }
}

impl AppState {
    pub fn new(clock: &dyn Clock) -> Self {
        AppState {
            query: String::new(),
            search_results: Vec::new(),
            selected_result: 0,
            selected_school: None,
            grade: String::new(),
            class_number: String::new(),
            date: clock.today_ymd(),
            timetable: None,
            timetable_scroll: 0,
            active_panel: Panel::Query,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            is_loading: false,
            error_message: String::new(),
            show_help: false,
            next_request_id: 1,
            pending_request_id: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Query => &self.query,
            Panel::Grade => &self.grade,
            Panel::ClassNumber => &self.class_number,
            Panel::Date => &self.date,
            _ => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> &mut String {
        match self.active_panel {
            Panel::Query => &mut self.query,
            Panel::Grade => &mut self.grade,
            Panel::ClassNumber => &mut self.class_number,
            Panel::Date => &mut self.date,
            _ => &mut self.query, // fallback, non-input panels never edit
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            query: self.query.clone(),
            search_results: self.search_results.clone(),
            selected_result: self.selected_result,
            selected_school: self.selected_school.clone(),
            grade: self.grade.clone(),
            class_number: self.class_number.clone(),
            date: self.date.clone(),
            timetable: self.timetable.clone(),
            timetable_scroll: self.timetable_scroll,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            is_loading: self.is_loading,
            error_message: self.error_message.clone(),
            show_help: self.show_help,
        }
    }
}
