//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{LessonEntry, SchoolCandidate};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Search panel
    pub query: String,
    pub search_results: Vec<SchoolCandidate>,
    pub selected_result: usize,

    // Selection and query form
    pub selected_school: Option<SchoolCandidate>,
    pub grade: String,
    pub class_number: String,
    pub date: String,

    // Timetable
    pub timetable: Option<Vec<LessonEntry>>,
    pub timetable_scroll: u16,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub is_loading: bool,
    pub error_message: String,
    pub show_help: bool,
}
