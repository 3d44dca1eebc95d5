//! Command handlers - business logic for processing UI events
//!
//! The whole workflow state machine lives here:
//! Idle -> Searching -> {SearchError | Searched} -> Selected
//! -> FetchingTimetable -> {TimetableError | TimetableShown}.
//! Error states return to the prior interactive state; nothing is terminal.

use crate::app::AppState;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{FailureKind, NetworkCommand, NetworkResponse};
use crate::models::{SchoolCandidate, TimetableQuery};
use crate::view;

/// Validation message for an empty search query
pub const MSG_EMPTY_QUERY: &str = "Please enter a school name.";

/// Message for a search that returned zero candidates
pub const MSG_NO_RESULTS: &str = "No schools found.";

/// Combined validation message for the timetable form
pub const MSG_MISSING_FIELDS: &str =
    "Select a school and fill in grade, class number, and date.";

/// Validation message for a malformed date
pub const MSG_BAD_DATE: &str = "Date must be 8 digits in YYYYMMDD format.";

/// Shape-only date check; calendar validity is left to the remote API
fn is_well_formed_date(date: &str) -> bool {
    date.len() == 8 && date.chars().all(|c| c.is_ascii_digit())
}

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.is_loading || !self.active_panel.is_input() {
            return;
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.is_loading {
            return;
        }
        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.is_loading {
            return;
        }
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.current_input_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Timetable scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.timetable_scroll = self.timetable_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.timetable_scroll = self.timetable_scroll.saturating_add(1);
    }

    // ========================
    // Result list
    // ========================

    pub fn next_result(&mut self) {
        if !self.search_results.is_empty() {
            self.selected_result = (self.selected_result + 1) % self.search_results.len();
        }
    }

    pub fn prev_result(&mut self) {
        if !self.search_results.is_empty() {
            self.selected_result = self
                .selected_result
                .checked_sub(1)
                .unwrap_or(self.search_results.len() - 1);
        }
    }

    /// Commit the highlighted candidate
    pub fn select_result(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(candidate) = self.search_results.get(self.selected_result).cloned() {
            self.select_school(candidate);
        }
    }

    /// Commit a candidate: the result list and the selection are mutually
    /// exclusive in the visible UI, so selecting clears the list.
    pub fn select_school(&mut self, candidate: SchoolCandidate) {
        self.query = candidate.name.clone();
        self.selected_school = Some(candidate);
        self.search_results.clear();
        self.selected_result = 0;
        self.timetable = None;
        self.timetable_scroll = 0;
        self.error_message.clear();
        self.active_panel = Panel::Grade;
    }

    /// Reset the selection, query text, results, timetable, and error.
    /// Grade, class number, and date persist across a deselect.
    pub fn deselect_school(&mut self) {
        if self.is_loading {
            return;
        }
        self.selected_school = None;
        self.query.clear();
        self.search_results.clear();
        self.selected_result = 0;
        self.timetable = None;
        self.timetable_scroll = 0;
        self.error_message.clear();
        self.active_panel = Panel::Query;
    }

    // ========================
    // Search
    // ========================

    /// Validate the query and start a search. Returns the command to hand to
    /// the network layer, or None when validation failed or a request is
    /// already in flight.
    pub fn prepare_search(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }
        self.stop_editing();

        // Starting a fresh search invalidates everything downstream of it
        self.search_results.clear();
        self.selected_result = 0;
        self.selected_school = None;
        self.timetable = None;
        self.timetable_scroll = 0;

        let trimmed = self.query.trim().to_string();
        if trimmed.is_empty() {
            self.error_message = String::from(MSG_EMPTY_QUERY);
            return None;
        }

        self.error_message.clear();
        self.is_loading = true;
        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::Search {
            id,
            query: trimmed,
        })
    }

    // ========================
    // Timetable fetch
    // ========================

    /// Validate the form and start a timetable fetch. Validation order:
    /// selection, then non-empty fields, then date shape; first failure wins.
    pub fn prepare_fetch(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }
        self.stop_editing();

        let selected = match &self.selected_school {
            Some(school) => school,
            None => {
                self.error_message = String::from(MSG_MISSING_FIELDS);
                return None;
            }
        };

        if self.grade.trim().is_empty()
            || self.class_number.trim().is_empty()
            || self.date.trim().is_empty()
        {
            self.error_message = String::from(MSG_MISSING_FIELDS);
            return None;
        }

        if !is_well_formed_date(&self.date) {
            self.error_message = String::from(MSG_BAD_DATE);
            return None;
        }

        let query = TimetableQuery {
            school_code: selected.school_code.clone(),
            office_code: selected.office_code.clone(),
            school_kind: selected.school_kind.clone(),
            grade: self.grade.clone(),
            class_number: self.class_number.clone(),
            date: self.date.clone(),
        };

        self.error_message.clear();
        self.timetable = None;
        self.timetable_scroll = 0;
        self.is_loading = true;
        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::FetchTimetable { id, query })
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response. Responses whose id is not the latest issued
    /// are stale and discarded in full.
    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            return;
        }
        self.pending_request_id = None;
        self.is_loading = false;

        match response {
            NetworkResponse::SearchCompleted { schools, .. } => {
                self.error_message.clear();
                if schools.is_empty() {
                    self.error_message = String::from(MSG_NO_RESULTS);
                } else {
                    self.search_results = schools;
                    self.selected_result = 0;
                    self.active_panel = Panel::Results;
                }
            }
            NetworkResponse::SearchFailed { message, .. } => {
                self.error_message = format!("School search failed: {}", message);
            }
            NetworkResponse::TimetableCompleted { lessons, .. } => {
                if lessons.is_empty() {
                    // Success with zero rows still shows the no-data state
                    self.error_message = String::from(view::NO_DATA_MESSAGE);
                    self.timetable = Some(Vec::new());
                } else {
                    self.error_message.clear();
                    self.timetable = Some(lessons);
                }
                self.timetable_scroll = 0;
            }
            NetworkResponse::TimetableFailed { message, kind, .. } => {
                // Forced-empty timetable so the UI renders the no-data state
                // rather than nothing
                self.timetable = Some(Vec::new());
                self.timetable_scroll = 0;
                self.error_message = match kind {
                    FailureKind::Application => message,
                    FailureKind::Transport => {
                        format!("Timetable lookup failed: {}", message)
                    }
                };
            }
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::LessonEntry;
    use crate::view::{timetable_view, TimetableViewState};

    fn new_state() -> AppState {
        AppState::new(&FixedClock(String::from("20231128")))
    }

    fn candidate(name: &str, school_code: &str, office_code: &str) -> SchoolCandidate {
        SchoolCandidate {
            name: String::from(name),
            road_address: String::from("12 Oak Street"),
            school_code: String::from(school_code),
            office_code: String::from(office_code),
            school_kind: String::from("초등학교"),
        }
    }

    fn lesson(period: u32, subject: &str) -> LessonEntry {
        LessonEntry {
            period,
            subject: String::from(subject),
        }
    }

    /// Drive the state past a completed search with the given candidates
    fn searched(state: &mut AppState, query: &str, schools: Vec<SchoolCandidate>) {
        state.query = String::from(query);
        let cmd = state.prepare_search().expect("search should start");
        let id = match cmd {
            NetworkCommand::Search { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::SearchCompleted { id, schools });
    }

    #[test]
    fn test_empty_query_never_issues_a_request() {
        let mut state = new_state();
        state.query = String::from("   ");
        assert!(state.prepare_search().is_none());
        assert_eq!(state.error_message, MSG_EMPTY_QUERY);
        assert!(!state.is_loading);

        // Same message every time
        assert!(state.prepare_search().is_none());
        assert_eq!(state.error_message, MSG_EMPTY_QUERY);
    }

    #[test]
    fn test_search_trims_query_and_sets_loading() {
        let mut state = new_state();
        state.query = String::from("  Oak  ");
        let cmd = state.prepare_search().unwrap();
        match cmd {
            NetworkCommand::Search { query, .. } => assert_eq!(query, "Oak"),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(state.is_loading);
        assert!(state.pending_request_id.is_some());

        // Controls are disabled while in flight
        assert!(state.prepare_search().is_none());
    }

    #[test]
    fn test_search_results_keep_api_order() {
        let mut state = new_state();
        let schools = vec![
            candidate("Zeta High", "C3", "O1"),
            candidate("Alpha Middle", "A1", "O1"),
            candidate("Oak Elementary", "B2", "O2"),
        ];
        searched(&mut state, "school", schools.clone());
        assert_eq!(state.search_results, schools);
        assert!(state.error_message.is_empty());
        assert!(!state.is_loading);
    }

    #[test]
    fn test_zero_results_is_a_message_not_a_crash() {
        let mut state = new_state();
        searched(&mut state, "nowhere", Vec::new());
        assert!(state.search_results.is_empty());
        assert_eq!(state.error_message, MSG_NO_RESULTS);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = new_state();
        state.query = String::from("Oak");
        let first = state.prepare_search().unwrap();
        let first_id = match first {
            NetworkCommand::Search { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };

        // A second request goes out before the first response lands
        state.is_loading = false;
        let second = state.prepare_search().unwrap();
        let second_id = match second {
            NetworkCommand::Search { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        assert!(second_id > first_id);

        // The earlier response is stale once superseded
        state.handle_response(NetworkResponse::SearchCompleted {
            id: first_id,
            schools: vec![candidate("Stale School", "S0", "O0")],
        });
        assert!(state.search_results.is_empty());
        assert!(state.is_loading);

        // The latest one wins
        state.handle_response(NetworkResponse::SearchCompleted {
            id: second_id,
            schools: vec![candidate("Oak Elementary", "A1", "O1")],
        });
        assert_eq!(state.search_results.len(), 1);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_search_failure_surfaces_server_message() {
        let mut state = new_state();
        state.query = String::from("Oak");
        let cmd = state.prepare_search().unwrap();
        let id = match cmd {
            NetworkCommand::Search { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::SearchFailed {
            id,
            message: String::from("HTTP 503"),
        });
        assert_eq!(state.error_message, "School search failed: HTTP 503");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_selecting_clears_the_result_list() {
        let mut state = new_state();
        searched(
            &mut state,
            "Oak",
            vec![
                candidate("Oak Elementary", "A1", "O1"),
                candidate("Oak Middle", "A2", "O1"),
            ],
        );
        state.select_result();
        assert!(state.search_results.is_empty());
        let selected = state.selected_school.as_ref().unwrap();
        assert_eq!(selected.school_code, "A1");
        // Selected school name shows in the query input
        assert_eq!(state.query, "Oak Elementary");
    }

    #[test]
    fn test_fetch_without_selection_is_rejected() {
        let mut state = new_state();
        state.grade = String::from("1");
        state.class_number = String::from("3");
        assert!(state.prepare_fetch().is_none());
        assert_eq!(state.error_message, MSG_MISSING_FIELDS);
    }

    #[test]
    fn test_fetch_with_blank_field_is_rejected() {
        let mut state = new_state();
        state.select_school(candidate("Oak Elementary", "A1", "O1"));
        state.grade = String::from("1");
        state.class_number = String::from("  ");
        assert!(state.prepare_fetch().is_none());
        assert_eq!(state.error_message, MSG_MISSING_FIELDS);
    }

    #[test]
    fn test_malformed_date_is_rejected_before_the_network() {
        let mut state = new_state();
        state.select_school(candidate("Oak Elementary", "A1", "O1"));
        state.grade = String::from("1");
        state.class_number = String::from("3");

        for bad in ["2023112", "202311280", "2023112a", "11/28/23"] {
            state.date = String::from(bad);
            assert!(state.prepare_fetch().is_none(), "date {:?} accepted", bad);
            assert_eq!(state.error_message, MSG_BAD_DATE);
        }

        // An impossible calendar date still passes the shape check; the
        // remote API owns calendar validity
        state.date = String::from("20231399");
        assert!(state.prepare_fetch().is_some());
    }

    #[test]
    fn test_fetch_builds_query_from_the_selection() {
        let mut state = new_state();
        state.select_school(candidate("Oak Elementary", "A1", "O1"));
        state.grade = String::from("1");
        state.class_number = String::from("3");
        let cmd = state.prepare_fetch().unwrap();
        match cmd {
            NetworkCommand::FetchTimetable { query, .. } => {
                assert_eq!(query.school_code, "A1");
                assert_eq!(query.office_code, "O1");
                assert_eq!(query.school_kind, "초등학교");
                assert_eq!(query.grade, "1");
                assert_eq!(query.class_number, "3");
                assert_eq!(query.date, "20231128");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(state.is_loading);
    }

    #[test]
    fn test_zero_lessons_renders_empty_not_blank() {
        let mut state = new_state();
        state.select_school(candidate("Oak Elementary", "A1", "O1"));
        state.grade = String::from("1");
        state.class_number = String::from("3");
        let cmd = state.prepare_fetch().unwrap();
        let id = match cmd {
            NetworkCommand::FetchTimetable { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::TimetableCompleted {
            id,
            lessons: Vec::new(),
        });
        assert_eq!(state.timetable, Some(Vec::new()));
        assert_eq!(state.error_message, view::NO_DATA_MESSAGE);
        assert_eq!(
            timetable_view(state.timetable.as_deref()),
            TimetableViewState::Empty
        );
    }

    #[test]
    fn test_application_error_forces_an_empty_timetable() {
        let mut state = new_state();
        state.select_school(candidate("Oak Elementary", "A1", "O1"));
        state.grade = String::from("1");
        state.class_number = String::from("3");
        let cmd = state.prepare_fetch().unwrap();
        let id = match cmd {
            NetworkCommand::FetchTimetable { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::TimetableFailed {
            id,
            message: String::from("unsupported school kind"),
            kind: FailureKind::Application,
        });
        // API-provided message, verbatim
        assert_eq!(state.error_message, "unsupported school kind");
        assert_eq!(state.timetable, Some(Vec::new()));
    }

    #[test]
    fn test_transport_error_is_prefixed() {
        let mut state = new_state();
        state.select_school(candidate("Oak Elementary", "A1", "O1"));
        state.grade = String::from("1");
        state.class_number = String::from("3");
        let cmd = state.prepare_fetch().unwrap();
        let id = match cmd {
            NetworkCommand::FetchTimetable { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::TimetableFailed {
            id,
            message: String::from("HTTP 500"),
            kind: FailureKind::Transport,
        });
        assert_eq!(state.error_message, "Timetable lookup failed: HTTP 500");
        assert_eq!(state.timetable, Some(Vec::new()));
    }

    #[test]
    fn test_deselect_keeps_the_form_fields() {
        let mut state = new_state();
        searched(&mut state, "Oak", vec![candidate("Oak Elementary", "A1", "O1")]);
        state.select_result();
        state.grade = String::from("1");
        state.class_number = String::from("3");
        state.date = String::from("20231128");
        state.timetable = Some(vec![lesson(1, "Math")]);
        state.error_message = String::from("stale error");

        state.deselect_school();

        assert!(state.selected_school.is_none());
        assert!(state.query.is_empty());
        assert!(state.search_results.is_empty());
        assert!(state.timetable.is_none());
        assert!(state.error_message.is_empty());
        // Deliberate asymmetry: the form fields survive
        assert_eq!(state.grade, "1");
        assert_eq!(state.class_number, "3");
        assert_eq!(state.date, "20231128");
    }

    #[test]
    fn test_full_lookup_scenario() {
        let mut state = new_state();

        searched(&mut state, "Oak", vec![candidate("Oak Elementary", "A1", "O1")]);
        assert_eq!(state.search_results.len(), 1);

        state.select_result();
        state.grade = String::from("1");
        state.class_number = String::from("3");
        state.date = String::from("20231128");

        let cmd = state.prepare_fetch().unwrap();
        let id = match cmd {
            NetworkCommand::FetchTimetable { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::TimetableCompleted {
            id,
            lessons: vec![lesson(2, "Math"), lesson(1, "")],
        });

        let TimetableViewState::Rows(rows) = timetable_view(state.timetable.as_deref())
        else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].period_label, "1교시");
        assert_eq!(rows[0].subject, "no information");
        assert_eq!(rows[1].period_label, "2교시");
        assert_eq!(rows[1].subject, "Math");
    }

    #[test]
    fn test_date_is_prefilled_from_the_clock() {
        let state = new_state();
        assert_eq!(state.date, "20231128");
    }
}
