//! Timetable view - pure function from a lesson list to displayable rows
//!
//! Owns no state and performs no I/O, so the rendering contract is testable
//! without a terminal.

use crate::models::LessonEntry;

/// Placeholder shown when a lesson carries no subject text
pub const NO_SUBJECT_PLACEHOLDER: &str = "no information";

/// Fixed message for a query that returned zero lessons
pub const NO_DATA_MESSAGE: &str = "No timetable data for these conditions.";

/// One displayable timetable row
#[derive(Clone, Debug, PartialEq)]
pub struct TimetableRow {
    /// Period label, e.g. "1교시"
    pub period_label: String,
    pub subject: String,
}

/// What the timetable area should show
#[derive(Clone, Debug, PartialEq)]
pub enum TimetableViewState {
    /// No query has completed yet; render nothing
    Hidden,
    /// Query completed with zero lessons; render the fixed no-data message
    Empty,
    /// One row per lesson, ascending by period
    Rows(Vec<TimetableRow>),
}

/// Build the view state for a fetched lesson list.
///
/// Sorts a copy of the input ascending by numeric period. The sort is stable:
/// entries sharing a period keep their original relative order, since the
/// source data defines no secondary key.
pub fn timetable_view(lessons: Option<&[LessonEntry]>) -> TimetableViewState {
    let lessons = match lessons {
        None => return TimetableViewState::Hidden,
        Some(lessons) => lessons,
    };

    if lessons.is_empty() {
        return TimetableViewState::Empty;
    }

    let mut sorted: Vec<&LessonEntry> = lessons.iter().collect();
    sorted.sort_by_key(|entry| entry.period);

    let rows = sorted
        .into_iter()
        .map(|entry| TimetableRow {
            period_label: format!("{}교시", entry.period),
            subject: if entry.subject.trim().is_empty() {
                String::from(NO_SUBJECT_PLACEHOLDER)
            } else {
                entry.subject.clone()
            },
        })
        .collect();

    TimetableViewState::Rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(period: u32, subject: &str) -> LessonEntry {
        LessonEntry {
            period,
            subject: String::from(subject),
        }
    }

    #[test]
    fn test_no_data_renders_nothing() {
        assert_eq!(timetable_view(None), TimetableViewState::Hidden);
    }

    #[test]
    fn test_zero_lessons_renders_no_data_message() {
        assert_eq!(timetable_view(Some(&[])), TimetableViewState::Empty);
    }

    #[test]
    fn test_rows_sorted_by_period() {
        let lessons = [lesson(3, "History"), lesson(1, "Math"), lesson(2, "Art")];
        let state = timetable_view(Some(&lessons));
        let TimetableViewState::Rows(rows) = state else {
            panic!("expected rows");
        };
        let labels: Vec<&str> = rows.iter().map(|r| r.period_label.as_str()).collect();
        assert_eq!(labels, ["1교시", "2교시", "3교시"]);
    }

    #[test]
    fn test_sort_is_numeric_not_lexicographic() {
        let lessons = [lesson(10, "Music"), lesson(2, "Math")];
        let TimetableViewState::Rows(rows) = timetable_view(Some(&lessons)) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].period_label, "2교시");
        assert_eq!(rows[1].period_label, "10교시");
    }

    #[test]
    fn test_sort_preserves_order_of_equal_periods() {
        let lessons = [lesson(2, "first"), lesson(2, "second"), lesson(1, "Math")];
        let TimetableViewState::Rows(rows) = timetable_view(Some(&lessons)) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].subject, "Math");
        assert_eq!(rows[1].subject, "first");
        assert_eq!(rows[2].subject, "second");
    }

    #[test]
    fn test_empty_subject_gets_placeholder() {
        let lessons = [lesson(1, ""), lesson(2, "Math")];
        let TimetableViewState::Rows(rows) = timetable_view(Some(&lessons)) else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].subject, NO_SUBJECT_PLACEHOLDER);
        assert_eq!(rows[1].subject, "Math");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let lessons = vec![lesson(3, "a"), lesson(1, "b")];
        let _ = timetable_view(Some(&lessons));
        assert_eq!(lessons[0].period, 3);
        assert_eq!(lessons[1].period, 1);
    }
}
