//! Network messages - communication between App and Network layers

use crate::models::{LessonEntry, SchoolCandidate, TimetableQuery};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Search schools by name
    Search { id: u64, query: String },
    /// Fetch the timetable for a selected school
    FetchTimetable { id: u64, query: TimetableQuery },
    /// Shutdown the network actor
    Shutdown,
}

/// How a timetable request failed, per the error taxonomy: transport failures
/// and application-level errors embedded in a 2xx body are surfaced the same
/// way but kept distinct internally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureKind {
    Transport,
    Application,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Search completed; the candidate list preserves API order
    SearchCompleted {
        id: u64,
        schools: Vec<SchoolCandidate>,
    },
    /// Search failed (transport or non-2xx)
    SearchFailed { id: u64, message: String },
    /// Timetable fetch completed; the lesson list may be empty
    TimetableCompleted { id: u64, lessons: Vec<LessonEntry> },
    /// Timetable fetch failed
    TimetableFailed {
        id: u64,
        message: String,
        kind: FailureKind,
    },
}

impl NetworkResponse {
    /// Get the request ID the response belongs to
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::SearchCompleted { id, .. } => *id,
            NetworkResponse::SearchFailed { id, .. } => *id,
            NetworkResponse::TimetableCompleted { id, .. } => *id,
            NetworkResponse::TimetableFailed { id, .. } => *id,
        }
    }
}
