//! # Timetable TUI
//!
//! Terminal client for the NEIS school timetable lookup service: search a
//! school by name, pick one, and fetch the class timetable for a grade,
//! class number, and date.
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod clock;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod view;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{LessonEntry, SchoolCandidate, TimetableQuery};
pub use network::NetworkActor;
pub use view::{timetable_view, TimetableViewState};
