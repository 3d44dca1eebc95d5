//! Network layer - HTTP request execution against the timetable backend
//!
//! The Network actor receives search and timetable commands and sends back
//! responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
