//! Data models for `timetabler`

pub mod offering;
pub mod timetable;

pub use offering::{CourseOffering, Day, Meeting};
pub use timetable::{ScoredResult, Timetable};
