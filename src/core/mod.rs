//! Core module: offering model, search and presentation

pub mod config;
pub mod conflict;
pub mod ingest;
pub mod models;
pub mod recommend;
pub mod report;
pub mod search;
pub mod strategy;

/// Returns the current version of the `timetabler` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
