//! Course timetable recommender
//!
//! Loads a pool of course offerings, enumerates every conflict-free
//! combination of a requested size and presents them through a pluggable
//! scoring strategy. The CLI in `src/cli` is a thin layer over this crate.

pub mod core;
pub mod logger;

pub use self::core::{config, get_version};
