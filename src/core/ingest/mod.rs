//! Offering ingestion: file parsing and pool filtering
//!
//! These sit outside the search core. They turn tabular offering data into
//! [`CourseOffering`](crate::core::models::CourseOffering) values and narrow
//! them to the pool a student actually wants searched.

pub mod csv_parser;
pub mod filter;

pub use csv_parser::{parse_offerings_csv, parse_offerings_str, OfferingRecord};
pub use filter::PoolFilter;
