//! Pool filtering by catalog preferences

use super::OfferingRecord;
use crate::core::models::{CourseOffering, Day};

/// Student preferences that narrow the offering pool before a search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolFilter {
    /// Keep only this department (case-insensitive)
    pub department: Option<String>,
    /// Keep only this year of study
    pub year: Option<u32>,
    /// Drop every offering that meets on one of these days
    pub free_days: Vec<Day>,
}

impl PoolFilter {
    /// Whether a record survives the filter
    ///
    /// Records without a department or year are dropped when the filter asks
    /// for one.
    #[must_use]
    pub fn matches(&self, record: &OfferingRecord) -> bool {
        let department_ok = self.department.as_ref().map_or(true, |wanted| {
            record
                .department
                .as_ref()
                .is_some_and(|dept| dept.trim().eq_ignore_ascii_case(wanted.trim()))
        });
        let year_ok = self.year.map_or(true, |wanted| record.year == Some(wanted));
        let days_ok = !self
            .free_days
            .iter()
            .any(|&day| record.offering.meets_on(day));

        department_ok && year_ok && days_ok
    }

    /// Filter records into a search pool, preserving file order
    #[must_use]
    pub fn apply(&self, records: &[OfferingRecord]) -> Vec<CourseOffering> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .map(|record| record.offering.clone())
            .collect()
    }
}
