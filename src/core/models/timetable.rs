//! Timetable and scored result models

use super::CourseOffering;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered selection of mutually compatible course offerings
///
/// Timetables are only built by the search once a selection has passed the
/// conflict checks, and are immutable afterwards. Each one owns copies of its
/// offerings, so the pool it came from can be dropped independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    offerings: Vec<CourseOffering>,
}

impl Timetable {
    /// Build a timetable from pool indices chosen by the search
    ///
    /// # Panics
    /// Panics if an index is out of bounds for `pool`, which would mean the
    /// search produced an invalid selection.
    pub(crate) fn from_indices(pool: &[CourseOffering], indices: &[usize]) -> Self {
        Self {
            offerings: indices.iter().map(|&idx| pool[idx].clone()).collect(),
        }
    }

    /// The offerings in selection order
    #[must_use]
    pub fn offerings(&self) -> &[CourseOffering] {
        &self.offerings
    }

    /// Number of offerings
    #[must_use]
    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    /// Whether the timetable holds no offerings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Iterate over the offerings in selection order
    pub fn iter(&self) -> std::slice::Iter<'_, CourseOffering> {
        self.offerings.iter()
    }

    /// Sum of member credits
    ///
    /// Malformed credits (negative, NaN) propagate into the sum unchanged.
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        self.offerings.iter().map(|o| o.credit).sum()
    }

    /// Course names in selection order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.offerings.iter().map(|o| o.name.as_str()).collect()
    }

    /// Consume the timetable and return its offerings
    #[must_use]
    pub fn into_offerings(self) -> Vec<CourseOffering> {
        self.offerings
    }
}

impl<'a> IntoIterator for &'a Timetable {
    type Item = &'a CourseOffering;
    type IntoIter = std::slice::Iter<'a, CourseOffering>;

    fn into_iter(self) -> Self::IntoIter {
        self.offerings.iter()
    }
}

impl fmt::Display for Timetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for offering in &self.offerings {
            writeln!(f, "- {offering}")?;
        }
        Ok(())
    }
}

/// A timetable together with the score the active strategy gave it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// The timetable
    pub timetable: Timetable,
    /// Strategy-defined score
    pub score: f64,
}

impl ScoredResult {
    /// Pair a timetable with its score
    #[must_use]
    pub const fn new(timetable: Timetable, score: f64) -> Self {
        Self { timetable, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Day, Meeting};

    fn offering(name: &str, credit: f64) -> CourseOffering {
        CourseOffering::new(name.to_string(), vec![Meeting::new(Day::Mon, 9, 10)], credit)
    }

    #[test]
    fn test_from_indices_keeps_selection_order() {
        let pool = vec![offering("A", 3.0), offering("B", 4.0), offering("C", 3.0)];
        let timetable = Timetable::from_indices(&pool, &[2, 0]);

        assert_eq!(timetable.len(), 2);
        assert_eq!(timetable.names(), vec!["C", "A"]);
    }

    #[test]
    fn test_total_credits() {
        let pool = vec![offering("A", 3.0), offering("B", 4.0), offering("C", 3.0)];
        let timetable = Timetable::from_indices(&pool, &[0, 1, 2]);

        assert!((timetable.total_credits() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_credits_propagates_malformed_values() {
        let pool = vec![offering("A", -2.0), offering("B", f64::NAN)];

        let negative = Timetable::from_indices(&pool, &[0]);
        assert!((negative.total_credits() + 2.0).abs() < f64::EPSILON);

        let nan = Timetable::from_indices(&pool, &[0, 1]);
        assert!(nan.total_credits().is_nan());
    }

    #[test]
    fn test_serializes_as_offering_list() {
        let pool = vec![offering("A", 3.0)];
        let timetable = Timetable::from_indices(&pool, &[0]);

        let json = serde_json::to_value(&timetable).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "A");
        assert_eq!(json[0]["meetings"][0]["day"], "Mon");
    }
}
