//! Conflict checks between course offerings
//!
//! Two offerings conflict when they share a course name, or when any meeting
//! block of one overlaps any meeting block of the other on the same day. The
//! name rule means an offering always conflicts with itself, which is what keeps
//! the same course from being picked twice.

use crate::core::models::CourseOffering;

/// Whether two offerings cannot appear in the same timetable
///
/// Runs in `O(meetings_a * meetings_b)`.
#[must_use]
pub fn conflicts(a: &CourseOffering, b: &CourseOffering) -> bool {
    a.name == b.name
        || a
            .meetings
            .iter()
            .any(|m| b.meetings.iter().any(|n| m.overlaps(n)))
}

/// Whether `candidate` conflicts with any offering in `chosen`
///
/// This is the incremental check used while extending a partial selection: only
/// the pairs involving the new candidate are tested.
pub fn conflicts_with_any<'a, I>(candidate: &CourseOffering, chosen: I) -> bool
where
    I: IntoIterator<Item = &'a CourseOffering>,
{
    chosen.into_iter().any(|existing| conflicts(candidate, existing))
}

/// Positions of the first conflicting pair in `set`, if any
///
/// Pairs are visited in `(i, j)` order with `i < j`, stopping at the first hit.
#[must_use]
pub fn find_conflict(set: &[CourseOffering]) -> Option<(usize, usize)> {
    set.iter().enumerate().find_map(|(j, later)| {
        set[..j]
            .iter()
            .position(|earlier| conflicts(earlier, later))
            .map(|i| (i, j))
    })
}

/// Whether any pair in `set` conflicts
#[must_use]
pub fn set_has_conflict(set: &[CourseOffering]) -> bool {
    find_conflict(set).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Day, Meeting};

    fn offering(name: &str, meetings: &[(Day, u32, u32)]) -> CourseOffering {
        CourseOffering::new(
            name.to_string(),
            meetings
                .iter()
                .map(|&(day, start, end)| Meeting::new(day, start, end))
                .collect(),
            3.0,
        )
    }

    #[test]
    fn test_overlap_on_same_day() {
        let a = offering("Algo", &[(Day::Mon, 9, 11)]);
        let b = offering("Algo2", &[(Day::Mon, 10, 12)]);
        assert!(conflicts(&a, &b));
        assert!(conflicts(&b, &a));
    }

    #[test]
    fn test_back_to_back_does_not_conflict() {
        let a = offering("Algo", &[(Day::Mon, 9, 11)]);
        let c = offering("Algo2", &[(Day::Mon, 11, 12)]);
        assert!(!conflicts(&a, &c));
    }

    #[test]
    fn test_same_name_conflicts_without_overlap() {
        let a = offering("Algo", &[(Day::Mon, 9, 11)]);
        let d = offering("Algo", &[(Day::Tue, 9, 10)]);
        assert!(conflicts(&a, &d));
    }

    #[test]
    fn test_offering_conflicts_with_itself() {
        let a = offering("Algo", &[(Day::Mon, 9, 11)]);
        assert!(conflicts(&a, &a));
    }

    #[test]
    fn test_multi_block_overlap() {
        let lecture_and_lab = offering("Physics", &[(Day::Tue, 9, 11), (Day::Thu, 14, 17)]);
        let afternoon = offering("Chemistry", &[(Day::Thu, 16, 18)]);
        let morning = offering("Biology", &[(Day::Thu, 9, 11)]);

        assert!(conflicts(&lecture_and_lab, &afternoon));
        assert!(!conflicts(&lecture_and_lab, &morning));
    }

    #[test]
    fn test_conflicts_with_any() {
        let chosen = [
            offering("A", &[(Day::Mon, 9, 10)]),
            offering("B", &[(Day::Tue, 9, 10)]),
        ];
        assert!(conflicts_with_any(
            &offering("C", &[(Day::Tue, 9, 11)]),
            &chosen
        ));
        assert!(!conflicts_with_any(
            &offering("C", &[(Day::Wed, 9, 11)]),
            &chosen
        ));
        assert!(!conflicts_with_any(
            &offering("C", &[(Day::Wed, 9, 11)]),
            std::iter::empty()
        ));
    }

    #[test]
    fn test_find_conflict_reports_first_pair() {
        let set = [
            offering("A", &[(Day::Mon, 9, 10)]),
            offering("B", &[(Day::Tue, 9, 10)]),
            offering("C", &[(Day::Tue, 9, 10)]),
            offering("A", &[(Day::Fri, 9, 10)]),
        ];
        assert_eq!(find_conflict(&set), Some((1, 2)));
        assert!(set_has_conflict(&set));
    }

    #[test]
    fn test_empty_and_singleton_sets_have_no_conflict() {
        assert!(!set_has_conflict(&[]));
        assert!(!set_has_conflict(&[offering("A", &[(Day::Mon, 9, 10)])]));
    }
}
