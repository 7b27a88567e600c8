//! Integration tests for the combination search and its properties

use timetabler::core::conflict::{conflicts, find_conflict, set_has_conflict};
use timetabler::core::models::{CourseOffering, Day, Meeting, Timetable};
use timetabler::core::recommend::{generate_timetables, Recommender};
use timetabler::core::search::{enumerate, enumerate_parallel};
use timetabler::core::strategy::{BaseStrategy, CreditPriorityStrategy, StrategyKind};

fn offering(name: &str, blocks: &[(Day, u32, u32)], credit: f64) -> CourseOffering {
    CourseOffering::new(
        name.to_string(),
        blocks
            .iter()
            .map(|&(day, start, end)| Meeting::new(day, start, end))
            .collect(),
        credit,
    )
}

/// Five offerings with a mix of time clashes and a duplicated name
fn mixed_pool() -> Vec<CourseOffering> {
    vec![
        offering("Algorithms", &[(Day::Mon, 9, 11)], 3.0),
        offering("Databases", &[(Day::Mon, 10, 12)], 3.0),
        offering("Algorithms", &[(Day::Tue, 9, 11)], 3.0),
        offering("Networks", &[(Day::Wed, 13, 15), (Day::Fri, 9, 10)], 2.0),
        offering("Compilers", &[(Day::Fri, 9, 11)], 4.0),
    ]
}

fn disjoint_pool(n: u32) -> Vec<CourseOffering> {
    (0..n)
        .map(|i| offering(&format!("Course {i}"), &[(Day::Thu, 8 + i, 9 + i)], 3.0))
        .collect()
}

/// Every size-`k` index subset in lexicographic order, checked pairwise
fn brute_force(pool: &[CourseOffering], k: usize) -> Vec<Vec<String>> {
    fn walk(
        pool: &[CourseOffering],
        k: usize,
        start: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<String>>,
    ) {
        if current.len() == k {
            let ok = current.iter().enumerate().all(|(a, &i)| {
                current[a + 1..]
                    .iter()
                    .all(|&j| !conflicts(&pool[i], &pool[j]))
            });
            if ok {
                out.push(current.iter().map(|&i| describe(&pool[i])).collect());
            }
            return;
        }
        for idx in start..pool.len() {
            current.push(idx);
            walk(pool, k, idx + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    walk(pool, k, 0, &mut Vec::new(), &mut out);
    out
}

fn describe(offering: &CourseOffering) -> String {
    offering.to_string()
}

fn described(timetables: &[Timetable]) -> Vec<Vec<String>> {
    timetables
        .iter()
        .map(|t| t.iter().map(describe).collect())
        .collect()
}

#[test]
fn test_completeness_against_brute_force() {
    let pool = mixed_pool();
    for k in 1..=pool.len() {
        let produced: Vec<Timetable> = enumerate(&pool, k).collect();
        assert_eq!(described(&produced), brute_force(&pool, k), "k = {k}");
    }
}

#[test]
fn test_every_result_is_valid() {
    let pool = mixed_pool();
    for k in 1..=3 {
        for timetable in enumerate(&pool, k) {
            assert_eq!(timetable.len(), k);
            assert!(!set_has_conflict(timetable.offerings()));
            assert_eq!(find_conflict(timetable.offerings()), None);
        }
    }
}

#[test]
fn test_duplicate_names_never_share_a_timetable() {
    let pool = mixed_pool();
    for timetable in enumerate(&pool, 2) {
        let names = timetable.names();
        assert!(
            names.iter().filter(|&&n| n == "Algorithms").count() <= 1,
            "duplicate course in {names:?}"
        );
    }
}

#[test]
fn test_deterministic_across_runs() {
    let pool = mixed_pool();
    let first: Vec<Timetable> = enumerate(&pool, 2).collect();
    let second: Vec<Timetable> = enumerate(&pool, 2).collect();
    assert_eq!(first, second);
}

#[test]
fn test_four_disjoint_offerings_choose_two() {
    let pool = disjoint_pool(4);
    assert_eq!(enumerate(&pool, 2).count(), 6);
}

#[test]
fn test_k_larger_than_pool_is_empty() {
    let pool = disjoint_pool(3);
    assert_eq!(enumerate(&pool, 4).count(), 0);
    assert_eq!(enumerate(&[], 1).count(), 0);
}

#[test]
fn test_k_zero_is_empty() {
    let pool = disjoint_pool(3);
    assert_eq!(enumerate(&pool, 0).count(), 0);
}

#[test]
fn test_literal_overlap_cases() {
    let a = offering("A", &[(Day::Mon, 9, 11)], 3.0);
    let b = offering("B", &[(Day::Mon, 10, 12)], 3.0);
    let c = offering("C", &[(Day::Mon, 11, 12)], 3.0);
    let d = offering("D", &[(Day::Tue, 9, 11)], 3.0);

    assert!(conflicts(&a, &b));
    // touching blocks do not overlap
    assert!(!conflicts(&a, &c));
    assert!(!conflicts(&a, &d));
    assert!(conflicts(&a, &a.clone()));
}

#[test]
fn test_same_name_different_times_conflict() {
    let a = offering("Physics", &[(Day::Mon, 9, 10)], 3.0);
    let b = offering("Physics", &[(Day::Thu, 15, 16)], 3.0);
    assert!(conflicts(&a, &b));
}

#[test]
fn test_credit_strategy_sums_to_ten() {
    let pool = vec![
        offering("A", &[(Day::Mon, 9, 10)], 3.0),
        offering("B", &[(Day::Tue, 9, 10)], 4.0),
        offering("C", &[(Day::Wed, 9, 10)], 3.0),
    ];
    let results: Vec<_> = generate_timetables(&pool, 3, &CreditPriorityStrategy).collect();
    assert_eq!(results.len(), 1);
    assert!((results[0].score - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_base_strategy_results_match_enumeration() {
    let pool = mixed_pool();
    let scored: Vec<Timetable> = generate_timetables(&pool, 2, &BaseStrategy)
        .map(|result| result.timetable)
        .collect();
    let plain: Vec<Timetable> = enumerate(&pool, 2).collect();
    assert_eq!(scored, plain);
}

#[test]
fn test_parallel_matches_sequential() {
    let pool = mixed_pool();
    for k in 1..=4 {
        let sequential: Vec<Timetable> = enumerate(&pool, k).collect();
        assert_eq!(enumerate_parallel(&pool, k, None), sequential, "k = {k}");
    }
}

#[test]
fn test_early_termination_takes_prefix() {
    let pool = disjoint_pool(10);
    let all: Vec<Timetable> = enumerate(&pool, 3).collect();
    let first_five: Vec<Timetable> = enumerate(&pool, 3).take(5).collect();
    assert_eq!(all.len(), 120);
    assert_eq!(first_five.as_slice(), &all[..5]);
}

#[test]
fn test_recommender_ranks_by_credit() {
    let pool = mixed_pool();
    let results = Recommender::new(StrategyKind::CreditPriority.build(), 2).recommend(&pool);

    assert!(!results.is_empty());
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    // Compilers (4) pairs with a 3-credit course for the top score
    assert!((results[0].score - 7.0).abs() < f64::EPSILON);
}
