//! Combination search over an offering pool
//!
//! This module enumerates every size-`k` selection of mutually compatible
//! offerings using incremental backtracking:
//! 1. Candidates are tried in pool-index order, so output is lexicographic by index
//! 2. A candidate is only checked against the offerings already chosen
//! 3. A branch is abandoned as soon as its newest member conflicts
//! 4. Branches that can no longer reach `k` members are never entered
//!
//! The search is exposed as a lazy iterator, so a consumer that only wants the
//! first few timetables never pays for the full `C(n, k)` space.

use crate::core::conflict::conflicts_with_any;
use crate::core::models::{CourseOffering, Timetable};
use rayon::prelude::*;
use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag for cooperatively stopping a running search
///
/// Clones share the same flag. The search checks it before every extension
/// step and ends its iterator once the flag is set.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not yet cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Lazy iterator over conflict-free timetables of a fixed size
///
/// Holds the pool either borrowed or owned, the indices chosen so far and the
/// next pool index to try at the current depth.
#[derive(Debug)]
pub struct Combinations<'a> {
    pool: Cow<'a, [CourseOffering]>,
    k: usize,
    chosen: Vec<usize>,
    next: usize,
    /// Number of leading entries in `chosen` that are fixed for this branch
    floor: usize,
    cancel: Option<CancellationToken>,
    explored: u64,
    done: bool,
}

impl<'a> Combinations<'a> {
    /// Search the whole pool
    ///
    /// Yields nothing when `k == 0` or `k` exceeds the pool size.
    #[must_use]
    pub fn new(pool: impl Into<Cow<'a, [CourseOffering]>>, k: usize) -> Self {
        let pool = pool.into();
        let done = k == 0 || k > pool.len();
        Self {
            pool,
            k,
            chosen: Vec::with_capacity(k),
            next: 0,
            floor: 0,
            cancel: None,
            explored: 0,
            done,
        }
    }

    /// Search only the branch whose first chosen offering is `pool[first]`
    ///
    /// The union of all rooted branches, concatenated by `first`, is exactly the
    /// output of [`Combinations::new`].
    #[must_use]
    pub fn rooted(pool: impl Into<Cow<'a, [CourseOffering]>>, k: usize, first: usize) -> Self {
        let pool = pool.into();
        let done = k == 0 || first >= pool.len() || k > pool.len() - first;
        let mut chosen = Vec::with_capacity(k);
        if !done {
            chosen.push(first);
        }
        Self {
            pool,
            k,
            chosen,
            next: first + 1,
            floor: 1,
            cancel: None,
            explored: 0,
            done,
        }
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The pool being searched
    #[must_use]
    pub fn pool(&self) -> &[CourseOffering] {
        &self.pool
    }

    /// Number of extension steps attempted so far
    #[must_use]
    pub const fn explored(&self) -> u64 {
        self.explored
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Whether `candidate` is compatible with every chosen offering
    fn fits(&self, candidate: usize) -> bool {
        let pool = &*self.pool;
        !conflicts_with_any(
            &pool[candidate],
            self.chosen.iter().map(|&idx| &pool[idx]),
        )
    }

    /// Drop the last choice and resume after it; `false` once the branch is spent
    fn backtrack(&mut self) -> bool {
        if self.chosen.len() <= self.floor {
            return false;
        }
        match self.chosen.pop() {
            Some(last) => {
                self.next = last + 1;
                true
            }
            None => false,
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Timetable;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.is_cancelled() {
                crate::warn!(
                    "Search cancelled after {} extension steps",
                    self.explored
                );
                self.done = true;
                return None;
            }

            if self.chosen.len() == self.k {
                debug_assert!(self.chosen.windows(2).all(|w| w[0] < w[1]));
                let timetable = Timetable::from_indices(&self.pool, &self.chosen);
                if !self.backtrack() {
                    self.done = true;
                }
                return Some(timetable);
            }

            let needed = self.k - self.chosen.len();
            if self.next + needed <= self.pool.len() {
                let candidate = self.next;
                self.next += 1;
                self.explored += 1;
                if self.fits(candidate) {
                    self.chosen.push(candidate);
                }
            } else if !self.backtrack() {
                crate::debug!(
                    "Search exhausted after {} extension steps",
                    self.explored
                );
                self.done = true;
                return None;
            }
        }
    }
}

impl std::iter::FusedIterator for Combinations<'_> {}

/// Enumerate every conflict-free size-`k` timetable in `pool`, lazily
///
/// Output is ordered lexicographically by pool index and is identical across
/// runs for the same pool order and `k`.
#[must_use]
pub fn enumerate(pool: &[CourseOffering], k: usize) -> Combinations<'_> {
    Combinations::new(pool, k)
}

/// Enumerate every conflict-free size-`k` timetable, one rayon task per first choice
///
/// Branches are collected in first-index order, so the result equals
/// `enumerate(pool, k).collect()`. Unlike [`enumerate`] this materializes the
/// full result set.
#[must_use]
pub fn enumerate_parallel(
    pool: &[CourseOffering],
    k: usize,
    cancel: Option<&CancellationToken>,
) -> Vec<Timetable> {
    if k == 0 || k > pool.len() {
        return Vec::new();
    }

    let branches: Vec<Vec<Timetable>> = (0..=pool.len() - k)
        .into_par_iter()
        .map(|first| {
            let branch = Combinations::rooted(pool, k, first);
            match cancel {
                Some(token) => branch.with_cancellation(token.clone()).collect(),
                None => branch.collect(),
            }
        })
        .collect();

    branches.concat()
}
