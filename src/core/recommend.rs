//! Timetable recommendation pipeline
//!
//! Ties the pieces together: the strategy prepares the pool, the search
//! enumerates conflict-free timetables, and the strategy scores each one.
//! Pool, course count and strategy are always passed in explicitly.

use crate::core::models::{CourseOffering, ScoredResult};
use crate::core::search::{enumerate_parallel, CancellationToken, Combinations};
use crate::core::strategy::Strategy;
use crate::{debug, info};

/// Lazy stream of scored timetables
pub struct ScoredTimetables<'a> {
    combinations: Combinations<'a>,
    strategy: &'a dyn Strategy,
}

impl ScoredTimetables<'_> {
    /// Number of extension steps the underlying search has attempted
    #[must_use]
    pub const fn explored(&self) -> u64 {
        self.combinations.explored()
    }
}

impl Iterator for ScoredTimetables<'_> {
    type Item = ScoredResult;

    fn next(&mut self) -> Option<Self::Item> {
        let timetable = self.combinations.next()?;
        let score = self.strategy.score(&timetable);
        Some(ScoredResult::new(timetable, score))
    }
}

/// Generate `(timetable, score)` pairs for `count` courses out of `pool`
///
/// Results come out in search order; no ranking is applied here.
#[must_use]
pub fn generate_timetables<'a>(
    pool: &'a [CourseOffering],
    count: usize,
    strategy: &'a dyn Strategy,
) -> ScoredTimetables<'a> {
    ScoredTimetables {
        combinations: Combinations::new(strategy.prepare(pool), count),
        strategy,
    }
}

/// Sort results by descending score, keeping search order among equal scores
pub fn rank_results(results: &mut [ScoredResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Search options beyond pool, count and strategy
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum number of results to return (`None` = all)
    pub limit: Option<usize>,
    /// Split the search across a rayon thread pool
    pub parallel: bool,
    /// Token for stopping the search early
    pub cancel: Option<CancellationToken>,
}

/// Runs searches with a fixed strategy, course count and options
pub struct Recommender {
    strategy: Box<dyn Strategy>,
    count: usize,
    options: SearchOptions,
}

impl Recommender {
    /// Create a recommender choosing `count` courses per timetable
    #[must_use]
    pub fn new(strategy: Box<dyn Strategy>, count: usize) -> Self {
        Self {
            strategy,
            count,
            options: SearchOptions::default(),
        }
    }

    /// Cap the number of returned results
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.options.limit = limit;
        self
    }

    /// Enable or disable the parallel search
    #[must_use]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.options.parallel = enabled;
        self
    }

    /// Attach a cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.options.cancel = Some(token);
        self
    }

    /// The active strategy
    #[must_use]
    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    /// Courses per timetable
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Lazily stream scored timetables in search order
    ///
    /// Ignores `limit` and `parallel`; the caller decides how much to consume.
    #[must_use]
    pub fn stream<'a>(&'a self, pool: &'a [CourseOffering]) -> ScoredTimetables<'a> {
        let mut stream = generate_timetables(pool, self.count, self.strategy.as_ref());
        if let Some(token) = &self.options.cancel {
            stream.combinations = stream.combinations.with_cancellation(token.clone());
        }
        stream
    }

    /// Materialize results, ranked when the strategy asks for it, capped at `limit`
    ///
    /// When results are not ranked the limit ends the search early. Ranked
    /// results need the full result set before the top entries are known.
    #[must_use]
    pub fn recommend(&self, pool: &[CourseOffering]) -> Vec<ScoredResult> {
        info!(
            "Searching {} offerings for {}-course timetables (strategy: {})",
            pool.len(),
            self.count,
            self.strategy.name()
        );

        let ranks = self.strategy.ranks_results();
        let mut results = if self.options.parallel {
            self.collect_parallel(pool)
        } else {
            let stream = self.stream(pool);
            match self.options.limit {
                Some(limit) if !ranks => stream.take(limit).collect(),
                _ => stream.collect(),
            }
        };

        if ranks {
            rank_results(&mut results);
        }
        if let Some(limit) = self.options.limit {
            results.truncate(limit);
        }

        info!("Found {} timetable(s)", results.len());
        results
    }

    fn collect_parallel(&self, pool: &[CourseOffering]) -> Vec<ScoredResult> {
        let prepared = self.strategy.prepare(pool);
        let timetables = enumerate_parallel(&prepared, self.count, self.options.cancel.as_ref());
        debug!(
            "Parallel search produced {} timetable(s)",
            timetables.len()
        );
        timetables
            .into_iter()
            .map(|timetable| {
                let score = self.strategy.score(&timetable);
                ScoredResult::new(timetable, score)
            })
            .collect()
    }
}
