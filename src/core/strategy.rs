//! Pluggable strategies for pool preparation and timetable scoring
//!
//! A strategy never drives the search itself. It may reshape the pool before
//! the search starts and it scores every timetable the search produces, which
//! keeps enumeration and scoring independent of each other. Adding a policy
//! means adding a [`Strategy`] implementation and a [`StrategyKind`] variant.

use crate::core::models::{CourseOffering, Timetable};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Policy applied around the combination search
pub trait Strategy: Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Reorder or filter the pool before searching (identity by default)
    fn prepare<'p>(&self, pool: &'p [CourseOffering]) -> Cow<'p, [CourseOffering]> {
        Cow::Borrowed(pool)
    }

    /// Score a finished timetable
    ///
    /// Must not fail for any timetable the search can produce.
    fn score(&self, timetable: &Timetable) -> f64;

    /// Whether callers should present results by descending score
    fn ranks_results(&self) -> bool {
        false
    }

    /// What the score measures, for display
    fn score_label(&self) -> &'static str {
        "score"
    }
}

/// Produces valid timetables without ranking them
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseStrategy;

impl Strategy for BaseStrategy {
    fn name(&self) -> &'static str {
        "base"
    }

    fn score(&self, _timetable: &Timetable) -> f64 {
        0.0
    }
}

/// Scores a timetable by the sum of its members' credits
///
/// Credits are summed without validation, so negative or NaN credits flow
/// straight into the score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreditPriorityStrategy;

impl Strategy for CreditPriorityStrategy {
    fn name(&self) -> &'static str {
        "credit"
    }

    fn score(&self, timetable: &Timetable) -> f64 {
        timetable.total_credits()
    }

    fn ranks_results(&self) -> bool {
        true
    }

    fn score_label(&self) -> &'static str {
        "total credits"
    }
}

/// Named strategy selection, as stored in config and passed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// [`BaseStrategy`]
    #[default]
    Base,
    /// [`CreditPriorityStrategy`]
    CreditPriority,
}

impl StrategyKind {
    /// Every selectable strategy
    pub const ALL: [Self; 2] = [Self::Base, Self::CreditPriority];

    /// Instantiate the strategy
    #[must_use]
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            Self::Base => Box::new(BaseStrategy),
            Self::CreditPriority => Box::new(CreditPriorityStrategy),
        }
    }

    /// Human-readable description for help output and reports
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Base => "generate valid timetables only",
            Self::CreditPriority => "rank timetables by total credits",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" | "default" | "plain" => Ok(Self::Base),
            "credit" | "credits" | "credit-priority" | "credit_priority" => {
                Ok(Self::CreditPriority)
            }
            _ => Err(format!(
                "Unknown strategy: '{s}' (expected one of: base, credit)"
            )),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::CreditPriority => write!(f, "credit"),
        }
    }
}
