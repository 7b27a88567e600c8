//! Course offering model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a meeting block falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    /// Monday
    Mon,
    /// Tuesday
    Tue,
    /// Wednesday
    Wed,
    /// Thursday
    Thu,
    /// Friday
    Fri,
    /// Saturday
    Sat,
    /// Sunday
    Sun,
}

impl Day {
    /// Monday through Friday, in order
    pub const WEEKDAYS: [Self; 5] = [Self::Mon, Self::Tue, Self::Wed, Self::Thu, Self::Fri];

    /// Three-letter English name (e.g., "Mon")
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
            Self::Sun => "Sun",
        }
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" | "월" => Ok(Self::Mon),
            "tue" | "tues" | "tuesday" | "화" => Ok(Self::Tue),
            "wed" | "wednesday" | "수" => Ok(Self::Wed),
            "thu" | "thur" | "thurs" | "thursday" | "목" => Ok(Self::Thu),
            "fri" | "friday" | "금" => Ok(Self::Fri),
            "sat" | "saturday" | "토" => Ok(Self::Sat),
            "sun" | "sunday" | "일" => Ok(Self::Sun),
            _ => Err(format!("Unknown day: '{s}'")),
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A single `(day, start, end)` block during which an offering meets
///
/// Hours are whole integers and the range is half-open: `[start, end)`.
/// Nothing here checks that `start < end`; degenerate blocks are kept as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meeting {
    /// Day of the week
    pub day: Day,
    /// Start hour (inclusive)
    pub start: u32,
    /// End hour (exclusive)
    pub end: u32,
}

impl Meeting {
    /// Create a new meeting block
    #[must_use]
    pub const fn new(day: Day, start: u32, end: u32) -> Self {
        Self { day, start, end }
    }

    /// Whether two blocks share a day and their half-open hour ranges intersect
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }

    /// Length of the block in hours (zero for degenerate blocks)
    #[must_use]
    pub const fn hours(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl FromStr for Meeting {
    type Err = String;

    /// Parse a block written as `"Mon 9-11"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (day, range) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| format!("Expected 'DAY START-END', got '{trimmed}'"))?;
        let (start, end) = range
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Expected 'START-END' hour range, got '{}'", range.trim()))?;

        let start = start
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid start hour in '{trimmed}'"))?;
        let end = end
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid end hour in '{trimmed}'"))?;

        Ok(Self::new(day.parse()?, start, end))
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

/// One enrollable offering of a course
///
/// Two offerings with the same `name` are the same course and can never sit in
/// one timetable together, whatever their sections or meeting times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    /// Course name (e.g., "Algorithms")
    pub name: String,

    /// Meeting blocks, in the order they were given
    pub meetings: Vec<Meeting>,

    /// Credit value (not validated; carried into scoring as-is)
    pub credit: f64,

    /// Room the offering meets in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,

    /// Section label (e.g., "01")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Teaching professor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
}

impl CourseOffering {
    /// Create a new offering without descriptive fields
    ///
    /// # Arguments
    /// * `name` - Course name
    /// * `meetings` - Meeting blocks
    /// * `credit` - Credit value
    #[must_use]
    pub const fn new(name: String, meetings: Vec<Meeting>, credit: f64) -> Self {
        Self {
            name,
            meetings,
            credit,
            room: None,
            section: None,
            professor: None,
        }
    }

    /// Set the room
    #[must_use]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Set the section label
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Set the professor
    #[must_use]
    pub fn with_professor(mut self, professor: impl Into<String>) -> Self {
        self.professor = Some(professor.into());
        self
    }

    /// Append a meeting block
    pub fn add_meeting(&mut self, meeting: Meeting) {
        self.meetings.push(meeting);
    }

    /// Whether any meeting block falls on `day`
    #[must_use]
    pub fn meets_on(&self, day: Day) -> bool {
        self.meetings.iter().any(|m| m.day == day)
    }

    /// Total weekly contact hours
    #[must_use]
    pub fn weekly_hours(&self) -> u32 {
        self.meetings.iter().map(Meeting::hours).sum()
    }
}

impl fmt::Display for CourseOffering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(section) = &self.section {
            write!(f, " [{section}]")?;
        }
        let blocks: Vec<String> = self.meetings.iter().map(ToString::to_string).collect();
        write!(f, " ({})", blocks.join(", "))?;
        if let Some(professor) = &self.professor {
            write!(f, ", {professor}")?;
        }
        if let Some(room) = &self.room {
            write!(f, ", {room}")?;
        }
        write!(f, ", {} credits", self.credit)
    }
}
