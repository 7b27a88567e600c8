//! CSV parser for course offering data

use crate::core::models::{CourseOffering, Meeting};
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// A parsed offering plus the catalog fields used for pool filtering
#[derive(Debug, Clone, PartialEq)]
pub struct OfferingRecord {
    /// The offering itself
    pub offering: CourseOffering,
    /// Owning department (e.g., "Computer Science")
    pub department: Option<String>,
    /// Target year of study
    pub year: Option<u32>,
}

/// Accepted header names per column, English first, then the Korean catalog headers
mod column {
    pub const NAME: &[&str] = &["Name", "과목명"];
    pub const DEPARTMENT: &[&str] = &["Department", "학과"];
    pub const YEAR: &[&str] = &["Year", "학년"];
    pub const MEETINGS: &[&str] = &["Meetings", "강의시간"];
    pub const DAY: &[&str] = &["Day", "요일"];
    pub const START: &[&str] = &["Start", "시작시간"];
    pub const END: &[&str] = &["End", "종료시간"];
    pub const CREDIT: &[&str] = &["Credit", "학점"];
    pub const ROOM: &[&str] = &["Room", "강의실"];
    pub const SECTION: &[&str] = &["Section", "분반"];
    pub const PROFESSOR: &[&str] = &["Professor", "교수명"];
}

/// How meeting blocks are laid out in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeetingLayout {
    /// A single `Meetings` column such as `"Mon 9-11; Wed 9-10"`
    Combined,
    /// `Day`, `Start` and `End` columns, one block per row
    Split,
}

impl MeetingLayout {
    fn detect(headers: &[String]) -> Result<Self, Box<dyn Error>> {
        if find_column(headers, column::MEETINGS).is_some() {
            return Ok(Self::Combined);
        }
        let split = [column::DAY, column::START, column::END];
        if split.iter().all(|names| find_column(headers, names).is_some()) {
            return Ok(Self::Split);
        }
        Err("No meeting columns found (expected 'Meetings' or 'Day', 'Start', 'End')".into())
    }
}

/// Parse an offerings CSV file
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// One record per offering, in file order
///
/// # Errors
/// Returns an error if the file cannot be read or a row cannot be parsed
pub fn parse_offerings_csv<P: AsRef<Path>>(path: P) -> Result<Vec<OfferingRecord>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_offerings_str(&content)
}

/// Parse offerings from CSV text
///
/// The first non-blank line is the header. Blank lines and lines starting with
/// `#` are skipped. Rows sharing a name and a non-empty section are merged into
/// one offering, their meeting blocks appended in file order.
///
/// # Errors
/// Returns an error naming the offending line if a row cannot be parsed
pub fn parse_offerings_str(content: &str) -> Result<Vec<OfferingRecord>, Box<dyn Error>> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'));

    let (_, header_line) = lines.next().ok_or("Empty offerings file")?;
    let headers = parse_csv_line(header_line.trim_start_matches('\u{feff}'));
    if find_column(&headers, column::NAME).is_none() {
        return Err("Missing 'Name' column".into());
    }
    let layout = MeetingLayout::detect(&headers)?;

    let mut records: Vec<OfferingRecord> = Vec::new();
    let mut by_section: HashMap<(String, String), usize> = HashMap::new();

    for (idx, line) in lines {
        let fields = parse_csv_line(line);
        let record = parse_record(&fields, &headers, layout)
            .map_err(|e| format!("line {}: {e}", idx + 1))?;

        if let Some(section) = &record.offering.section {
            let key = (record.offering.name.clone(), section.clone());
            if let Some(&existing) = by_section.get(&key) {
                records[existing]
                    .offering
                    .meetings
                    .extend(record.offering.meetings);
                continue;
            }
            by_section.insert(key, records.len());
        }
        records.push(record);
    }

    Ok(records)
}

/// Parse a single data row
fn parse_record(
    fields: &[String],
    headers: &[String],
    layout: MeetingLayout,
) -> Result<OfferingRecord, String> {
    let name = get_field(fields, headers, column::NAME).ok_or("Missing course name")?;

    let meetings = match layout {
        MeetingLayout::Combined => {
            let raw = get_field(fields, headers, column::MEETINGS).ok_or("Missing meetings")?;
            parse_meetings(raw)?
        }
        MeetingLayout::Split => {
            let day = get_field(fields, headers, column::DAY).ok_or("Missing day")?;
            let start = get_field(fields, headers, column::START).ok_or("Missing start hour")?;
            let end = get_field(fields, headers, column::END).ok_or("Missing end hour")?;
            vec![Meeting::new(
                day.parse()?,
                parse_hour(start, "start")?,
                parse_hour(end, "end")?,
            )]
        }
    };

    let credit = match get_field(fields, headers, column::CREDIT) {
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| format!("Invalid credit value: '{raw}'"))?,
        None => 0.0,
    };

    let mut offering = CourseOffering::new(name.to_string(), meetings, credit);
    offering.room = get_field(fields, headers, column::ROOM).map(str::to_string);
    offering.section = get_field(fields, headers, column::SECTION).map(str::to_string);
    offering.professor = get_field(fields, headers, column::PROFESSOR).map(str::to_string);

    let year = get_field(fields, headers, column::YEAR)
        .map(|raw| {
            raw.parse::<u32>()
                .map_err(|_| format!("Invalid year value: '{raw}'"))
        })
        .transpose()?;

    Ok(OfferingRecord {
        offering,
        department: get_field(fields, headers, column::DEPARTMENT).map(str::to_string),
        year,
    })
}

/// Parse `;`-separated meeting blocks (e.g., `"Mon 9-11; Wed 9-10"`)
fn parse_meetings(raw: &str) -> Result<Vec<Meeting>, String> {
    let meetings = raw
        .split(';')
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::parse::<Meeting>)
        .collect::<Result<Vec<_>, _>>()?;

    if meetings.is_empty() {
        return Err("Missing meetings".to_string());
    }
    Ok(meetings)
}

fn parse_hour(raw: &str, label: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("Invalid {label} hour: '{raw}'"))
}

/// Split a CSV line into trimmed fields, honoring double-quoted fields
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
}

/// Get a non-empty field value by any of its header names
fn get_field<'a>(fields: &'a [String], headers: &[String], names: &[&str]) -> Option<&'a str> {
    find_column(headers, names)
        .and_then(|idx| fields.get(idx))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
