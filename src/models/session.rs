//! Exam session model.
//!
//! A session is one timetabled sitting (date + ordinal slot such as `S1`)
//! that needs a number of supervisors for a fixed duration.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a session: calendar date plus ordinal label (`S1`, `S2`, ...).
///
/// Keys order by date, then by the numeric part of the label. The label
/// itself breaks remaining ties so that ordering stays total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    /// Calendar date of the sitting.
    pub date: NaiveDate,
    /// Ordinal label as supplied (e.g. `"S2"`).
    pub label: String,
    ordinal: u32,
}

impl SessionKey {
    /// Creates a key. Labels without a numeric part sort as ordinal 0.
    pub fn new(date: NaiveDate, label: impl Into<String>) -> Self {
        let label = label.into();
        let ordinal = parse_ordinal(&label).unwrap_or(0);
        Self {
            date,
            label,
            ordinal,
        }
    }

    /// Numeric part of the label (`"S3"` → 3).
    #[inline]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }
}

impl Ord for SessionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then(self.ordinal.cmp(&other.ordinal))
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for SessionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date, self.label)
    }
}

/// Extracts the ordinal from a session label.
///
/// Leading non-digit characters are skipped (`"S12"` → 12). Returns `None`
/// when nothing numeric remains.
pub fn parse_ordinal(label: &str) -> Option<u32> {
    label
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .parse()
        .ok()
}

/// Parses an ISO date, accepting a full datetime by keeping the date part.
///
/// `"2024-06-03"` and `"2024-06-03T08:30:00"` both yield 2024-06-03.
pub fn parse_session_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw).trim();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// A timetabled exam session requiring supervision.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Unique session key.
    pub key: SessionKey,
    /// Day label (e.g. `"Monday"`), informational.
    pub day: String,
    /// Number of supervisors the session needs.
    pub required: usize,
    /// Duration in hours, counted against each assigned teacher's cap.
    pub duration: f64,
    /// Teachers responsible for the exam being sat.
    pub responsible: BTreeSet<String>,
    /// Exam kind (`"DS"`, `"Exam"`), informational.
    pub kind: String,
}

impl Session {
    /// Creates a session with no responsible teachers.
    pub fn new(key: SessionKey, required: usize, duration: f64) -> Self {
        Self {
            key,
            day: String::new(),
            required,
            duration,
            responsible: BTreeSet::new(),
            kind: "DS".to_string(),
        }
    }

    /// Sets the day label.
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = day.into();
        self
    }

    /// Adds a responsible teacher.
    pub fn with_responsible(mut self, name: impl Into<String>) -> Self {
        self.responsible.insert(name.into());
        self
    }

    /// Sets the exam kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Whether `name` is responsible for this session.
    pub fn is_responsible(&self, name: &str) -> bool {
        self.responsible.contains(name)
    }
}
