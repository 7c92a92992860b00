//! Wire records exchanged with the routing layer.
//!
//! Field names match the JSON payload (`numSession`, `maxSupervisor`,
//! `hourlyLoad`, ...). Conversion into the domain model happens once, in
//! [`ScheduleRequest::to_catalog`] and [`normalize_assignments`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{parse_session_date, Catalog, Schedule, Session, SessionKey, Teacher};
use crate::validation::{is_quantity, validate_request, ValidationError};
use crate::Result;

fn default_kind() -> String {
    "DS".to_string()
}

/// One session as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Ordinal label, e.g. `"S1"`.
    pub num_session: String,
    /// Day label, e.g. `"Monday"`.
    pub day: String,
    /// ISO date or datetime.
    pub date: String,
    /// Supervisors required.
    pub max_supervisor: usize,
    /// Duration in hours.
    pub delay: f64,
    /// Teachers responsible for the exam.
    #[serde(default)]
    pub responsible_name: Vec<String>,
    /// Exam kind.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

/// One teacher as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRecord {
    /// Unique full name.
    pub full_name: String,
    /// Academic grade.
    #[serde(default)]
    pub grade: String,
    /// Hourly load cap.
    pub hourly_load: f64,
}

/// Request payload: sessions to staff and the teacher roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Sessions to staff.
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
    /// Available teachers.
    #[serde(default)]
    pub teachers: Vec<TeacherRecord>,
}

impl ScheduleRequest {
    /// Parses a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Validates the request and builds the catalog.
    ///
    /// # Errors
    /// [`crate::Error::InvalidInput`] listing every problem found.
    pub fn to_catalog(&self) -> Result<Catalog> {
        validate_request(self)?;
        Ok(self.build_catalog())
    }

    /// Builds a catalog from whatever is usable, never failing.
    ///
    /// Returns the catalog with every validation issue found. Sessions whose
    /// date does not parse or whose duration is invalid are skipped; teachers
    /// with an invalid load cap get a cap of zero. Duplicates keep the first
    /// occurrence.
    pub fn to_catalog_lenient(&self) -> (Catalog, Vec<ValidationError>) {
        let issues = validate_request(self).err().unwrap_or_default();
        (self.build_catalog(), issues)
    }

    fn build_catalog(&self) -> Catalog {
        let sessions = self
            .sessions
            .iter()
            .filter(|record| is_quantity(record.delay))
            .filter_map(|record| {
                let key = record.key()?;
                let session = record
                    .responsible_name
                    .iter()
                    .fold(
                        Session::new(key, record.max_supervisor, record.delay),
                        |s, name| s.with_responsible(name.as_str()),
                    )
                    .with_day(record.day.as_str())
                    .with_kind(record.kind.as_str());
                Some(session)
            })
            .collect();

        let teachers = self
            .teachers
            .iter()
            .map(|t| {
                let cap = if is_quantity(t.hourly_load) { t.hourly_load } else { 0.0 };
                Teacher::new(t.full_name.as_str(), cap).with_grade(t.grade.as_str())
            })
            .collect();

        Catalog::new(sessions, teachers)
    }
}

impl SessionRecord {
    /// Session key, or `None` if the date does not parse.
    pub fn key(&self) -> Option<SessionKey> {
        parse_session_date(&self.date).map(|date| SessionKey::new(date, self.num_session.as_str()))
    }
}

/// A session with its assigned supervisors, in list form.
///
/// This is the shape in which externally produced schedules (and the
/// heuristic's own output, see
/// [`HeuristicOutcome::session_records`](crate::scheduler::HeuristicOutcome::session_records))
/// travel. Convert with [`normalize_assignments`] before scoring or
/// projecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedSession {
    /// Ordinal label.
    pub num_session: String,
    /// Day label.
    #[serde(default)]
    pub day: String,
    /// ISO date or datetime.
    pub date: String,
    /// Assigned teacher names.
    #[serde(default)]
    pub assigned_supervisors: Vec<String>,
}

/// Converts list-shaped assignments into a [`Schedule`].
///
/// Every catalog session gets an entry; sessions absent from `records` stay
/// empty. Records whose key is not in the catalog (or whose date does not
/// parse) are dropped. Repeated names within a record collapse into one.
pub fn normalize_assignments<'a, I>(records: I, catalog: &Catalog) -> Schedule
where
    I: IntoIterator<Item = &'a AssignedSession>,
{
    let mut schedule = Schedule::for_catalog(catalog);
    for record in records {
        let Some(date) = parse_session_date(&record.date) else {
            continue;
        };
        let key = SessionKey::new(date, record.num_session.as_str());
        if catalog.position(&key).is_none() {
            continue;
        }
        let teachers: BTreeSet<String> = record.assigned_supervisors.iter().cloned().collect();
        schedule.set(key, teachers);
    }
    schedule
}
