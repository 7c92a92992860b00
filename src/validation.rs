//! Input validation for supervision requests.
//!
//! Checks structural integrity of sessions and teachers before a catalog is
//! built. Detects:
//! - Duplicate session keys and duplicate teacher names
//! - Dates that are not ISO `YYYY-MM-DD` (optionally followed by `T...`)
//! - Session labels without a numeric ordinal
//! - Negative or non-finite durations and load caps
//!
//! Responsible-teacher names that are not on the roster are accepted: such
//! teachers simply have no capacity.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{parse_ordinal, parse_session_date, SessionKey};
use crate::request::ScheduleRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two sessions share the same (date, label).
    DuplicateSession,
    /// Two teachers share the same full name.
    DuplicateTeacher,
    /// A session date does not parse.
    InvalidDate,
    /// A session label has no numeric ordinal.
    InvalidSessionLabel,
    /// A duration or load cap is negative or not finite.
    InvalidQuantity,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a request.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_request(request: &ScheduleRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    for t in &request.teachers {
        if !names.insert(t.full_name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTeacher,
                format!("Duplicate teacher: {}", t.full_name),
            ));
        }
        if !is_quantity(t.hourly_load) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantity,
                format!("Teacher '{}' has invalid hourly load {}", t.full_name, t.hourly_load),
            ));
        }
    }

    let mut keys: HashSet<SessionKey> = HashSet::new();
    for s in &request.sessions {
        if parse_ordinal(&s.num_session).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSessionLabel,
                format!("Session label '{}' has no ordinal number", s.num_session),
            ));
        }
        if !is_quantity(s.delay) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantity,
                format!("Session {} {} has invalid duration {}", s.date, s.num_session, s.delay),
            ));
        }
        match parse_session_date(&s.date) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDate,
                format!("Session {} has unparsable date '{}'", s.num_session, s.date),
            )),
            Some(date) => {
                let key = SessionKey::new(date, s.num_session.as_str());
                if !keys.insert(key) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateSession,
                        format!("Duplicate session: {} {}", date, s.num_session),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether `value` is a usable duration or load cap.
pub(crate) fn is_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{SessionRecord, TeacherRecord};

    fn session(label: &str, date: &str) -> SessionRecord {
        SessionRecord {
            num_session: label.into(),
            day: "Monday".into(),
            date: date.into(),
            max_supervisor: 1,
            delay: 1.0,
            responsible_name: vec!["Nobody On Roster".into()],
            kind: "DS".into(),
        }
    }

    fn teacher(name: &str, load: f64) -> TeacherRecord {
        TeacherRecord {
            full_name: name.into(),
            grade: "PA".into(),
            hourly_load: load,
        }
    }

    fn has_kind(result: ValidationResult, kind: ValidationErrorKind) -> bool {
        result.unwrap_err().iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_valid_request() {
        let req = ScheduleRequest {
            sessions: vec![session("S1", "2024-06-03"), session("S2", "2024-06-03T00:00:00")],
            teachers: vec![teacher("A", 4.0), teacher("B", 0.0)],
        };
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn test_empty_request_is_valid() {
        assert!(validate_request(&ScheduleRequest::default()).is_ok());
    }

    #[test]
    fn test_duplicate_session() {
        // Same key once as a date, once as a datetime
        let req = ScheduleRequest {
            sessions: vec![session("S1", "2024-06-03"), session("S1", "2024-06-03T10:00:00")],
            teachers: vec![],
        };
        assert!(has_kind(validate_request(&req), ValidationErrorKind::DuplicateSession));
    }

    #[test]
    fn test_duplicate_teacher() {
        let req = ScheduleRequest {
            sessions: vec![],
            teachers: vec![teacher("A", 4.0), teacher("A", 2.0)],
        };
        assert!(has_kind(validate_request(&req), ValidationErrorKind::DuplicateTeacher));
    }

    #[test]
    fn test_invalid_label_and_date() {
        let req = ScheduleRequest {
            sessions: vec![session("Morning", "2024-06-03"), session("S1", "tomorrow")],
            teachers: vec![],
        };
        let errors = validate_request(&req).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidSessionLabel));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidDate));
    }

    #[test]
    fn test_invalid_quantities() {
        let mut s = session("S1", "2024-06-03");
        s.delay = f64::NAN;
        let req = ScheduleRequest {
            sessions: vec![s],
            teachers: vec![teacher("A", -1.0)],
        };
        let errors = validate_request(&req).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidQuantity)
                .count(),
            2
        );
    }
}
