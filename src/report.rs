//! Per-teacher projection of a schedule.
//!
//! Output records use the routing layer's field names (`teacherName`,
//! `hourlyLoad`, `grade`, `sessions`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Catalog, Schedule};

/// Sessions a teacher supervises on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateSessions {
    /// Calendar date.
    pub date: NaiveDate,
    /// Session labels on that date, in key order.
    pub sessions: Vec<String>,
}

/// One teacher's duty roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherReport {
    /// Teacher name.
    pub teacher_name: String,
    /// Hourly load cap.
    pub hourly_load: f64,
    /// Grade.
    pub grade: String,
    /// Assigned sessions grouped by date.
    pub sessions: Vec<DateSessions>,
}

impl TeacherReport {
    /// Number of sessions supervised.
    pub fn session_count(&self) -> usize {
        self.sessions.iter().map(|d| d.sessions.len()).sum()
    }
}

/// Projects `schedule` into one report per roster teacher.
///
/// Teachers appear in roster order, including those with no sessions. Dates
/// appear in order of first occurrence while scanning sessions by key, which
/// is chronological.
pub fn project(schedule: &Schedule, catalog: &Catalog) -> Vec<TeacherReport> {
    catalog
        .teachers()
        .iter()
        .map(|teacher| {
            let mut sessions: Vec<DateSessions> = Vec::new();
            for session in catalog.sessions() {
                if !schedule.contains(&session.key, &teacher.name) {
                    continue;
                }
                let label = session.key.label.clone();
                match sessions.iter_mut().find(|d| d.date == session.key.date) {
                    Some(day) => day.sessions.push(label),
                    None => sessions.push(DateSessions {
                        date: session.key.date,
                        sessions: vec![label],
                    }),
                }
            }
            TeacherReport {
                teacher_name: teacher.name.clone(),
                hourly_load: teacher.load_cap,
                grade: teacher.grade.clone(),
                sessions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, SessionKey, Teacher};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Session::new(SessionKey::new(date(4), "S1"), 1, 1.0),
                Session::new(SessionKey::new(date(3), "S2"), 1, 1.0),
                Session::new(SessionKey::new(date(3), "S1"), 1, 1.0),
            ],
            vec![
                Teacher::new("Zoe", 6.0).with_grade("PA"),
                Teacher::new("Adam", 3.0).with_grade("MA"),
            ],
        )
    }

    #[test]
    fn test_groups_by_date_in_key_order() {
        let c = catalog();
        let mut s = Schedule::for_catalog(&c);
        s.assign(&SessionKey::new(date(4), "S1"), "Zoe");
        s.assign(&SessionKey::new(date(3), "S2"), "Zoe");
        s.assign(&SessionKey::new(date(3), "S1"), "Zoe");

        let reports = project(&s, &c);
        assert_eq!(reports.len(), 2);
        let zoe = &reports[0];
        assert_eq!(zoe.teacher_name, "Zoe");
        assert_eq!(zoe.grade, "PA");
        assert_eq!(
            zoe.sessions,
            vec![
                DateSessions {
                    date: date(3),
                    sessions: vec!["S1".into(), "S2".into()],
                },
                DateSessions {
                    date: date(4),
                    sessions: vec!["S1".into()],
                },
            ]
        );
        assert_eq!(zoe.session_count(), 3);
    }

    #[test]
    fn test_unassigned_teacher_listed() {
        let c = catalog();
        let reports = project(&Schedule::for_catalog(&c), &c);
        assert_eq!(reports[1].teacher_name, "Adam");
        assert!(reports[1].sessions.is_empty());
        assert!((reports[1].hourly_load - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_wire_shape() {
        let c = catalog();
        let mut s = Schedule::for_catalog(&c);
        s.assign(&SessionKey::new(date(3), "S1"), "Adam");

        let json = serde_json::to_value(&project(&s, &c)[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "teacherName": "Adam",
                "hourlyLoad": 3.0,
                "grade": "MA",
                "sessions": [{"date": "2024-06-03", "sessions": ["S1"]}]
            })
        );
    }
}
