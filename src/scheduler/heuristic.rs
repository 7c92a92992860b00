//! Tier-prioritized greedy supervision scheduler.
//!
//! # Algorithm
//!
//! Sessions are processed once, in key order. The scheduler tracks each
//! teacher's cumulative hours and a *mandatory* set: responsible teachers who
//! have started supervising and still have capacity left. For each session:
//!
//! 1. Keep teachers whose hours plus the session duration fit their cap.
//! 2. Rank them into tiers: mandatory ∧ responsible, mandatory only,
//!    responsible only, assigned to the previous session, everyone else.
//!    Roster order breaks ties inside a tier.
//! 3. Take candidates in rank order until the session is staffed.
//! 4. Newly assigned responsible teachers below cap become mandatory;
//!    mandatory teachers that reached their cap leave the set.
//! 5. Record a [`StaffingWarning`] for any shortfall.
//!
//! # Complexity
//! O(s · t log t) for s sessions and t teachers.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Catalog, Schedule, Session, SessionKey};
use crate::request::AssignedSession;

/// Heuristic options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    /// Shuffle the roster once before ranking, so ties inside a tier are
    /// broken randomly instead of by roster order.
    pub shuffle_teachers: bool,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            shuffle_teachers: true,
        }
    }
}

/// A session that could not be fully staffed.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffingWarning {
    /// The understaffed session.
    pub session: SessionKey,
    /// Its day label.
    pub day: String,
    /// Supervisors actually assigned.
    pub assigned: usize,
    /// Supervisors required.
    pub required: usize,
}

impl StaffingWarning {
    /// Missing supervisors.
    pub fn shortfall(&self) -> usize {
        self.required.saturating_sub(self.assigned)
    }
}

impl fmt::Display for StaffingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Session {}-{}-{} only assigned {}/{} supervisors. Needed {} more.",
            self.day,
            self.session.date,
            self.session.label,
            self.assigned,
            self.required,
            self.shortfall()
        )
    }
}

/// Output of one heuristic pass.
#[derive(Debug, Clone)]
pub struct HeuristicOutcome {
    /// Assignment for every catalog session.
    pub schedule: Schedule,
    /// Cumulative hours per roster teacher (zero for unassigned teachers).
    pub hours: HashMap<String, f64>,
    /// One entry per understaffed session, in key order.
    pub warnings: Vec<StaffingWarning>,
}

impl HeuristicOutcome {
    /// Whether every session met its requirement.
    pub fn is_fully_staffed(&self) -> bool {
        self.warnings.is_empty()
    }

    /// The schedule in list form, one record per catalog session.
    pub fn session_records(&self, catalog: &Catalog) -> Vec<AssignedSession> {
        catalog
            .sessions()
            .iter()
            .map(|s| AssignedSession {
                num_session: s.key.label.clone(),
                day: s.day.clone(),
                date: s.key.date.to_string(),
                assigned_supervisors: self.schedule.assigned(&s.key).iter().cloned().collect(),
            })
            .collect()
    }
}

/// Tier-prioritized greedy scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use exam_duty::models::{Catalog, Session, SessionKey, Teacher};
/// use exam_duty::scheduler::HeuristicScheduler;
///
/// let key = SessionKey::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), "S1");
/// let catalog = Catalog::new(
///     vec![Session::new(key.clone(), 1, 1.0)],
///     vec![Teacher::new("Alice", 10.0)],
/// );
///
/// let outcome = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
/// assert!(outcome.schedule.contains(&key, "Alice"));
/// assert!(outcome.is_fully_staffed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeuristicScheduler {
    shuffle_teachers: bool,
}

impl HeuristicScheduler {
    /// Creates a scheduler that ranks ties by roster order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler from configuration.
    pub fn from_config(config: &HeuristicConfig) -> Self {
        Self {
            shuffle_teachers: config.shuffle_teachers,
        }
    }

    /// Enables or disables roster shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_teachers = shuffle;
        self
    }

    /// Runs the heuristic, shuffling the roster first if configured.
    pub fn schedule<R: Rng>(&self, catalog: &Catalog, rng: &mut R) -> HeuristicOutcome {
        let mut order: Vec<&str> = catalog.teacher_names().collect();
        if self.shuffle_teachers {
            order.shuffle(rng);
        }
        assign(catalog, &order)
    }

    /// Runs the heuristic with roster order as the tie-break. Deterministic.
    pub fn schedule_in_roster_order(&self, catalog: &Catalog) -> HeuristicOutcome {
        let order: Vec<&str> = catalog.teacher_names().collect();
        assign(catalog, &order)
    }
}

fn assign(catalog: &Catalog, order: &[&str]) -> HeuristicOutcome {
    let mut schedule = Schedule::for_catalog(catalog);
    let mut hours: HashMap<&str, f64> = order.iter().map(|&name| (name, 0.0)).collect();
    let mut mandatory: HashSet<&str> = HashSet::new();
    let mut previous: HashSet<&str> = HashSet::new();
    let mut warnings = Vec::new();

    for session in catalog.sessions() {
        let available: Vec<&str> = order
            .iter()
            .copied()
            .filter(|name| {
                catalog
                    .teacher(name)
                    .is_some_and(|t| t.can_take(hours[name], session.duration))
            })
            .collect();
        let candidates = rank_candidates(available, session, &mandatory, &previous);

        let mut assigned: BTreeSet<String> = BTreeSet::new();
        let mut current: HashSet<&str> = HashSet::new();
        let mut becoming_mandatory = Vec::new();
        let mut leaving_mandatory = Vec::new();

        for name in candidates {
            if assigned.len() >= session.required {
                break;
            }
            if current.contains(name) {
                continue;
            }
            let cap = catalog.load_cap(name);
            let load = hours.entry(name).or_insert(0.0);
            if *load + session.duration > cap {
                continue;
            }
            *load += session.duration;
            let load = *load;
            assigned.insert(name.to_string());
            current.insert(name);

            if session.is_responsible(name) && load < cap {
                becoming_mandatory.push(name);
            }
            if mandatory.contains(name) && load >= cap {
                leaving_mandatory.push(name);
            }
        }

        if assigned.len() < session.required {
            let warning = StaffingWarning {
                session: session.key.clone(),
                day: session.day.clone(),
                assigned: assigned.len(),
                required: session.required,
            };
            warn!(
                session = %session.key,
                assigned = warning.assigned,
                required = warning.required,
                "session understaffed"
            );
            warnings.push(warning);
        }

        mandatory.extend(becoming_mandatory);
        for name in leaving_mandatory {
            mandatory.remove(name);
        }
        previous = current;
        schedule.set(session.key.clone(), assigned);
    }

    debug!(
        sessions = catalog.session_count(),
        understaffed = warnings.len(),
        "heuristic pass complete"
    );

    HeuristicOutcome {
        schedule,
        hours: hours
            .into_iter()
            .map(|(name, h)| (name.to_string(), h))
            .collect(),
        warnings,
    }
}

/// Orders available teachers by tier. The sort is stable, so candidate order
/// survives within a tier.
fn rank_candidates<'a>(
    mut available: Vec<&'a str>,
    session: &Session,
    mandatory: &HashSet<&str>,
    previous: &HashSet<&str>,
) -> Vec<&'a str> {
    available.sort_by_key(|name| {
        match (mandatory.contains(name), session.is_responsible(name)) {
            (true, true) => 0u8,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) if previous.contains(name) => 3,
            (false, false) => 4,
        }
    });
    available
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Teacher;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn key(day: u32, label: &str) -> SessionKey {
        SessionKey::new(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), label)
    }

    #[test]
    fn test_single_teacher_fits() {
        let catalog = Catalog::new(
            vec![Session::new(key(3, "S1"), 1, 1.0)],
            vec![Teacher::new("A", 10.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.contains(&key(3, "S1"), "A"));
        assert!(out.is_fully_staffed());
        assert!((out.hours["A"] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cap_blocks_assignment_and_warns() {
        let catalog = Catalog::new(
            vec![Session::new(key(3, "S1"), 1, 1.0).with_day("Monday")],
            vec![Teacher::new("A", 0.5)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.assigned(&key(3, "S1")).is_empty());
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].shortfall(), 1);
        assert_eq!(
            out.warnings[0].to_string(),
            "Session Monday-2024-06-03-S1 only assigned 0/1 supervisors. Needed 1 more."
        );
        assert_eq!(out.hours["A"], 0.0);
    }

    #[test]
    fn test_responsible_teacher_preferred() {
        // B is responsible, so it is chosen even though A comes first on the roster
        let catalog = Catalog::new(
            vec![Session::new(key(3, "S1"), 1, 1.0).with_responsible("B")],
            vec![Teacher::new("A", 10.0), Teacher::new("B", 10.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.contains(&key(3, "S1"), "B"));
        assert!(!out.schedule.contains(&key(3, "S1"), "A"));
    }

    #[test]
    fn test_mandatory_teacher_carries_over() {
        // B becomes mandatory after S1 and outranks A on S2 despite not being
        // responsible for it
        let catalog = Catalog::new(
            vec![
                Session::new(key(3, "S1"), 1, 1.0).with_responsible("B"),
                Session::new(key(3, "S2"), 1, 1.0),
            ],
            vec![Teacher::new("A", 10.0), Teacher::new("B", 10.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.contains(&key(3, "S2"), "B"));
    }

    #[test]
    fn test_mandatory_released_at_cap() {
        // B reaches its cap on S1, so A takes S2
        let catalog = Catalog::new(
            vec![
                Session::new(key(3, "S1"), 1, 1.0).with_responsible("B"),
                Session::new(key(3, "S2"), 1, 1.0),
            ],
            vec![Teacher::new("A", 10.0), Teacher::new("B", 1.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.contains(&key(3, "S1"), "B"));
        assert!(out.schedule.contains(&key(3, "S2"), "A"));
    }

    #[test]
    fn test_continuity_preference() {
        // C staffed S1 (roster A, B, C with A and B capped out of S1),
        // so C outranks A and B on S2
        let catalog = Catalog::new(
            vec![
                Session::new(key(3, "S1"), 1, 2.0),
                Session::new(key(3, "S2"), 1, 1.0),
            ],
            vec![
                Teacher::new("A", 1.0),
                Teacher::new("B", 1.0),
                Teacher::new("C", 5.0),
            ],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.contains(&key(3, "S1"), "C"));
        assert!(out.schedule.contains(&key(3, "S2"), "C"));
    }

    #[test]
    fn test_mandatory_responsible_beats_mandatory_only() {
        // Both staff S1 and become mandatory; on S2 only B is responsible, so
        // B wins over A despite roster order
        let catalog = Catalog::new(
            vec![
                Session::new(key(3, "S1"), 2, 1.0)
                    .with_responsible("A")
                    .with_responsible("B"),
                Session::new(key(3, "S2"), 1, 1.0).with_responsible("B"),
            ],
            vec![Teacher::new("A", 10.0), Teacher::new("B", 10.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert_eq!(out.schedule.assigned(&key(3, "S1")).len(), 2);
        assert!(out.schedule.contains(&key(3, "S2"), "B"));
        assert!(!out.schedule.contains(&key(3, "S2"), "A"));
    }

    #[test]
    fn test_mandatory_beats_responsible() {
        // M is mandatory at S2 after staffing S1; R is responsible for S2 and
        // first on the roster, but M still takes the seat
        let catalog = Catalog::new(
            vec![
                Session::new(key(3, "S1"), 1, 1.0).with_responsible("M"),
                Session::new(key(3, "S2"), 1, 1.0).with_responsible("R"),
            ],
            vec![Teacher::new("R", 10.0), Teacher::new("M", 10.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.contains(&key(3, "S1"), "M"));
        assert!(out.schedule.contains(&key(3, "S2"), "M"));
        assert!(!out.schedule.contains(&key(3, "S2"), "R"));
    }

    #[test]
    fn test_responsible_beats_continuity() {
        // P staffed S1 and is first on the roster; R is responsible for S2
        let catalog = Catalog::new(
            vec![
                Session::new(key(3, "S1"), 1, 1.0),
                Session::new(key(3, "S2"), 1, 1.0).with_responsible("R"),
            ],
            vec![Teacher::new("P", 10.0), Teacher::new("R", 10.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        assert!(out.schedule.contains(&key(3, "S1"), "P"));
        assert!(out.schedule.contains(&key(3, "S2"), "R"));
        assert!(!out.schedule.contains(&key(3, "S2"), "P"));
    }

    #[test]
    fn test_never_exceeds_cap_or_duplicates() {
        let sessions: Vec<Session> = (1..=6)
            .map(|i| Session::new(key(3 + i / 3, &format!("S{}", i % 3 + 1)), 3, 1.5))
            .collect();
        let teachers: Vec<Teacher> = (0..5)
            .map(|i| Teacher::new(format!("T{i}"), 3.0 + i as f64))
            .collect();
        let catalog = Catalog::new(sessions, teachers);
        let mut rng = SmallRng::seed_from_u64(7);

        let out = HeuristicScheduler::new()
            .with_shuffle(true)
            .schedule(&catalog, &mut rng);

        assert!(out.schedule.covers(&catalog));
        for t in catalog.teachers() {
            assert!(out.hours[&t.name] <= t.load_cap + 1e-9);
        }
        for s in catalog.sessions() {
            assert!(out.schedule.assigned(&s.key).len() <= s.required);
        }
        let recomputed = out.schedule.teacher_hours(&catalog);
        for (name, h) in &recomputed {
            assert!((out.hours[name] - h).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_catalog() {
        let out = HeuristicScheduler::new().schedule_in_roster_order(&Catalog::default());
        assert!(out.schedule.is_empty());
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_session_records() {
        let catalog = Catalog::new(
            vec![Session::new(key(3, "S1"), 2, 1.0).with_day("Monday")],
            vec![Teacher::new("A", 10.0), Teacher::new("B", 10.0)],
        );
        let out = HeuristicScheduler::new().schedule_in_roster_order(&catalog);
        let records = out.session_records(&catalog);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-06-03");
        assert_eq!(records[0].assigned_supervisors, vec!["A", "B"]);

        let normalized = crate::request::normalize_assignments(&records, &catalog);
        assert_eq!(normalized, out.schedule);
    }
}
