//! Schedule quality metrics (KPIs).
//!
//! Computes staffing and workload indicators for a supervision schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage Rate | Assigned seats / required seats (capped per session) |
//! | Total Shortfall | Sum of max(0, required - assigned) |
//! | Overload Hours | Sum of max(0, hours - cap) per teacher |
//! | Avg Utilization | Mean of hours / cap over teachers with a positive cap |

use std::collections::HashMap;

use crate::models::{Catalog, Schedule};

/// Schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Seats requested across all sessions.
    pub required_seats: usize,
    /// Seats filled, counting at most `required` per session.
    pub filled_seats: usize,
    /// Fraction of requested seats filled (1.0 when nothing is requested).
    pub coverage_rate: f64,
    /// Sessions below their requirement.
    pub understaffed_sessions: usize,
    /// Missing supervisors summed over sessions.
    pub total_shortfall: usize,
    /// Hours per teacher who supervises at least one session.
    pub load_by_teacher: HashMap<String, f64>,
    /// Teachers above their cap, sorted by name.
    pub overloaded_teachers: Vec<String>,
    /// Hours above cap summed over teachers.
    pub total_overload_hours: f64,
    /// Mean hours / cap over roster teachers with a positive cap.
    pub avg_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs for `schedule` against `catalog`.
    pub fn calculate(schedule: &Schedule, catalog: &Catalog) -> Self {
        let mut filled_seats = 0;
        let mut understaffed_sessions = 0;
        let mut total_shortfall = 0;

        for session in catalog.sessions() {
            let assigned = schedule.assigned(&session.key).len();
            filled_seats += assigned.min(session.required);
            if assigned < session.required {
                understaffed_sessions += 1;
                total_shortfall += session.required - assigned;
            }
        }

        let load_by_teacher = schedule.teacher_hours(catalog);
        let mut overloaded_teachers = Vec::new();
        let mut total_overload_hours = 0.0;
        for (name, &hours) in &load_by_teacher {
            let excess = hours - catalog.load_cap(name);
            if excess > 0.0 {
                overloaded_teachers.push(name.clone());
                total_overload_hours += excess;
            }
        }
        overloaded_teachers.sort();

        let utilizations: Vec<f64> = catalog
            .teachers()
            .iter()
            .filter(|t| t.load_cap > 0.0)
            .map(|t| load_by_teacher.get(&t.name).copied().unwrap_or(0.0) / t.load_cap)
            .collect();
        let avg_utilization = if utilizations.is_empty() {
            0.0
        } else {
            utilizations.iter().sum::<f64>() / utilizations.len() as f64
        };

        let required_seats = catalog.total_required();
        let coverage_rate = if required_seats == 0 {
            1.0
        } else {
            filled_seats as f64 / required_seats as f64
        };

        Self {
            required_seats,
            filled_seats,
            coverage_rate,
            understaffed_sessions,
            total_shortfall,
            load_by_teacher,
            overloaded_teachers,
            total_overload_hours,
            avg_utilization,
        }
    }

    /// Whether every session is staffed and nobody exceeds their cap.
    pub fn is_feasible(&self) -> bool {
        self.total_shortfall == 0 && self.overloaded_teachers.is_empty()
    }
}
